//! Stable, transport-agnostic helpers that wrap the internal service layer.
//!
//! This module exposes the dashboard-facing operations without tying callers
//! to the entire service surface area. Monetary fields in every DTO are
//! rescaled to exactly two fractional digits; dates serialize as
//! `YYYY-MM-DD` and month keys as `YYYY-MM`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use fincast_core::{
    AggregationService, BudgetService, CategoryStore, CoreError, ForecastService,
    ForecastSettings, IncomeService, ManualIncomeStore, PaceStatus, ProjectionSettings,
};
use fincast_domain::{money, DateRange, Ledger, MonthKey};

/// Spending status for one budgeted category.
#[derive(Debug, Clone, Serialize)]
pub struct ApiCategoryStatus {
    pub category: String,
    pub spent: Decimal,
    pub budget: Decimal,
    pub percent: Decimal,
    pub remaining: Decimal,
    pub pace: PaceStatus,
}

/// Budget status payload for one month.
#[derive(Debug, Clone, Serialize)]
pub struct ApiBudgetStatus {
    pub month: MonthKey,
    pub categories: Vec<ApiCategoryStatus>,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
}

/// Income projection payload.
#[derive(Debug, Clone, Serialize)]
pub struct ApiIncomeProjection {
    pub projected_income: Decimal,
    pub is_manual: bool,
    pub months_analyzed: u32,
}

/// One projected day.
#[derive(Debug, Clone, Serialize)]
pub struct ApiProjectionPoint {
    pub date: NaiveDate,
    pub balance: Decimal,
}

/// Forecast payload: current position, daily rates, baseline projection.
#[derive(Debug, Clone, Serialize)]
pub struct ApiForecast {
    pub current_balance: Decimal,
    pub daily_burn: Decimal,
    pub daily_income: Decimal,
    pub projection: Vec<ApiProjectionPoint>,
}

/// Budget status for the month, evaluated as of `today`.
pub fn api_budget_status(
    ledger: &Ledger,
    month: &str,
    today: NaiveDate,
) -> Result<ApiBudgetStatus, CoreError> {
    let month = parse_month(month)?;
    let report = BudgetService::month_status(ledger, ledger, month, today);
    Ok(ApiBudgetStatus {
        month: report.month,
        categories: report
            .categories
            .into_iter()
            .map(|entry| ApiCategoryStatus {
                category: entry.category,
                spent: money::to_currency(entry.spent),
                budget: money::to_currency(entry.budget),
                percent: entry.percent.round_dp(2),
                remaining: money::to_currency(entry.remaining),
                pace: entry.pace,
            })
            .collect(),
        total_budget: money::to_currency(report.total_budget),
        total_spent: money::to_currency(report.total_spent),
    })
}

/// Projected income for the month: manual override or trailing average.
pub fn api_income_projection(
    ledger: &Ledger,
    month: &str,
    settings: &ProjectionSettings,
) -> Result<ApiIncomeProjection, CoreError> {
    let month = parse_month(month)?;
    let projection = IncomeService::project(ledger, ledger, month, settings);
    Ok(ApiIncomeProjection {
        projected_income: money::to_currency(projection.projected_income),
        is_manual: projection.is_manual,
        months_analyzed: projection.months_analyzed,
    })
}

/// Baseline cash-flow forecast from `today`.
pub fn api_forecast(ledger: &Ledger, today: NaiveDate, settings: &ForecastSettings) -> ApiForecast {
    let forecast = ForecastService::forecast(ledger, today, settings);
    ApiForecast {
        current_balance: money::to_currency(forecast.current_balance),
        daily_burn: money::to_currency(forecast.daily_burn),
        daily_income: money::to_currency(forecast.daily_income),
        projection: forecast
            .projection
            .into_iter()
            .map(|point| ApiProjectionPoint {
                date: point.date,
                balance: money::to_currency(point.balance),
            })
            .collect(),
    }
}

/// Expense totals per category over the inclusive range.
pub fn api_expense_breakdown(
    ledger: &Ledger,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BTreeMap<String, Decimal>, CoreError> {
    let range = DateRange::new(start, end)?;
    Ok(AggregationService::expense_by_category(ledger, range)
        .into_iter()
        .map(|(category, amount)| (category, money::to_currency(amount)))
        .collect())
}

/// Sets or replaces the budget limit for (category, month).
pub fn api_set_budget(
    ledger: &mut Ledger,
    category: &str,
    month: &str,
    limit: Decimal,
) -> Result<(), CoreError> {
    let month = parse_month(month)?;
    ledger.upsert_budget(category, month, limit)
}

/// Removes the budget limit for (category, month), leaving history alone.
pub fn api_delete_budget(ledger: &mut Ledger, category: &str, month: &str) -> Result<(), CoreError> {
    let month = parse_month(month)?;
    ledger.delete_budget(category, month)
}

/// Stores a manual income override for the month.
pub fn api_set_manual_income(
    ledger: &mut Ledger,
    month: &str,
    amount: Decimal,
) -> Result<(), CoreError> {
    let month = parse_month(month)?;
    ledger.set_manual_income(month, amount)
}

fn parse_month(raw: &str) -> Result<MonthKey, CoreError> {
    raw.parse()
        .map_err(|err: fincast_domain::MonthKeyParseError| CoreError::Validation(err.to_string()))
}
