//! Cash-flow forecasting: lookback rates and a linear balance projection.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fincast_domain::DateRange;

use crate::{aggregation_service::AggregationService, stores::LedgerReader};

/// Lookback and horizon knobs for the forecaster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForecastSettings {
    /// Trailing days used to estimate daily rates, ending at the reference
    /// date inclusive.
    pub lookback_days: u32,
    /// Days projected forward from the reference date.
    pub horizon_days: u32,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            horizon_days: 90,
        }
    }
}

/// One projected day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectionPoint {
    pub date: NaiveDate,
    pub balance: Decimal,
}

/// Forecast output: current position, estimated daily rates, and the
/// baseline projection. Scenario deltas ("cut spending 10%") are caller-side
/// arithmetic over the returned rates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Forecast {
    pub current_balance: Decimal,
    pub daily_burn: Decimal,
    pub daily_income: Decimal,
    pub projection: Vec<ProjectionPoint>,
}

pub struct ForecastService;

impl ForecastService {
    /// Projects the combined account balance forward day by day from `today`.
    /// Deterministic and linear: `balance[d] = balance[0] + d * (daily_income
    /// - daily_burn)`. An empty lookback window yields zero rates and a flat
    /// line.
    pub fn forecast(
        reader: &impl LedgerReader,
        today: NaiveDate,
        settings: &ForecastSettings,
    ) -> Forecast {
        let (daily_income, daily_burn) = Self::daily_rates(reader, today, settings.lookback_days);
        let current_balance: Decimal = reader.account_balances().values().copied().sum();

        let net = daily_income - daily_burn;
        let mut projection = Vec::with_capacity(settings.horizon_days as usize + 1);
        let mut balance = current_balance;
        for offset in 0..=settings.horizon_days {
            projection.push(ProjectionPoint {
                date: today + Duration::days(offset as i64),
                balance,
            });
            balance += net;
        }

        Forecast {
            current_balance,
            daily_burn,
            daily_income,
            projection,
        }
    }

    /// Average income and expense per day over the trailing window ending at
    /// `today` inclusive. A zero-length window has no slope.
    pub fn daily_rates(
        reader: &impl LedgerReader,
        today: NaiveDate,
        lookback_days: u32,
    ) -> (Decimal, Decimal) {
        if lookback_days == 0 {
            return (Decimal::ZERO, Decimal::ZERO);
        }
        let window = DateRange::trailing(today, lookback_days);
        let totals = AggregationService::totals(reader, window);
        let days = Decimal::from(lookback_days);
        (totals.income / days, totals.expense / days)
    }
}
