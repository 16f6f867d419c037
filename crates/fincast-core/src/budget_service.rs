//! Budget status: spent vs. limit per category, with burn-rate pacing.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use fincast_domain::{DateRange, MonthKey};

use crate::{
    aggregation_service::AggregationService,
    stores::{CategoryStore, LedgerReader},
};

/// Fixed pacing threshold: spending progress must drift more than this from
/// month progress before a category is flagged off-pace. Strict inequality on
/// both sides.
pub const PACE_THRESHOLD: Decimal = dec!(0.10);

/// Stand-in for an infinite percentage when a zero limit has spending
/// against it. Saturated rather than raised as an error.
pub const SATURATED_PERCENT: Decimal = dec!(99999.99);

/// How spending tracks against elapsed time in the month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaceStatus {
    OverPace,
    UnderPace,
    OnTrack,
}

impl fmt::Display for PaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaceStatus::OverPace => "Over Pace",
            PaceStatus::UnderPace => "Under Pace",
            PaceStatus::OnTrack => "On Track",
        };
        f.write_str(label)
    }
}

/// Spending status for one budgeted category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBudgetStatus {
    pub category: String,
    pub spent: Decimal,
    pub budget: Decimal,
    pub percent: Decimal,
    pub remaining: Decimal,
    pub pace: PaceStatus,
}

/// Per-category statuses plus month totals. Only categories with a stored
/// budget row appear; raw aggregation serves unbudgeted dashboards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetStatusReport {
    pub month: MonthKey,
    pub categories: Vec<CategoryBudgetStatus>,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
}

/// Stateless budget evaluation over ledger snapshots.
pub struct BudgetService;

impl BudgetService {
    /// Builds the status report for `month` as of `today`. Pure read; calling
    /// twice with no intervening writes yields identical output.
    pub fn month_status(
        reader: &impl LedgerReader,
        store: &impl CategoryStore,
        month: MonthKey,
        today: NaiveDate,
    ) -> BudgetStatusReport {
        let spent_by_category =
            AggregationService::expense_by_category(reader, DateRange::month(month));
        let month_progress = Self::month_progress(month, today);

        let mut categories: Vec<CategoryBudgetStatus> = Vec::new();
        let mut total_budget = Decimal::ZERO;
        let mut total_spent = Decimal::ZERO;
        for budget in store.budgets_for_month(month) {
            let spent = spent_by_category
                .get(&budget.category)
                .copied()
                .unwrap_or(Decimal::ZERO);
            total_budget += budget.limit;
            total_spent += spent;
            categories.push(CategoryBudgetStatus {
                pace: Self::classify(spent, budget.limit, month_progress),
                percent: Self::percent_used(spent, budget.limit),
                remaining: budget.limit - spent,
                category: budget.category,
                spent,
                budget: budget.limit,
            });
        }
        categories.sort_by(|a, b| a.category.cmp(&b.category));

        BudgetStatusReport {
            month,
            categories,
            total_budget,
            total_spent,
        }
    }

    /// Fraction of the queried month elapsed as of `today`: a full month for
    /// past months, zero for future months, `today`'s day within the current
    /// month. Pacing is only meaningful for the current month; the caller
    /// decides when to surface it.
    pub fn month_progress(month: MonthKey, today: NaiveDate) -> Decimal {
        let current = MonthKey::containing(today);
        let elapsed_days = if month < current {
            month.days_in_month()
        } else if month > current {
            0
        } else {
            today.day()
        };
        Decimal::from(elapsed_days) / Decimal::from(month.days_in_month())
    }

    /// Percent of the limit consumed. 0/0 is zero; spending against a zero
    /// limit saturates to [`SATURATED_PERCENT`] instead of raising.
    pub fn percent_used(spent: Decimal, limit: Decimal) -> Decimal {
        if limit > Decimal::ZERO {
            spent / limit * dec!(100)
        } else if spent > Decimal::ZERO {
            SATURATED_PERCENT
        } else {
            Decimal::ZERO
        }
    }

    fn classify(spent: Decimal, limit: Decimal, month_progress: Decimal) -> PaceStatus {
        let spending_progress = if limit > Decimal::ZERO {
            spent / limit
        } else if spent > Decimal::ZERO {
            SATURATED_PERCENT / dec!(100)
        } else {
            Decimal::ZERO
        };
        let diff = spending_progress - month_progress;
        if diff > PACE_THRESHOLD {
            PaceStatus::OverPace
        } else if diff < -PACE_THRESHOLD && spending_progress > Decimal::ZERO {
            PaceStatus::UnderPace
        } else {
            PaceStatus::OnTrack
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn percent_saturates_on_zero_limit() {
        assert_eq!(BudgetService::percent_used(dec!(0), dec!(0)), dec!(0));
        assert_eq!(
            BudgetService::percent_used(dec!(10), dec!(0)),
            SATURATED_PERCENT
        );
        assert_eq!(BudgetService::percent_used(dec!(50), dec!(200)), dec!(25));
    }

    #[test]
    fn month_progress_clamps_outside_current_month() {
        let today = sample_date(2024, 3, 10);
        let january: MonthKey = "2024-01".parse().unwrap();
        let march: MonthKey = "2024-03".parse().unwrap();
        let june: MonthKey = "2024-06".parse().unwrap();

        assert_eq!(BudgetService::month_progress(january, today), dec!(1));
        assert_eq!(BudgetService::month_progress(june, today), dec!(0));
        assert_eq!(
            BudgetService::month_progress(march, today),
            Decimal::from(10) / Decimal::from(31)
        );
    }

    #[test]
    fn exact_threshold_is_on_track() {
        // 30-day month, day 15 elapsed: month progress 0.5. A spending
        // progress of 0.6 puts the diff at exactly the threshold.
        let diff_at_threshold =
            BudgetService::classify(dec!(60), dec!(100), dec!(0.50));
        assert_eq!(diff_at_threshold, PaceStatus::OnTrack);

        let just_over = BudgetService::classify(dec!(60.01), dec!(100), dec!(0.50));
        assert_eq!(just_over, PaceStatus::OverPace);
    }

    #[test]
    fn under_pace_requires_some_spending() {
        let untouched = BudgetService::classify(dec!(0), dec!(100), dec!(0.50));
        assert_eq!(untouched, PaceStatus::OnTrack);

        let trickle = BudgetService::classify(dec!(5), dec!(100), dec!(0.50));
        assert_eq!(trickle, PaceStatus::UnderPace);
    }
}
