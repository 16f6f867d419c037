//! Monthly income projection: manual override or trailing-months average.

use rust_decimal::Decimal;

use fincast_domain::{DateRange, MonthKey};

use crate::{
    aggregation_service::AggregationService,
    stores::{LedgerReader, ManualIncomeStore},
};

/// How many completed months the suggested projection looks back over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionSettings {
    pub trailing_months: u32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self { trailing_months: 3 }
    }
}

/// The projected income for one month and how it was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeProjection {
    pub projected_income: Decimal,
    pub is_manual: bool,
    pub months_analyzed: u32,
}

pub struct IncomeService;

impl IncomeService {
    /// Projects income for `month`. A stored manual override wins outright;
    /// otherwise the projection averages income totals over the trailing
    /// `trailing_months` completed months, skipping months without any income
    /// transaction. With no contributing months the projection is zero.
    pub fn project(
        reader: &impl LedgerReader,
        incomes: &impl ManualIncomeStore,
        month: MonthKey,
        settings: &ProjectionSettings,
    ) -> IncomeProjection {
        if let Some(amount) = incomes.manual_income(month) {
            return IncomeProjection {
                projected_income: amount,
                is_manual: true,
                months_analyzed: 0,
            };
        }

        let mut cursor = month.prev();
        let mut total = Decimal::ZERO;
        let mut contributing = 0u32;
        for _ in 0..settings.trailing_months {
            let window = DateRange::month(cursor);
            let has_income = reader
                .transactions_in_range(window)
                .iter()
                .any(|txn| txn.is_income());
            if has_income {
                total += AggregationService::totals(reader, window).income;
                contributing += 1;
            }
            cursor = cursor.prev();
        }

        let projected = if contributing == 0 {
            Decimal::ZERO
        } else {
            total / Decimal::from(contributing)
        };
        IncomeProjection {
            projected_income: projected,
            is_manual: false,
            months_analyzed: contributing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fincast_domain::{Ledger, Transaction};
    use rust_decimal_macros::dec;

    fn month(raw: &str) -> MonthKey {
        raw.parse().unwrap()
    }

    fn income(ledger: &mut Ledger, amount: Decimal, y: i32, m: u32, d: u32) {
        ledger.add_transaction(Transaction::income(
            amount,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            "Job",
        ));
    }

    #[test]
    fn averages_trailing_months_with_data() {
        let mut ledger = Ledger::new("Projection");
        income(&mut ledger, dec!(1000), 2024, 1, 15);
        income(&mut ledger, dec!(1200), 2024, 2, 15);
        income(&mut ledger, dec!(1100), 2024, 3, 15);

        let projection = IncomeService::project(
            &ledger,
            &ledger,
            month("2024-04"),
            &ProjectionSettings::default(),
        );
        assert_eq!(projection.projected_income, dec!(1100));
        assert!(!projection.is_manual);
        assert_eq!(projection.months_analyzed, 3);
    }

    #[test]
    fn skips_empty_months_inside_the_window() {
        let mut ledger = Ledger::new("Projection");
        // February has no income at all.
        income(&mut ledger, dec!(900), 2024, 1, 10);
        income(&mut ledger, dec!(1100), 2024, 3, 10);

        let projection = IncomeService::project(
            &ledger,
            &ledger,
            month("2024-04"),
            &ProjectionSettings::default(),
        );
        assert_eq!(projection.projected_income, dec!(1000));
        assert_eq!(projection.months_analyzed, 2);
    }

    #[test]
    fn no_history_projects_zero() {
        let ledger = Ledger::new("Projection");
        let projection = IncomeService::project(
            &ledger,
            &ledger,
            month("2024-04"),
            &ProjectionSettings::default(),
        );
        assert_eq!(projection.projected_income, Decimal::ZERO);
        assert_eq!(projection.months_analyzed, 0);
        assert!(!projection.is_manual);
    }

    #[test]
    fn manual_override_wins_over_history() {
        let mut ledger = Ledger::new("Projection");
        income(&mut ledger, dec!(1000), 2024, 1, 15);
        income(&mut ledger, dec!(1000), 2024, 2, 15);
        ledger
            .set_manual_income(month("2024-04"), dec!(2500))
            .unwrap();

        let projection = IncomeService::project(
            &ledger,
            &ledger,
            month("2024-04"),
            &ProjectionSettings::default(),
        );
        assert!(projection.is_manual);
        assert_eq!(projection.projected_income, dec!(2500));
        assert_eq!(projection.months_analyzed, 0);
    }

    #[test]
    fn income_outside_the_window_is_ignored() {
        let mut ledger = Ledger::new("Projection");
        income(&mut ledger, dec!(5000), 2023, 6, 15);

        let projection = IncomeService::project(
            &ledger,
            &ledger,
            month("2024-04"),
            &ProjectionSettings::default(),
        );
        assert_eq!(projection.projected_income, Decimal::ZERO);
        assert_eq!(projection.months_analyzed, 0);
    }
}
