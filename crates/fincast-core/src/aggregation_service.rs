//! Expense aggregation over date ranges.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;

use fincast_domain::{DateRange, DEFAULT_CATEGORY};

use crate::stores::LedgerReader;

/// Income and expense totals for one range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

/// Stateless aggregation over ledger snapshots.
pub struct AggregationService;

impl AggregationService {
    /// Sums expense amounts per category over the inclusive range. Categories
    /// with no matching transactions are omitted, not zero-filled.
    pub fn expense_by_category(
        reader: &impl LedgerReader,
        range: DateRange,
    ) -> BTreeMap<String, Decimal> {
        let mut breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
        for txn in reader.transactions_in_range(range) {
            if !txn.is_expense() {
                continue;
            }
            let category = match txn.category.as_deref() {
                Some(name) => name.to_string(),
                None => {
                    warn!("expense {} has no category, counting under {}", txn.id, DEFAULT_CATEGORY);
                    DEFAULT_CATEGORY.to_string()
                }
            };
            *breakdown.entry(category).or_insert(Decimal::ZERO) += txn.amount;
        }
        breakdown
    }

    /// Total income and expense over the inclusive range.
    pub fn totals(reader: &impl LedgerReader, range: DateRange) -> RangeTotals {
        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;
        for txn in reader.transactions_in_range(range) {
            if txn.is_income() {
                income += txn.amount;
            } else {
                expense += txn.amount;
            }
        }
        RangeTotals { income, expense }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fincast_domain::{Ledger, Transaction};
    use rust_decimal_macros::dec;

    fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::with_default_categories("Aggregation");
        ledger.add_transaction(Transaction::expense(
            dec!(100.00),
            sample_date(2024, 1, 5),
            "Food",
        ));
        ledger.add_transaction(Transaction::expense(
            dec!(50.00),
            sample_date(2024, 1, 20),
            "Food",
        ));
        ledger.add_transaction(Transaction::expense(
            dec!(80.00),
            sample_date(2024, 1, 31),
            "Transport",
        ));
        ledger.add_transaction(Transaction::income(
            dec!(1000.00),
            sample_date(2024, 1, 15),
            "Job",
        ));
        ledger.add_transaction(Transaction::expense(
            dec!(75.00),
            sample_date(2024, 2, 1),
            "Food",
        ));
        ledger
    }

    #[test]
    fn sums_only_expenses_in_inclusive_range() {
        let ledger = sample_ledger();
        let january = range(sample_date(2024, 1, 1), sample_date(2024, 1, 31));
        let breakdown = AggregationService::expense_by_category(&ledger, january);

        assert_eq!(breakdown["Food"], dec!(150.00));
        assert_eq!(breakdown["Transport"], dec!(80.00));
        assert_eq!(breakdown.len(), 2);
    }

    #[test]
    fn zero_activity_categories_are_omitted() {
        let ledger = sample_ledger();
        let january = range(sample_date(2024, 1, 1), sample_date(2024, 1, 31));
        let breakdown = AggregationService::expense_by_category(&ledger, january);
        assert!(!breakdown.contains_key("Housing"));
    }

    #[test]
    fn adjacent_ranges_sum_to_their_union() {
        let ledger = sample_ledger();
        let first = range(sample_date(2024, 1, 1), sample_date(2024, 1, 15));
        let second = range(sample_date(2024, 1, 16), sample_date(2024, 2, 29));
        let union = range(sample_date(2024, 1, 1), sample_date(2024, 2, 29));

        let mut combined = AggregationService::expense_by_category(&ledger, first);
        for (category, amount) in AggregationService::expense_by_category(&ledger, second) {
            *combined.entry(category).or_insert(Decimal::ZERO) += amount;
        }
        assert_eq!(combined, AggregationService::expense_by_category(&ledger, union));
    }

    #[test]
    fn totals_split_income_from_expense() {
        let ledger = sample_ledger();
        let january = range(sample_date(2024, 1, 1), sample_date(2024, 1, 31));
        let totals = AggregationService::totals(&ledger, january);
        assert_eq!(totals.income, dec!(1000.00));
        assert_eq!(totals.expense, dec!(230.00));
    }
}
