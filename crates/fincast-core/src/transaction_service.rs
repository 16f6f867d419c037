//! Validated recording and editing of ledger transactions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use fincast_domain::{money, CategoryHint, Ledger, Transaction};

use crate::CoreError;

/// Mutation operations for [`Transaction`] entities. Amount validation lives
/// here, at the ledger boundary; the compute services trust recorded data.
pub struct TransactionService;

impl TransactionService {
    pub fn add_income(
        ledger: &mut Ledger,
        amount: Decimal,
        date: NaiveDate,
        source: impl Into<String>,
    ) -> Result<Uuid, CoreError> {
        Self::validate_amount(amount)?;
        Ok(ledger.add_transaction(Transaction::income(amount, date, source)))
    }

    pub fn add_expense(
        ledger: &mut Ledger,
        amount: Decimal,
        date: NaiveDate,
        category: &str,
        description: Option<String>,
    ) -> Result<Uuid, CoreError> {
        Self::validate_amount(amount)?;
        if ledger.category_by_name(category).is_none() {
            return Err(CoreError::CategoryNotFound(category.to_string()));
        }
        let mut txn = Transaction::expense(amount, date, category);
        if let Some(text) = description {
            Self::learn_hint(ledger, &text, category);
            txn.description = Some(text);
        }
        Ok(ledger.add_transaction(txn))
    }

    /// Reassigns an expense to another category and refreshes the learned
    /// hint for its description.
    pub fn recategorize(ledger: &mut Ledger, id: Uuid, category: &str) -> Result<(), CoreError> {
        if ledger.category_by_name(category).is_none() {
            return Err(CoreError::CategoryNotFound(category.to_string()));
        }
        let description = {
            let txn = ledger
                .transaction(id)
                .ok_or(CoreError::TransactionNotFound(id))?;
            if !txn.is_expense() {
                return Err(CoreError::Validation(
                    "only expenses carry a category".into(),
                ));
            }
            txn.description.clone()
        };
        if let Some(text) = description {
            Self::learn_hint(ledger, &text, category);
        }
        if let Some(txn) = ledger.transaction_mut(id) {
            txn.category = Some(category.to_string());
        }
        ledger.touch();
        Ok(())
    }

    /// Reassigns every listed expense to `category`, returning how many rows
    /// changed. Ids that do not resolve are skipped.
    pub fn bulk_recategorize(
        ledger: &mut Ledger,
        ids: &[Uuid],
        category: &str,
    ) -> Result<usize, CoreError> {
        if ledger.category_by_name(category).is_none() {
            return Err(CoreError::CategoryNotFound(category.to_string()));
        }
        let mut updated = 0usize;
        for id in ids {
            if let Some(txn) = ledger.transaction_mut(*id) {
                if txn.is_expense() {
                    txn.category = Some(category.to_string());
                    updated += 1;
                }
            }
        }
        if updated > 0 {
            ledger.touch();
        }
        Ok(updated)
    }

    pub fn set_amount(ledger: &mut Ledger, id: Uuid, amount: Decimal) -> Result<(), CoreError> {
        Self::validate_amount(amount)?;
        let txn = ledger
            .transaction_mut(id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        txn.amount = amount;
        ledger.touch();
        Ok(())
    }

    pub fn set_date(ledger: &mut Ledger, id: Uuid, date: NaiveDate) -> Result<(), CoreError> {
        let txn = ledger
            .transaction_mut(id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        txn.date = date;
        ledger.touch();
        Ok(())
    }

    pub fn set_description(
        ledger: &mut Ledger,
        id: Uuid,
        description: Option<String>,
    ) -> Result<(), CoreError> {
        let txn = ledger
            .transaction_mut(id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        txn.description = description;
        ledger.touch();
        Ok(())
    }

    fn validate_amount(amount: Decimal) -> Result<(), CoreError> {
        if amount < Decimal::ZERO {
            return Err(CoreError::InvalidAmount(format!(
                "amount {} must not be negative",
                amount
            )));
        }
        if !money::is_currency_precision(amount) {
            return Err(CoreError::InvalidAmount(format!(
                "amount {} carries sub-cent precision",
                amount
            )));
        }
        Ok(())
    }

    fn learn_hint(ledger: &mut Ledger, description: &str, category: &str) {
        let keyword = description.trim().to_lowercase();
        if keyword.is_empty() {
            return;
        }
        match ledger.hints.iter_mut().find(|hint| hint.keyword == keyword) {
            Some(hint) if hint.category == category => hint.count += 1,
            Some(hint) => {
                hint.category = category.to_string();
                hint.count = 1;
            }
            None => ledger.hints.push(CategoryHint::new(keyword, category)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_negative_and_subcent_amounts() {
        let mut ledger = Ledger::with_default_categories("Txns");
        let err = TransactionService::add_income(
            &mut ledger,
            dec!(-1),
            sample_date(2024, 1, 1),
            "Job",
        )
        .expect_err("negative");
        assert!(matches!(err, CoreError::InvalidAmount(_)));

        let err = TransactionService::add_expense(
            &mut ledger,
            dec!(1.005),
            sample_date(2024, 1, 1),
            "Food",
            None,
        )
        .expect_err("sub-cent");
        assert!(matches!(err, CoreError::InvalidAmount(_)));
        assert_eq!(ledger.transaction_count(), 0);
    }

    #[test]
    fn expense_requires_known_category() {
        let mut ledger = Ledger::with_default_categories("Txns");
        let err = TransactionService::add_expense(
            &mut ledger,
            dec!(10),
            sample_date(2024, 1, 1),
            "Spaceships",
            None,
        )
        .expect_err("unknown category");
        assert!(matches!(err, CoreError::CategoryNotFound(_)));
    }

    #[test]
    fn descriptions_build_hints_and_recategorize_updates_them() {
        let mut ledger = Ledger::with_default_categories("Txns");
        let id = TransactionService::add_expense(
            &mut ledger,
            dec!(12.50),
            sample_date(2024, 1, 3),
            "Food",
            Some("Corner Deli".into()),
        )
        .unwrap();
        assert_eq!(ledger.hint_for("corner deli").unwrap().category, "Food");

        TransactionService::add_expense(
            &mut ledger,
            dec!(9.00),
            sample_date(2024, 1, 10),
            "Food",
            Some("Corner Deli".into()),
        )
        .unwrap();
        assert_eq!(ledger.hint_for("corner deli").unwrap().count, 2);

        TransactionService::recategorize(&mut ledger, id, "Entertainment").unwrap();
        let hint = ledger.hint_for("corner deli").unwrap();
        assert_eq!(hint.category, "Entertainment");
        assert_eq!(hint.count, 1);
        assert_eq!(
            ledger.transaction(id).unwrap().category.as_deref(),
            Some("Entertainment")
        );
    }

    #[test]
    fn bulk_recategorize_skips_unknown_ids() {
        let mut ledger = Ledger::with_default_categories("Txns");
        let a = TransactionService::add_expense(
            &mut ledger,
            dec!(5),
            sample_date(2024, 1, 1),
            "Food",
            None,
        )
        .unwrap();
        let b = TransactionService::add_expense(
            &mut ledger,
            dec!(6),
            sample_date(2024, 1, 2),
            "Food",
            None,
        )
        .unwrap();

        let updated = TransactionService::bulk_recategorize(
            &mut ledger,
            &[a, b, Uuid::new_v4()],
            "Shopping",
        )
        .unwrap();
        assert_eq!(updated, 2);
        assert!(ledger
            .transactions
            .iter()
            .all(|txn| txn.category.as_deref() == Some("Shopping")));
    }
}
