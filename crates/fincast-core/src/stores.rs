//! Collaborator contracts consumed by the computation services.
//!
//! Production deployments implement these against their persistence engine;
//! the in-memory [`Ledger`] snapshot implements them directly, which is also
//! what every test uses.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use fincast_domain::{
    Budget, Category, DateRange, Ledger, ManualIncome, MonthKey, Transaction,
};

use crate::CoreError;

/// Read-only view over stored transactions and account balances.
pub trait LedgerReader {
    /// All transactions whose calendar day falls inside the inclusive range.
    fn transactions_in_range(&self, range: DateRange) -> Vec<Transaction>;

    /// Like [`Self::transactions_in_range`], filtered to a single account.
    /// Fails with `AccountNotFound` when the account does not exist.
    fn transactions_for_account(
        &self,
        account_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<Transaction>, CoreError>;

    /// Current balance per account id.
    fn account_balances(&self) -> BTreeMap<Uuid, Decimal>;
}

/// Category and budget-limit storage.
pub trait CategoryStore {
    fn list_categories(&self) -> Vec<Category>;

    fn budgets_for_month(&self, month: MonthKey) -> Vec<Budget>;

    /// Sets or replaces the limit for (category, month). Rejects negative
    /// limits and unknown categories.
    fn upsert_budget(
        &mut self,
        category: &str,
        month: MonthKey,
        limit: Decimal,
    ) -> Result<(), CoreError>;

    /// Removes the limit for (category, month). Removing an absent row is a
    /// no-op; historical transactions are never touched.
    fn delete_budget(&mut self, category: &str, month: MonthKey) -> Result<(), CoreError>;
}

/// Manual income overrides, one row per month.
pub trait ManualIncomeStore {
    fn manual_income(&self, month: MonthKey) -> Option<Decimal>;

    fn set_manual_income(&mut self, month: MonthKey, amount: Decimal) -> Result<(), CoreError>;
}

impl LedgerReader for Ledger {
    fn transactions_in_range(&self, range: DateRange) -> Vec<Transaction> {
        self.transactions_in(range)
    }

    fn transactions_for_account(
        &self,
        account_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<Transaction>, CoreError> {
        if self.account(account_id).is_none() {
            return Err(CoreError::AccountNotFound(account_id));
        }
        Ok(self
            .transactions_in(range)
            .into_iter()
            .filter(|txn| txn.account_id == Some(account_id))
            .collect())
    }

    fn account_balances(&self) -> BTreeMap<Uuid, Decimal> {
        self.balances()
    }
}

impl CategoryStore for Ledger {
    fn list_categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    fn budgets_for_month(&self, month: MonthKey) -> Vec<Budget> {
        self.budgets_in_month(month).into_iter().cloned().collect()
    }

    fn upsert_budget(
        &mut self,
        category: &str,
        month: MonthKey,
        limit: Decimal,
    ) -> Result<(), CoreError> {
        if limit < Decimal::ZERO {
            return Err(CoreError::InvalidAmount(format!(
                "budget limit {} must not be negative",
                limit
            )));
        }
        if self.category_by_name(category).is_none() {
            return Err(CoreError::CategoryNotFound(category.to_string()));
        }
        match self
            .budgets
            .iter_mut()
            .find(|budget| budget.category == category && budget.month == month)
        {
            Some(existing) => existing.limit = limit,
            None => self.budgets.push(Budget {
                category: category.to_string(),
                month,
                limit,
            }),
        }
        self.touch();
        Ok(())
    }

    fn delete_budget(&mut self, category: &str, month: MonthKey) -> Result<(), CoreError> {
        let before = self.budgets.len();
        self.budgets
            .retain(|budget| !(budget.category == category && budget.month == month));
        if self.budgets.len() != before {
            self.touch();
        }
        Ok(())
    }
}

impl ManualIncomeStore for Ledger {
    fn manual_income(&self, month: MonthKey) -> Option<Decimal> {
        self.manual_income_for(month).map(|row| row.amount)
    }

    fn set_manual_income(&mut self, month: MonthKey, amount: Decimal) -> Result<(), CoreError> {
        if amount < Decimal::ZERO {
            return Err(CoreError::InvalidAmount(format!(
                "manual income {} must not be negative",
                amount
            )));
        }
        match self
            .manual_incomes
            .iter_mut()
            .find(|row| row.month == month)
        {
            Some(existing) => existing.amount = amount,
            None => self.manual_incomes.push(ManualIncome { month, amount }),
        }
        self.touch();
        Ok(())
    }
}
