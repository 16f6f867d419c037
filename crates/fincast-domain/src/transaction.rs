//! Domain models for ledger transactions.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recorded movement of money. Immutable once recorded except for
/// category reassignment and user edits routed through the transaction service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    /// Required for expenses, absent for income.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Income label, e.g. the payer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Expense memo; feeds categorization hints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    /// Stable dedup key assigned by sync/import collaborators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl Transaction {
    pub fn income(amount: Decimal, date: NaiveDate, source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: TransactionKind::Income,
            amount,
            date,
            category: None,
            source: Some(source.into()),
            description: None,
            account_id: None,
            external_id: None,
        }
    }

    pub fn expense(amount: Decimal, date: NaiveDate, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: TransactionKind::Expense,
            amount,
            date,
            category: Some(category.into()),
            source: None,
            description: None,
            account_id: None,
            external_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_account(mut self, account_id: Uuid) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// Whether a transaction adds to or draws from the balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}
