//! Ledger aggregate: the consistent snapshot every computation reads from.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    account::Account,
    category::{Category, CategoryHint, SEED_CATEGORIES},
    common::{DateRange, MonthKey},
    goal::Goal,
    transaction::Transaction,
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// A spending limit for one category in one month. Keyed by
/// (category, month); at most one row per key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub category: String,
    pub month: MonthKey,
    pub limit: Decimal,
}

/// A user-supplied income figure that overrides the computed projection for
/// its month only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManualIncome {
    pub month: MonthKey,
    pub amount: Decimal,
}

/// The full in-memory snapshot: accounts, categories, transactions, budgets,
/// manual incomes, goals, and categorization hints. Services mutate it
/// through validated operations; computations only read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub manual_incomes: Vec<ManualIncome>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub hints: Vec<CategoryHint>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            accounts: Vec::new(),
            categories: Vec::new(),
            transactions: Vec::new(),
            budgets: Vec::new(),
            manual_incomes: Vec::new(),
            goals: Vec::new(),
            hints: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Creates a ledger pre-populated with the seed categories.
    pub fn with_default_categories(name: impl Into<String>) -> Self {
        let mut ledger = Self::new(name);
        for name in SEED_CATEGORIES {
            ledger.categories.push(Category::new(name));
        }
        ledger
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn add_goal(&mut self, goal: Goal) -> Uuid {
        let id = goal.id;
        self.goals.push(goal);
        self.touch();
        id
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn goal(&self, id: Uuid) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn goal_mut(&mut self, id: Uuid) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|goal| goal.id == id)
    }

    pub fn budget_for(&self, category: &str, month: MonthKey) -> Option<&Budget> {
        self.budgets
            .iter()
            .find(|budget| budget.category == category && budget.month == month)
    }

    pub fn budgets_in_month(&self, month: MonthKey) -> Vec<&Budget> {
        self.budgets
            .iter()
            .filter(|budget| budget.month == month)
            .collect()
    }

    pub fn manual_income_for(&self, month: MonthKey) -> Option<&ManualIncome> {
        self.manual_incomes.iter().find(|row| row.month == month)
    }

    pub fn hint_for(&self, keyword: &str) -> Option<&CategoryHint> {
        self.hints.iter().find(|hint| hint.keyword == keyword)
    }

    /// All transactions whose calendar day falls inside the inclusive range.
    pub fn transactions_in(&self, range: DateRange) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|txn| range.contains(txn.date))
            .cloned()
            .collect()
    }

    /// Current balance per account id.
    pub fn balances(&self) -> BTreeMap<Uuid, Decimal> {
        self.accounts
            .iter()
            .map(|account| (account.id, account.balance))
            .collect()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
