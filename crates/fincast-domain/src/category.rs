//! Domain types for expense categories and categorization hints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the fallback category. It always exists and cannot be deleted;
/// removing any other category reassigns its references here.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Categories seeded for a fresh ledger.
pub const SEED_CATEGORIES: [&str; 8] = [
    "Housing",
    "Food",
    "Transport",
    "Utilities",
    "Entertainment",
    "Shopping",
    "Healthcare",
    DEFAULT_CATEGORY,
];

/// Groups expense activity for budgeting and reporting. Names are unique and
/// case-sensitive; renaming preserves the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub is_default: bool,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let is_default = name == DEFAULT_CATEGORY;
        Self {
            id: Uuid::new_v4(),
            name,
            is_default,
        }
    }
}

/// A learned description→category pattern used for suggestions. `count`
/// tracks how often the mapping was confirmed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryHint {
    pub keyword: String,
    pub category: String,
    pub count: u32,
}

impl CategoryHint {
    pub fn new(keyword: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            category: category.into(),
            count: 1,
        }
    }
}
