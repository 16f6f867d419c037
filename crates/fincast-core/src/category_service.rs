//! Category lifecycle: creation, rename/delete cascades, and suggestions.

use std::fmt;

use uuid::Uuid;

use fincast_domain::{Category, Ledger, DEFAULT_CATEGORY, SEED_CATEGORIES};

use crate::CoreError;

/// How strongly a suggestion matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionConfidence {
    /// Exact keyword match.
    High,
    /// Substring overlap between keyword and description.
    Medium,
}

impl fmt::Display for SuggestionConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SuggestionConfidence::High => "high",
            SuggestionConfidence::Medium => "medium",
        };
        f.write_str(label)
    }
}

/// A suggested category for a free-text description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySuggestion {
    pub category: String,
    pub confidence: SuggestionConfidence,
}

/// Validated operations for [`Category`] entities. Rename and delete cascade
/// through transactions, budgets, and hints within the same snapshot
/// mutation, so a dangling category reference is never observable.
pub struct CategoryService;

impl CategoryService {
    /// Seeds the default category set when the ledger has none.
    pub fn seed_defaults(ledger: &mut Ledger) {
        if !ledger.categories.is_empty() {
            return;
        }
        for name in SEED_CATEGORIES {
            ledger.categories.push(Category::new(name));
        }
        ledger.touch();
    }

    /// Adds a category with a unique, non-empty name.
    pub fn add(ledger: &mut Ledger, name: &str) -> Result<Uuid, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("category name is required".into()));
        }
        if ledger.category_by_name(name).is_some() {
            return Err(CoreError::Validation(format!(
                "category `{}` already exists",
                name
            )));
        }
        Ok(ledger.add_category(Category::new(name)))
    }

    /// Renames a category in place, cascading to transactions, budgets, and
    /// hints. The id is preserved.
    pub fn rename(ledger: &mut Ledger, id: Uuid, new_name: &str) -> Result<(), CoreError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(CoreError::Validation("category name is required".into()));
        }
        let old_name = match ledger.category(id) {
            Some(category) => category.name.clone(),
            None => return Err(CoreError::CategoryNotFound(id.to_string())),
        };
        if old_name == new_name {
            return Ok(());
        }
        if ledger.category_by_name(new_name).is_some() {
            return Err(CoreError::Validation(format!(
                "category `{}` already exists",
                new_name
            )));
        }

        Self::reassign_references(ledger, &old_name, new_name);
        if let Some(category) = ledger.categories.iter_mut().find(|c| c.id == id) {
            category.name = new_name.to_string();
            category.is_default = new_name == DEFAULT_CATEGORY;
        }
        ledger.touch();
        Ok(())
    }

    /// Deletes a category, reassigning every reference to the default
    /// category in the same mutation. The default category is undeletable.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<(), CoreError> {
        let name = match ledger.category(id) {
            Some(category) => category.name.clone(),
            None => return Err(CoreError::CategoryNotFound(id.to_string())),
        };
        if name == DEFAULT_CATEGORY {
            return Err(CoreError::Validation(format!(
                "the `{}` category cannot be deleted",
                DEFAULT_CATEGORY
            )));
        }
        if ledger.category_by_name(DEFAULT_CATEGORY).is_none() {
            ledger.categories.push(Category::new(DEFAULT_CATEGORY));
        }

        Self::reassign_references(ledger, &name, DEFAULT_CATEGORY);
        ledger.categories.retain(|category| category.id != id);
        ledger.touch();
        Ok(())
    }

    /// Suggests a category for a description from learned hints: an exact
    /// keyword match first, then a substring overlap in either direction.
    pub fn suggest(ledger: &Ledger, description: &str) -> Option<CategorySuggestion> {
        let needle = description.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        if let Some(hint) = ledger.hint_for(&needle) {
            return Some(CategorySuggestion {
                category: hint.category.clone(),
                confidence: SuggestionConfidence::High,
            });
        }
        ledger
            .hints
            .iter()
            .find(|hint| needle.contains(&hint.keyword) || hint.keyword.contains(&needle))
            .map(|hint| CategorySuggestion {
                category: hint.category.clone(),
                confidence: SuggestionConfidence::Medium,
            })
    }

    pub fn list(ledger: &Ledger) -> Vec<&Category> {
        ledger.categories.iter().collect()
    }

    fn reassign_references(ledger: &mut Ledger, from: &str, to: &str) {
        for txn in ledger
            .transactions
            .iter_mut()
            .filter(|txn| txn.category.as_deref() == Some(from))
        {
            txn.category = Some(to.to_string());
        }
        for budget in ledger
            .budgets
            .iter_mut()
            .filter(|budget| budget.category == from)
        {
            budget.category = to.to_string();
        }
        for hint in ledger.hints.iter_mut().filter(|hint| hint.category == from) {
            hint.category = to.to_string();
        }
    }
}
