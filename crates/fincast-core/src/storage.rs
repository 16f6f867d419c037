use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use fincast_domain::Ledger;

use crate::CoreError;

/// Describes a persisted backup artifact for a ledger snapshot.
#[derive(Debug, Clone)]
pub struct LedgerBackupInfo {
    pub ledger: String,
    pub id: String,
    pub created_at: String,
    pub path: PathBuf,
}

/// Abstraction over persistence backends capable of storing snapshots and
/// backups. The engine itself never blocks on I/O; callers load a snapshot
/// through this seam and hand it to the computation services.
pub trait LedgerStorage: Send + Sync {
    fn save_ledger(&self, name: &str, ledger: &Ledger) -> Result<(), CoreError>;
    fn load_ledger(&self, name: &str) -> Result<Ledger, CoreError>;
    fn list_ledgers(&self) -> Result<Vec<String>, CoreError>;
    fn delete_ledger(&self, name: &str) -> Result<(), CoreError>;
    fn save_ledger_to_path(&self, ledger: &Ledger, path: &Path) -> Result<(), CoreError>;
    fn load_ledger_from_path(&self, path: &Path) -> Result<Ledger, CoreError>;
    fn backup_ledger(
        &self,
        name: &str,
        ledger: &Ledger,
        note: Option<&str>,
    ) -> Result<LedgerBackupInfo, CoreError>;
    fn list_backups(&self, name: &str) -> Result<Vec<LedgerBackupInfo>, CoreError>;
    fn restore_backup(&self, backup: &LedgerBackupInfo) -> Result<Ledger, CoreError>;
}

/// Detects dangling references and other anomalies within a snapshot.
pub fn ledger_warnings(ledger: &Ledger) -> Vec<String> {
    let account_ids: HashSet<_> = ledger.accounts.iter().map(|a| a.id).collect();
    let category_names: HashSet<&str> =
        ledger.categories.iter().map(|c| c.name.as_str()).collect();
    let mut warnings = Vec::new();

    for txn in &ledger.transactions {
        if let Some(account) = txn.account_id {
            if !account_ids.contains(&account) {
                warnings.push(format!(
                    "transaction {} references unknown account {}",
                    txn.id, account
                ));
            }
        }
        match txn.category.as_deref() {
            Some(name) if !category_names.contains(name) => warnings.push(format!(
                "transaction {} references missing category `{}`",
                txn.id, name
            )),
            None if txn.is_expense() => {
                warnings.push(format!("expense {} has no category", txn.id))
            }
            _ => {}
        }
    }
    for budget in &ledger.budgets {
        if !category_names.contains(budget.category.as_str()) {
            warnings.push(format!(
                "budget {}/{} references missing category",
                budget.category, budget.month
            ));
        }
    }
    for hint in &ledger.hints {
        if !category_names.contains(hint.category.as_str()) {
            warnings.push(format!(
                "hint `{}` references missing category `{}`",
                hint.keyword, hint.category
            ));
        }
    }
    warnings
}
