//! Account mutations.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use fincast_domain::{Account, AccountKind, Ledger};

use crate::CoreError;

pub struct AccountService;

impl AccountService {
    pub fn add(
        ledger: &mut Ledger,
        name: &str,
        kind: AccountKind,
        balance: Decimal,
    ) -> Result<Uuid, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::Validation("account name is required".into()));
        }
        Ok(ledger.add_account(Account::new(name.trim(), kind, balance)))
    }

    /// Manually sets a balance. Credit balances may be negative, so no sign
    /// check applies here; the edit counts as a sync.
    pub fn set_balance(ledger: &mut Ledger, id: Uuid, balance: Decimal) -> Result<(), CoreError> {
        let account = ledger
            .account_mut(id)
            .ok_or(CoreError::AccountNotFound(id))?;
        account.balance = balance;
        account.last_synced = Some(Utc::now());
        ledger.touch();
        Ok(())
    }

    pub fn rename(ledger: &mut Ledger, id: Uuid, name: &str) -> Result<(), CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::Validation("account name is required".into()));
        }
        let account = ledger
            .account_mut(id)
            .ok_or(CoreError::AccountNotFound(id))?;
        account.name = name.trim().to_string();
        ledger.touch();
        Ok(())
    }

    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<(), CoreError> {
        let before = ledger.accounts.len();
        ledger.accounts.retain(|account| account.id != id);
        if ledger.accounts.len() == before {
            return Err(CoreError::AccountNotFound(id));
        }
        ledger.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn manual_balance_edit_counts_as_sync() {
        let mut ledger = Ledger::new("Accounts");
        let id = AccountService::add(&mut ledger, "Checking", AccountKind::Checking, dec!(100))
            .unwrap();
        assert!(ledger.account(id).unwrap().last_synced.is_none());

        AccountService::set_balance(&mut ledger, id, dec!(-42.10)).unwrap();
        let account = ledger.account(id).unwrap();
        assert_eq!(account.balance, dec!(-42.10));
        assert!(account.last_synced.is_some());
    }

    #[test]
    fn operations_on_missing_accounts_fail() {
        let mut ledger = Ledger::new("Accounts");
        let ghost = Uuid::new_v4();
        assert!(matches!(
            AccountService::set_balance(&mut ledger, ghost, dec!(1)),
            Err(CoreError::AccountNotFound(_))
        ));
        assert!(matches!(
            AccountService::remove(&mut ledger, ghost),
            Err(CoreError::AccountNotFound(_))
        ));
    }
}
