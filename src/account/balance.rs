//! Balance tracking with per-account locking

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use super::types::{AccountId, Amount, Receipt};
use crate::config::SeedAccount;
use crate::error::{AccountError, ConfigError};

/// Balance store for all accounts.
///
/// The set of accounts is fixed once seeded; each balance sits behind its
/// own mutex so a read-check-write on one account never interleaves with
/// another mutation of the same account.
#[derive(Debug, Default)]
pub struct Ledger {
    balances: HashMap<AccountId, Mutex<Decimal>>,
}

impl Ledger {
    pub fn from_seed(seed: &[SeedAccount]) -> Result<Self, ConfigError> {
        let mut balances = HashMap::with_capacity(seed.len());
        for entry in seed {
            if balances
                .insert(entry.username.clone(), Mutex::new(entry.balance))
                .is_some()
            {
                return Err(ConfigError::DuplicateAccount(entry.username.clone()));
            }
        }
        Ok(Self { balances })
    }

    /// Recovers nothing: a poisoned account stays unavailable.
    fn lock(&self, account: &str) -> Result<MutexGuard<'_, Decimal>, AccountError> {
        let slot = self
            .balances
            .get(account)
            .ok_or_else(|| AccountError::UnknownAccount(account.to_string()))?;
        slot.lock().map_err(|e| {
            tracing::error!("Mutex poisoned: {}", e);
            AccountError::LockPoisoned(account.to_string())
        })
    }

    pub fn get_balance(&self, account: &str) -> Result<Decimal, AccountError> {
        Ok(*self.lock(account)?)
    }

    /// Credit (add) an amount to an account.
    pub fn deposit(&self, account: &str, amount: &Amount) -> Result<Receipt, AccountError> {
        let mut balance = self.lock(account)?;
        let new_balance = amount
            .value()
            .and_then(|value| balance.checked_add(value))
            .ok_or(AccountError::Overflow)?;
        *balance = new_balance;
        drop(balance);

        info!(account = %account, amount = %amount.as_str(), balance = %new_balance, "Deposit");
        Ok(Receipt::deposited(amount, new_balance))
    }

    /// Debit (subtract) an amount; the full balance may be withdrawn.
    pub fn withdraw(&self, account: &str, amount: &Amount) -> Result<Receipt, AccountError> {
        let mut balance = self.lock(account)?;
        let value = match amount.value() {
            Some(value) if value <= *balance => value,
            _ => {
                debug!(account = %account, amount = %amount.as_str(), "Insufficient balance");
                return Err(AccountError::InsufficientBalance);
            }
        };
        let new_balance = *balance - value;
        *balance = new_balance;
        drop(balance);

        info!(account = %account, amount = %amount.as_str(), balance = %new_balance, "Withdrawal");
        Ok(Receipt::withdrew(amount, new_balance))
    }

    pub fn contains(&self, account: &str) -> bool {
        self.balances.contains_key(account)
    }

    /// Get number of accounts
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }
}
