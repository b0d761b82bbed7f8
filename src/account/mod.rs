//! Account System Module
//!
//! This module implements the account state model with:
//! - Seeded username/password credentials
//! - Stateless bearer-token authentication
//! - Per-account balances with deposit and withdrawal

pub mod auth;
pub mod balance;
pub mod store;
pub mod types;

pub use auth::{AuthGate, Claims};
pub use balance::Ledger;
pub use store::CredentialStore;
pub use types::{AccountId, Amount, Credential, Receipt};

use rust_decimal::Decimal;

use crate::config::TellerConfig;
use crate::error::{AccountError, AuthError, ConfigError, Operation};

/// Everything a request handler needs: credentials, balances and the token gate.
pub struct Bank {
    credentials: CredentialStore,
    ledger: Ledger,
    gate: AuthGate,
}

impl Bank {
    pub fn from_config(config: &TellerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            credentials: CredentialStore::from_seed(&config.accounts)?,
            ledger: Ledger::from_seed(&config.accounts)?,
            gate: AuthGate::new(&config.auth.jwt_secret, config.auth.token_ttl_secs),
        })
    }

    pub fn login(&self, username: Option<&str>, password: Option<&str>) -> Result<String, AuthError> {
        self.credentials.login(&self.gate, username, password)
    }

    /// Resolve the acting identity from an `Authorization` header value.
    pub fn authenticate(&self, header: Option<&str>) -> Result<AccountId, AuthError> {
        self.gate.validate_token(header)
    }

    pub fn balance(&self, identity: &str) -> Result<Decimal, AccountError> {
        self.ledger.get_balance(identity)
    }

    pub fn deposit(
        &self,
        identity: &str,
        amount: Option<&serde_json::Value>,
    ) -> Result<Receipt, AccountError> {
        let amount = Amount::parse(amount, Operation::Deposit)?;
        self.ledger.deposit(identity, &amount)
    }

    pub fn withdraw(
        &self,
        identity: &str,
        amount: Option<&serde_json::Value>,
    ) -> Result<Receipt, AccountError> {
        let amount = Amount::parse(amount, Operation::Withdraw)?;
        self.ledger.withdraw(identity, &amount)
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}
