//! Credential storage and login

use std::collections::HashMap;
use tracing::{info, warn};

use super::auth::AuthGate;
use super::types::{AccountId, Credential};
use crate::config::SeedAccount;
use crate::error::{AuthError, ConfigError};

/// Credential store for all seeded users. Immutable after construction.
#[derive(Clone, Debug, Default)]
pub struct CredentialStore {
    credentials: HashMap<AccountId, Credential>,
}

impl CredentialStore {
    pub fn from_seed(seed: &[SeedAccount]) -> Result<Self, ConfigError> {
        let mut credentials = HashMap::with_capacity(seed.len());
        for entry in seed {
            let credential = Credential {
                username: entry.username.clone(),
                password: entry.password.clone(),
            };
            if credentials.insert(entry.username.clone(), credential).is_some() {
                return Err(ConfigError::DuplicateAccount(entry.username.clone()));
            }
        }
        Ok(Self { credentials })
    }

    /// Exact, case-sensitive password match.
    pub fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
        match self.credentials.get(username) {
            Some(credential) if credential.password == password => Ok(()),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Check credentials and hand out a bearer token for the user.
    pub fn login(
        &self,
        gate: &AuthGate,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<String, AuthError> {
        let (username, password) = match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
            _ => return Err(AuthError::MissingCredentials),
        };

        if let Err(e) = self.verify(username, password) {
            warn!(username = %username, "Login rejected");
            return Err(e);
        }

        let token = gate.issue_token(username)?;
        info!(username = %username, "Login successful");
        Ok(token)
    }

    pub fn usernames(&self) -> Vec<AccountId> {
        self.credentials.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}
