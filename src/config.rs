use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ConfigError;

/// Environment variable that overrides `auth.jwt_secret`.
pub const JWT_SECRET_ENV: &str = "TELLER_JWT_SECRET";

/// Longest token lifetime accepted in `[auth] token_ttl_secs` (one year).
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TellerConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default = "default_accounts")]
    pub accounts: Vec<SeedAccount>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
}

/// One credential plus its opening balance.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SeedAccount {
    pub username: String,
    pub password: String,
    pub balance: Decimal,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_token_ttl_secs() -> i64 {
    3600
}

fn default_accounts() -> Vec<SeedAccount> {
    vec![SeedAccount {
        username: "user1".to_string(),
        password: "password123".to_string(),
        balance: Decimal::from(1000),
    }]
}

impl Default for TellerConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_addr: default_bind_addr(),
                port: 3000,
                log_level: default_log_level(),
            },
            auth: AuthConfig {
                jwt_secret: "yourSuperSecretKeyForThisExercise".to_string(),
                token_ttl_secs: default_token_ttl_secs(),
            },
            accounts: default_accounts(),
        }
    }
}

impl TellerConfig {
    /// Parse and validate a config file.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: &str) -> Self {
        let config = if std::path::Path::new(path).exists() {
            match Self::load(path) {
                Ok(c) => {
                    println!("Config loaded from {}", path);
                    c
                }
                Err(e) => {
                    eprintln!("{}. Using Defaults.", e);
                    Self::default()
                }
            }
        } else {
            println!("Config file not found at '{}'. Creating default.", path);
            let config = Self::default();
            if let Ok(s) = toml::to_string_pretty(&config) {
                let _ = std::fs::write(path, s);
            }
            config
        };
        config.with_env_overrides()
    }

    /// Seed usernames must be unique; accounts and credentials share them as keys.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ttl = self.auth.token_ttl_secs;
        if ttl <= 0 || ttl > MAX_TOKEN_TTL_SECS {
            return Err(ConfigError::InvalidTokenTtl(ttl));
        }
        let mut seen = HashSet::new();
        for account in &self.accounts {
            if !seen.insert(account.username.as_str()) {
                return Err(ConfigError::DuplicateAccount(account.username.clone()));
            }
        }
        Ok(())
    }

    pub fn with_env_overrides(self) -> Self {
        match std::env::var(JWT_SECRET_ENV) {
            Ok(secret) if !secret.is_empty() => self.with_jwt_secret(secret),
            _ => self,
        }
    }

    pub fn with_jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.auth.jwt_secret = secret.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }

    pub fn with_token_ttl_secs(mut self, secs: i64) -> Self {
        self.auth.token_ttl_secs = secs;
        self
    }

    pub fn with_accounts(mut self, accounts: Vec<SeedAccount>) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.bind_addr, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let cfg = TellerConfig::default();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.auth.token_ttl_secs, 3600);
        assert_eq!(cfg.accounts.len(), 1);
        assert_eq!(cfg.accounts[0].username, "user1");
        assert_eq!(cfg.accounts[0].balance, Decimal::from(1000));
        assert_eq!(cfg.listen_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_builder_pattern() {
        let cfg = TellerConfig::default()
            .with_jwt_secret("my-secret")
            .with_port(8080)
            .with_token_ttl_secs(60);

        assert_eq!(cfg.auth.jwt_secret, "my-secret");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.auth.token_ttl_secs, 60);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("teller.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 4000

[auth]
jwt_secret = "file-secret"

[[accounts]]
username = "alice"
password = "pw"
balance = 12.5

[[accounts]]
username = "bob"
password = "pw2"
balance = 0
"#,
        )
        .unwrap();

        let cfg = TellerConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.server.bind_addr, "0.0.0.0");
        assert_eq!(cfg.auth.jwt_secret, "file-secret");
        assert_eq!(cfg.auth.token_ttl_secs, 3600);
        assert_eq!(cfg.accounts.len(), 2);
        assert_eq!(cfg.accounts[0].balance, Decimal::new(125, 1));
        assert_eq!(cfg.accounts[1].balance, Decimal::ZERO);
    }

    #[test]
    fn test_duplicate_accounts_rejected() {
        let dup = SeedAccount {
            username: "alice".to_string(),
            password: "a".to_string(),
            balance: Decimal::ZERO,
        };
        let cfg = TellerConfig::default().with_accounts(vec![dup.clone(), dup]);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::DuplicateAccount(name)) if name == "alice"
        ));
    }

    #[test]
    fn test_token_ttl_bounds() {
        for ttl in [0, -60, MAX_TOKEN_TTL_SECS + 1, i64::MAX / 1000 + 1, i64::MAX] {
            let cfg = TellerConfig::default().with_token_ttl_secs(ttl);
            assert!(
                matches!(cfg.validate(), Err(ConfigError::InvalidTokenTtl(t)) if t == ttl),
                "ttl {}",
                ttl
            );
        }
        assert!(TellerConfig::default().with_token_ttl_secs(1).validate().is_ok());
        assert!(TellerConfig::default()
            .with_token_ttl_secs(MAX_TOKEN_TTL_SECS)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_missing_file_writes_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh.toml");
        let cfg = TellerConfig::load_or_default(path.to_str().unwrap());
        assert_eq!(cfg.server.port, 3000);
        assert!(path.exists());

        let reloaded = TellerConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(reloaded.accounts, TellerConfig::default().accounts);
    }
}
