use thiserror::Error;

/// Which balance mutation rejected an amount; selects the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deposit,
    Withdraw,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Deposit => write!(f, "deposit"),
            Operation::Withdraw => write!(f, "withdrawal"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Authorization header missing")]
    MissingHeader,
    #[error("Authorization header format must be 'Bearer <token>'")]
    MalformedHeader,
    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,
    #[error("Token signing failed: {0}")]
    Signing(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid {0} amount")]
    InvalidAmount(Operation),
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("Account not found")]
    UnknownAccount(String),
    #[error("Balance arithmetic overflow")]
    Overflow,
    #[error("Account lock poisoned: {0}")]
    LockPoisoned(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Duplicate account in seed data: {0}")]
    DuplicateAccount(String),
    #[error("token_ttl_secs out of range: {0}")]
    InvalidTokenTtl(i64),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Session error: {0}")]
    Session(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Error, Debug)]
pub enum TellerError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] ClientError),
}
