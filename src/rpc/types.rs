// Request and response bodies for the HTTP API
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::types::serialize_balance;
use crate::error::AuthError;

/// Login body. Fields stay raw JSON so a non-string value is an invalid
/// credential rather than an unreadable body.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<serde_json::Value>,
    #[serde(default)]
    pub password: Option<serde_json::Value>,
}

impl LoginRequest {
    /// Username and password as text. Absent, null, `false`, `0` and `""`
    /// count as missing; any other non-string value can never match.
    pub fn credentials(&self) -> Result<(&str, &str), AuthError> {
        let username = CredentialField::from_json(self.username.as_ref());
        let password = CredentialField::from_json(self.password.as_ref());
        match (username, password) {
            (CredentialField::Text(u), CredentialField::Text(p)) => Ok((u, p)),
            (CredentialField::Missing, _) | (_, CredentialField::Missing) => {
                Err(AuthError::MissingCredentials)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CredentialField<'a> {
    Missing,
    Text(&'a str),
    Other,
}

impl<'a> CredentialField<'a> {
    fn from_json(value: Option<&'a serde_json::Value>) -> Self {
        use serde_json::Value;
        match value {
            None | Some(Value::Null) | Some(Value::Bool(false)) => Self::Missing,
            Some(Value::String(s)) if s.is_empty() => Self::Missing,
            Some(Value::String(s)) => Self::Text(s),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Self::Missing,
            Some(_) => Self::Other,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BalanceResponse {
    #[serde(serialize_with = "serialize_balance")]
    pub balance: Decimal,
}

/// Body of `/deposit` and `/withdraw`. The amount is kept raw so that
/// non-numeric values reach validation instead of failing extraction.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct AmountRequest {
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
}

/// Every failure is reported as `{"message": "..."}`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> LoginRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_login_credentials() {
        let req = request(json!({ "username": "user1", "password": "password123" }));
        assert_eq!(req.credentials(), Ok(("user1", "password123")));

        for body in [
            json!({}),
            json!({ "username": "user1" }),
            json!({ "username": "user1", "password": null }),
            json!({ "username": "", "password": "x" }),
            json!({ "username": 0, "password": "x" }),
            json!({ "username": "user1", "password": false }),
            json!({ "username": 123, "password": "" }),
        ] {
            assert_eq!(request(body.clone()).credentials(), Err(AuthError::MissingCredentials), "{}", body);
        }

        for body in [
            json!({ "username": "user1", "password": 123 }),
            json!({ "username": true, "password": "password123" }),
            json!({ "username": ["user1"], "password": { "p": 1 } }),
        ] {
            assert_eq!(request(body.clone()).credentials(), Err(AuthError::InvalidCredentials), "{}", body);
        }
    }
}
