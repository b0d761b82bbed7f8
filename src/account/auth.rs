//! Bearer-token authentication for accounts
//!
//! Tokens are HS256 JWTs carrying the username as the only identity claim.
//! Nothing is stored server-side; a token is valid until its `exp` passes.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::AccountId;
use crate::error::AuthError;

/// Scheme label expected in the `Authorization` header.
pub const BEARER_SCHEME: &str = "Bearer";

/// JWT claims for session tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub username: AccountId,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiry (Unix timestamp)
    pub exp: i64,
}

/// Issues and validates signed, time-limited tokens.
#[derive(Clone)]
pub struct AuthGate {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl_secs: i64,
}

impl AuthGate {
    pub fn new(secret: &str, token_ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_ttl_secs,
        }
    }

    pub fn issue_token(&self, identity: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = Duration::try_seconds(self.token_ttl_secs)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AuthError::Signing(format!("token lifetime {}s out of range", self.token_ttl_secs))
            })?;
        let claims = Claims {
            username: identity.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Checks an `Authorization` header value and returns the identity it carries.
    pub fn validate_token(&self, header: Option<&str>) -> Result<AccountId, AuthError> {
        let header = match header {
            Some(h) if !h.is_empty() => h,
            _ => return Err(AuthError::MissingHeader),
        };

        let parts: Vec<&str> = header.split(' ').collect();
        if parts.len() != 2 || parts[0] != BEARER_SCHEME {
            return Err(AuthError::MalformedHeader);
        }

        self.decode_claims(parts[1]).map(|claims| claims.username)
    }

    /// Signature and expiry are verified by the same decode call.
    pub fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                AuthError::InvalidOrExpiredToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn gate() -> AuthGate {
        AuthGate::new(SECRET, 3600)
    }

    fn sign_raw(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let gate = gate();
        let token = gate.issue_token("user1").unwrap();
        let header = format!("Bearer {}", token);
        assert_eq!(gate.validate_token(Some(&header)).unwrap(), "user1");
    }

    #[test]
    fn test_expiry_is_one_hour_after_issue() {
        let gate = gate();
        let token = gate.issue_token("user1").unwrap();
        let claims = gate.decode_claims(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_out_of_range_lifetime_fails_to_sign() {
        for ttl in [i64::MAX, i64::MAX / 1000 + 1, 10_000_000_000_000] {
            let gate = AuthGate::new(SECRET, ttl);
            assert!(
                matches!(gate.issue_token("user1"), Err(AuthError::Signing(_))),
                "ttl {}",
                ttl
            );
        }
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(gate().validate_token(None), Err(AuthError::MissingHeader));
        assert_eq!(gate().validate_token(Some("")), Err(AuthError::MissingHeader));
    }

    #[test]
    fn test_malformed_header() {
        let gate = gate();
        let token = gate.issue_token("user1").unwrap();
        let cases = [
            "Token xyz".to_string(),
            "bearer xyz".to_string(),
            token.clone(),
            format!("Bearer  {}", token),
            format!("Bearer {} extra", token),
        ];
        for header in cases.iter() {
            assert_eq!(
                gate.validate_token(Some(header)),
                Err(AuthError::MalformedHeader),
                "{} should be malformed",
                header
            );
        }
    }

    #[test]
    fn test_garbage_token() {
        assert_eq!(
            gate().validate_token(Some("Bearer garbage")),
            Err(AuthError::InvalidOrExpiredToken)
        );
        assert_eq!(
            gate().validate_token(Some("Bearer ")),
            Err(AuthError::InvalidOrExpiredToken)
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let other = AuthGate::new("another-secret", 3600);
        let token = other.issue_token("user1").unwrap();
        assert_eq!(
            gate().validate_token(Some(&format!("Bearer {}", token))),
            Err(AuthError::InvalidOrExpiredToken)
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            username: "user1".to_string(),
            iat: now - 7200,
            exp: now - 10,
        };
        let token = sign_raw(&claims, SECRET);
        assert_eq!(
            gate().validate_token(Some(&format!("Bearer {}", token))),
            Err(AuthError::InvalidOrExpiredToken)
        );
    }

    #[test]
    fn test_tampered_claims_rejected() {
        let gate = gate();
        let token = gate.issue_token("user1").unwrap();
        let forged = sign_raw(
            &Claims {
                username: "mallory".to_string(),
                iat: 0,
                exp: Utc::now().timestamp() + 3600,
            },
            "guessed-secret",
        );
        // Splice the forged payload onto the genuine signature
        let genuine: Vec<&str> = token.split('.').collect();
        let fake: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", genuine[0], fake[1], genuine[2]);
        assert_eq!(
            gate.validate_token(Some(&format!("Bearer {}", spliced))),
            Err(AuthError::InvalidOrExpiredToken)
        );
    }
}
