//! Account type definitions

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;

use crate::error::{AccountError, Operation};

/// Account identifier - the login username
pub type AccountId = String;

/// Login credential. Passwords are compared verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    pub username: AccountId,
    pub password: String,
}

/// A validated, strictly positive amount together with its display text.
#[derive(Clone, Debug, PartialEq)]
pub struct Amount {
    value: Option<Decimal>,
    text: String,
}

impl Amount {
    /// Accepts only JSON numbers greater than zero.
    ///
    /// Numbers with more than 28 fractional digits are rounded to the
    /// nearest representable `Decimal`; numbers above `Decimal::MAX` are
    /// still valid amounts but carry no value (see [`Amount::value`]).
    pub fn parse(value: Option<&serde_json::Value>, op: Operation) -> Result<Self, AccountError> {
        let number = match value {
            Some(serde_json::Value::Number(n)) => n,
            _ => return Err(AccountError::InvalidAmount(op)),
        };
        let float = match number.as_f64() {
            Some(f) if f.is_finite() && f > 0.0 => f,
            _ => return Err(AccountError::InvalidAmount(op)),
        };
        let raw = number.to_string();
        let value = Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .ok()
            .or_else(|| Decimal::from_f64(float))
            .or_else(|| (float < 1.0).then_some(Decimal::ZERO));
        Ok(Self {
            value,
            text: number_text(number, float),
        })
    }

    /// `None` when the amount is larger than any balance can hold.
    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    /// Amount as it appears in receipts, e.g. `250` or `12.5`.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Renders a JSON number the way a JavaScript client prints it: whole
/// values without a fraction, plain digits below 1e21, exponent form
/// (`1e+21`, `1e-7`) outside that range.
fn number_text(number: &serde_json::Number, float: f64) -> String {
    if number.is_u64() || number.is_i64() {
        return number.to_string();
    }
    if (1e-6..1e21).contains(&float) {
        return format!("{}", float);
    }
    let text = format!("{:e}", float);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => text,
    }
}

/// Result of a successful deposit or withdrawal.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub message: String,
    #[serde(serialize_with = "serialize_balance")]
    pub new_balance: Decimal,
}

impl Receipt {
    pub fn deposited(amount: &Amount, new_balance: Decimal) -> Self {
        Self {
            message: format!("Deposited ${}", amount.as_str()),
            new_balance,
        }
    }

    pub fn withdrew(amount: &Amount, new_balance: Decimal) -> Self {
        Self {
            message: format!("Withdrew ${}", amount.as_str()),
            new_balance,
        }
    }
}

/// Whole balances go out as JSON integers, fractional ones as floats.
pub fn serialize_balance<S: Serializer>(balance: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    if balance.fract().is_zero() {
        if let Some(whole) = balance.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    match balance.to_f64() {
        Some(f) => serializer.serialize_f64(f),
        None => Err(serde::ser::Error::custom("balance out of range")),
    }
}
