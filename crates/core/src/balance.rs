//! Balance - Signed integer account balance
//!
//! Balances are stored in the ledger as base-10 ASCII integer strings.
//! The type itself is signed; non-negativity is an operation-level rule
//! (a transfer may not leave an account below zero), not a type-level one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when decoding a balance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BalanceError {
    #[error("Balance must be an integer: {0:?}")]
    NotAnInteger(String),

    #[error("Stored balance is not valid UTF-8")]
    InvalidEncoding,
}

/// An account balance.
///
/// # Encoding
/// `Display` produces the canonical base-10 form (`-12`, `0`, `150`).
/// Parsing accepts an optional sign and leading zeros (`+007` is `7`),
/// and rejects whitespace, fractions and anything outside `i64`.
///
/// # Example
/// ```
/// use acctbook_core::Balance;
///
/// let balance: Balance = "100".parse().unwrap();
/// assert_eq!(balance.value(), 100);
/// assert_eq!(balance.to_bytes(), b"100".to_vec());
///
/// assert!("12.5".parse::<Balance>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Balance(i64);

impl Balance {
    /// Zero balance constant
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner integer value
    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Decode a balance from raw ledger bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BalanceError> {
        let text = std::str::from_utf8(bytes).map_err(|_| BalanceError::InvalidEncoding)?;
        text.parse()
    }

    /// Encode the balance for storage
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_string().into_bytes()
    }

    /// Checked addition - returns None on overflow
    pub fn checked_add(&self, amount: i64) -> Option<Balance> {
        self.0.checked_add(amount).map(Balance)
    }

    /// Checked subtraction - returns None on overflow.
    ///
    /// A negative result is allowed here; callers decide whether it is acceptable.
    pub fn checked_sub(&self, amount: i64) -> Option<Balance> {
        self.0.checked_sub(amount).map(Balance)
    }
}

impl FromStr for Balance {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Balance)
            .map_err(|_| BalanceError::NotAnInteger(s.to_string()))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Balance {
    type Error = BalanceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Balance> for String {
    fn from(balance: Balance) -> Self {
        balance.to_string()
    }
}

impl From<i64> for Balance {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Default for Balance {
    fn default() -> Self {
        Self::ZERO
    }
}
