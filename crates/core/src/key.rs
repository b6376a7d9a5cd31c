//! Account keys and the reserved key namespace
//!
//! Account keys are opaque strings. Keys starting with [`RESERVED_PREFIX`]
//! belong to the chaincode itself and can never name an account.

use thiserror::Error;

/// Prefix of every key owned by the chaincode rather than by an account
pub const RESERVED_PREFIX: &str = "\u{0}acctbook/";

/// Default key under which the founder account's key is persisted
pub const FOUNDER_SENTINEL_KEY: &str = "\u{0}acctbook/founder";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Account key cannot be empty")]
    Empty,

    #[error("Account key {0:?} is reserved")]
    Reserved(String),
}

/// Returns true if the key lives in the reserved namespace
pub fn is_reserved(key: &str) -> bool {
    key.starts_with(RESERVED_PREFIX)
}

/// Check that `key` may be used as an account key
pub fn validate_account_key(key: &str) -> Result<(), KeyError> {
    if key.is_empty() {
        return Err(KeyError::Empty);
    }
    if is_reserved(key) {
        return Err(KeyError::Reserved(key.to_string()));
    }
    Ok(())
}
