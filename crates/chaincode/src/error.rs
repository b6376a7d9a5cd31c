//! Chaincode errors

use acctbook_core::{Balance, BalanceError, KeyError};
use acctbook_shim::StateError;
use thiserror::Error;

/// Errors that abort an account operation.
///
/// Only the `Display` message crosses the invocation boundary; `code()` is
/// for logs and typed callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChaincodeError {
    #[error("Expected {expected} argument(s), got {actual}")]
    InvalidArgumentCount { expected: usize, actual: usize },

    #[error("Amount must be an integer, got {0:?}")]
    InvalidAmount(String),

    #[error("Failed to read account {key}: {source}")]
    StorageReadFailure { key: String, source: StateError },

    #[error("Failed to write account {key}: {source}")]
    StorageWriteFailure { key: String, source: StateError },

    #[error("Failed to delete account {key}: {source}")]
    DeleteFailure { key: String, source: StateError },

    #[error("Account {0} already exists")]
    AccountExists(String),

    #[error("Account {0} not found")]
    AccountNotFound(String),

    #[error("Insufficient funds in account {account}: balance {balance}, transfer {amount}")]
    InsufficientFunds {
        account: String,
        balance: Balance,
        amount: i64,
    },

    #[error("Founder account {0} cannot be closed")]
    FounderProtected(String),

    #[error("Unknown function {0:?}")]
    UnknownFunction(String),

    #[error("Account key cannot be empty")]
    EmptyKey,

    #[error("Account key {0:?} is reserved")]
    ReservedKey(String),

    #[error("Stored balance of account {key} is corrupt: {source}")]
    CorruptBalance { key: String, source: BalanceError },

    #[error("Balance overflow on account {0}")]
    BalanceOverflow(String),

    #[error("Founder account has not been initialized")]
    FounderNotSet,
}

impl ChaincodeError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgumentCount { .. } => "INVALID_ARGUMENT_COUNT",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::StorageReadFailure { .. } => "STORAGE_READ_FAILURE",
            Self::StorageWriteFailure { .. } => "STORAGE_WRITE_FAILURE",
            Self::DeleteFailure { .. } => "DELETE_FAILURE",
            Self::AccountExists(_) => "ACCOUNT_EXISTS",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::FounderProtected(_) => "FOUNDER_PROTECTED",
            Self::UnknownFunction(_) => "UNKNOWN_FUNCTION",
            Self::EmptyKey => "EMPTY_KEY",
            Self::ReservedKey(_) => "RESERVED_KEY",
            Self::CorruptBalance { .. } => "CORRUPT_BALANCE",
            Self::BalanceOverflow(_) => "BALANCE_OVERFLOW",
            Self::FounderNotSet => "FOUNDER_NOT_SET",
        }
    }

    pub fn argument_count(expected: usize, actual: usize) -> Self {
        Self::InvalidArgumentCount { expected, actual }
    }

    pub fn read_failure(key: &str, source: StateError) -> Self {
        Self::StorageReadFailure {
            key: key.to_string(),
            source,
        }
    }

    pub fn write_failure(key: &str, source: StateError) -> Self {
        Self::StorageWriteFailure {
            key: key.to_string(),
            source,
        }
    }

    pub fn delete_failure(key: &str, source: StateError) -> Self {
        Self::DeleteFailure {
            key: key.to_string(),
            source,
        }
    }
}

impl From<KeyError> for ChaincodeError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::Empty => Self::EmptyKey,
            KeyError::Reserved(key) => Self::ReservedKey(key),
        }
    }
}

/// Errors while loading [`ChaincodeConfig`](crate::ChaincodeConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown missing-balance policy: {0:?}")]
    UnknownPolicy(String),

    #[error("Founder sentinel key {0:?} must live in the reserved namespace")]
    SentinelNotReserved(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_funds_message() {
        let err = ChaincodeError::InsufficientFunds {
            account: "a".to_string(),
            balance: Balance::new(70),
            amount: 1000,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds in account a: balance 70, transfer 1000"
        );
        assert_eq!(err.code(), "INSUFFICIENT_FUNDS");
    }

    #[test]
    fn test_key_error_conversion() {
        assert_eq!(ChaincodeError::from(KeyError::Empty), ChaincodeError::EmptyKey);
        assert_eq!(
            ChaincodeError::from(KeyError::Reserved("x".to_string())),
            ChaincodeError::ReservedKey("x".to_string())
        );
    }

    #[test]
    fn test_storage_failure_mentions_key_and_cause() {
        let err = ChaincodeError::write_failure("b", StateError::Unavailable("disk full".into()));
        let message = err.to_string();
        assert!(message.contains("account b"));
        assert!(message.contains("disk full"));
    }
}
