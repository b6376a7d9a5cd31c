//! State access errors

use thiserror::Error;

/// Errors a ledger runtime reports for a single state access
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("State backend unavailable: {0}")]
    Unavailable(String),

    #[error("Key {key:?} rejected: {reason}")]
    Rejected { key: String, reason: String },
}

impl StateError {
    pub fn rejected(key: &str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
