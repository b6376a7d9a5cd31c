//! Peer and journal errors

use acctbook_shim::StateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Broken hash chain at block {number}: expected prev_hash {expected}, got {actual}")]
    BrokenChain {
        number: u64,
        expected: String,
        actual: String,
    },

    #[error("Invalid hash at block {number}: expected {expected}, got {actual}")]
    InvalidHash {
        number: u64,
        expected: String,
        actual: String,
    },

    #[error("Block numbers must be consecutive: expected {expected}, got {actual}")]
    InvalidSequence { expected: u64, actual: u64 },
}

#[derive(Error, Debug)]
pub enum PeerError {
    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("World state error: {0}")]
    State(#[from] StateError),

    #[error("Chaincode has not been instantiated")]
    NotInstantiated,
}
