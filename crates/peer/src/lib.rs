//! Acctbook Peer - reference ledger runtime
//!
//! Drives a [`Chaincode`](acctbook_shim::Chaincode) the way an external
//! ledger would: every invocation is simulated against the committed world
//! state, and its write set is committed as one unit only if the chaincode
//! answered OK. Committed write sets can be journaled to an append-only
//! JSONL file with a SHA-256 hash chain; the journal is the source of truth
//! when a peer is reopened.

pub mod config;
pub mod error;
pub mod journal;
pub mod peer;
pub mod simulator;
pub mod world_state;
pub mod write_set;

pub use config::PeerConfig;
pub use error::{JournalError, PeerError};
pub use journal::{Block, Journal};
pub use peer::Peer;
pub use simulator::TxSimulator;
pub use world_state::{MemoryWorldState, WorldState};
pub use write_set::{WriteOp, WriteSet};
