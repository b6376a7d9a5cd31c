//! Acctbook Chaincode - Account balance state machine
//!
//! Every account is one ledger key holding a base-10 integer balance. The
//! chaincode validates each invocation, reads what it needs through the
//! stub and writes the new balances; the ledger runtime commits those
//! writes atomically or drops them.
//!
//! # Operations
//! - `init [founder, balance]`: designate the founder account
//! - `create [key, amount]`: open a new account
//! - `query [key]`: read a balance
//! - `transfer [from, to, amount]`: move funds between two accounts
//! - `unsubscribe [key]`: close an account into the founder account

pub mod accessor;
pub mod chaincode;
pub mod config;
pub mod error;
pub mod founder;
pub mod operations;

#[cfg(test)]
mod testing;

pub use accessor::BalanceStore;
pub use chaincode::{AccountChaincode, Function};
pub use config::{ChaincodeConfig, MissingBalancePolicy};
pub use error::{ChaincodeError, ConfigError};
pub use founder::FounderGuard;
