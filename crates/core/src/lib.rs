//! Acctbook Core - Domain types
//!
//! This crate contains the fundamental types shared by the chaincode and the
//! reference ledger runtime:
//! - `Balance`: Signed integer balance with its base-10 wire encoding
//! - `key`: Account key validation and the reserved key namespace

pub mod balance;
pub mod key;

pub use balance::{Balance, BalanceError};
pub use key::{validate_account_key, KeyError, FOUNDER_SENTINEL_KEY, RESERVED_PREFIX};
