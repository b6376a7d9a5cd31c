//! Acctbook Shim - the contract between chaincode and the ledger runtime
//!
//! The ledger runtime owns durability, ordering and atomic commit. Chaincode
//! only ever sees one transaction at a time through a [`ChaincodeStub`] and
//! answers with a [`Response`].
//!
//! # Key Types
//! - `ChaincodeStub`: Per-transaction key-value access plus the invocation arguments
//! - `Chaincode`: The init/invoke entry points a runtime drives
//! - `Response`: Status/message/payload triple returned to the caller

pub mod chaincode;
pub mod error;
pub mod response;
pub mod stub;

pub use chaincode::Chaincode;
pub use error::StateError;
pub use response::Response;
pub use stub::ChaincodeStub;
