//! Chaincode entry points

use crate::response::Response;
use crate::stub::ChaincodeStub;

/// Logic a ledger runtime can instantiate and invoke.
///
/// Implementations keep no state between calls; everything that must
/// survive lives in the ledger behind the stub.
pub trait Chaincode {
    /// Called once when the chaincode is instantiated (and again on upgrade)
    fn init(&self, stub: &mut dyn ChaincodeStub) -> Response;

    /// Called for every transaction proposal
    fn invoke(&self, stub: &mut dyn ChaincodeStub) -> Response;
}
