//! Per-transaction view of the ledger

use crate::error::StateError;

/// The ledger as seen from inside one transaction.
///
/// Reads observe the state committed before the transaction started.
/// Writes are buffered by the runtime and become durable together, or not
/// at all, once the chaincode returns a successful [`Response`](crate::Response).
pub trait ChaincodeStub {
    /// Identifier of the transaction being simulated
    fn tx_id(&self) -> &str;

    /// Invoked function name and its positional string arguments.
    ///
    /// During `init` the function name is whatever the caller supplied and
    /// is usually ignored.
    fn function_and_parameters(&self) -> (String, Vec<String>);

    /// Read a key. `Ok(None)` means the key is absent, which is distinct
    /// from a stored empty value.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StateError>;

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError>;

    fn del_state(&mut self, key: &str) -> Result<(), StateError>;
}
