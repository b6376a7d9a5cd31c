//! Typed balance access on top of the raw stub

use crate::error::ChaincodeError;
use acctbook_core::Balance;
use acctbook_shim::ChaincodeStub;

/// Reads and writes account balances for one transaction.
///
/// Every stub failure is mapped to the error of the operation step that
/// hit it, so callers can simply use `?`.
pub struct BalanceStore<'a> {
    stub: &'a mut dyn ChaincodeStub,
}

impl<'a> BalanceStore<'a> {
    pub fn new(stub: &'a mut dyn ChaincodeStub) -> Self {
        Self { stub }
    }

    pub fn tx_id(&self) -> &str {
        self.stub.tx_id()
    }

    /// Raw stored bytes for `key`
    pub fn read_raw(&self, key: &str) -> Result<Option<Vec<u8>>, ChaincodeError> {
        self.stub
            .get_state(key)
            .map_err(|e| ChaincodeError::read_failure(key, e))
    }

    /// Decoded balance for `key`; a stored value that is not an integer is an error
    pub fn read(&self, key: &str) -> Result<Option<Balance>, ChaincodeError> {
        self.read_raw(key)?
            .map(|bytes| {
                Balance::from_bytes(&bytes).map_err(|source| ChaincodeError::CorruptBalance {
                    key: key.to_string(),
                    source,
                })
            })
            .transpose()
    }

    pub fn write_raw(&mut self, key: &str, value: Vec<u8>) -> Result<(), ChaincodeError> {
        self.stub
            .put_state(key, value)
            .map_err(|e| ChaincodeError::write_failure(key, e))
    }

    pub fn write(&mut self, key: &str, balance: Balance) -> Result<(), ChaincodeError> {
        self.write_raw(key, balance.to_bytes())
    }

    pub fn delete(&mut self, key: &str) -> Result<(), ChaincodeError> {
        self.stub
            .del_state(key)
            .map_err(|e| ChaincodeError::delete_failure(key, e))
    }
}
