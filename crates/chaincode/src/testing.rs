//! In-memory stub for unit tests
//!
//! Reads see only committed state, writes are buffered, and `run`/`run_init`
//! commit the buffer only when the chaincode answers OK.

use acctbook_shim::{Chaincode, ChaincodeStub, Response, StateError};
use std::collections::{BTreeMap, HashSet};

pub(crate) fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[derive(Default)]
pub(crate) struct MockStub {
    committed: BTreeMap<String, Vec<u8>>,
    writes: BTreeMap<String, Option<Vec<u8>>>,
    function: String,
    args: Vec<String>,
    tx_counter: u64,
    tx_id: String,
    fail_get: HashSet<String>,
    fail_put: HashSet<String>,
    fail_del: HashSet<String>,
}

impl MockStub {
    pub fn new() -> Self {
        Self {
            tx_id: "tx-0".to_string(),
            ..Default::default()
        }
    }

    pub fn with_state(mut self, key: &str, value: &str) -> Self {
        self.committed.insert(key.to_string(), value.as_bytes().to_vec());
        self
    }

    pub fn fail_get(mut self, key: &str) -> Self {
        self.fail_get.insert(key.to_string());
        self
    }

    pub fn fail_put(mut self, key: &str) -> Self {
        self.fail_put.insert(key.to_string());
        self
    }

    pub fn fail_del(mut self, key: &str) -> Self {
        self.fail_del.insert(key.to_string());
        self
    }

    /// Buffered write for `key`: `Some(Some(v))` put, `Some(None)` delete
    pub fn pending(&self, key: &str) -> Option<Option<Vec<u8>>> {
        self.writes.get(key).cloned()
    }

    pub fn no_pending_writes(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn committed(&self, key: &str) -> Option<String> {
        self.committed
            .get(key)
            .map(|v| String::from_utf8_lossy(v).into_owned())
    }

    pub fn committed_state(&self) -> BTreeMap<String, Vec<u8>> {
        self.committed.clone()
    }

    pub fn run_init(&mut self, chaincode: &dyn Chaincode, values: &[&str]) -> Response {
        self.begin("init", values);
        let response = chaincode.init(self);
        self.finish(&response);
        response
    }

    pub fn run(&mut self, chaincode: &dyn Chaincode, function: &str, values: &[&str]) -> Response {
        self.begin(function, values);
        let response = chaincode.invoke(self);
        self.finish(&response);
        response
    }

    fn begin(&mut self, function: &str, values: &[&str]) {
        self.tx_counter += 1;
        self.tx_id = format!("tx-{}", self.tx_counter);
        self.function = function.to_string();
        self.args = args(values);
        self.writes.clear();
    }

    fn finish(&mut self, response: &Response) {
        let writes = std::mem::take(&mut self.writes);
        if !response.is_ok() {
            return;
        }
        for (key, value) in writes {
            match value {
                Some(bytes) => self.committed.insert(key, bytes),
                None => self.committed.remove(&key),
            };
        }
    }
}

impl ChaincodeStub for MockStub {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn function_and_parameters(&self) -> (String, Vec<String>) {
        (self.function.clone(), self.args.clone())
    }

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        if self.fail_get.contains(key) {
            return Err(StateError::Unavailable(format!("injected read failure on {key}")));
        }
        Ok(self.committed.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError> {
        if self.fail_put.contains(key) {
            return Err(StateError::rejected(key, "injected write failure"));
        }
        self.writes.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), StateError> {
        if self.fail_del.contains(key) {
            return Err(StateError::rejected(key, "injected delete failure"));
        }
        self.writes.insert(key.to_string(), None);
        Ok(())
    }
}
