//! Transaction simulation

use crate::world_state::WorldState;
use crate::write_set::WriteSet;
use acctbook_shim::{ChaincodeStub, StateError};

/// Stub handed to chaincode for one transaction.
///
/// Reads go to the committed world state; writes of this transaction are
/// buffered in a [`WriteSet`] and are not visible to its own reads.
pub struct TxSimulator<'s> {
    tx_id: String,
    function: String,
    args: Vec<String>,
    state: &'s dyn WorldState,
    writes: WriteSet,
}

impl<'s> TxSimulator<'s> {
    pub fn new(
        tx_id: impl Into<String>,
        function: impl Into<String>,
        args: Vec<String>,
        state: &'s dyn WorldState,
    ) -> Self {
        Self {
            tx_id: tx_id.into(),
            function: function.into(),
            args,
            state,
            writes: WriteSet::new(),
        }
    }

    pub fn writes(&self) -> &WriteSet {
        &self.writes
    }

    pub fn into_write_set(self) -> WriteSet {
        self.writes
    }
}

impl ChaincodeStub for TxSimulator<'_> {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn function_and_parameters(&self) -> (String, Vec<String>) {
        (self.function.clone(), self.args.clone())
    }

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        self.state.get(key)
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError> {
        if key.is_empty() {
            return Err(StateError::rejected(key, "key must not be empty"));
        }
        self.writes.put(key, value);
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), StateError> {
        if key.is_empty() {
            return Err(StateError::rejected(key, "key must not be empty"));
        }
        self.writes.delete(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_state::MemoryWorldState;
    use crate::write_set::WriteOp;

    fn seeded() -> MemoryWorldState {
        let mut state = MemoryWorldState::new();
        let mut writes = WriteSet::new();
        writes.put("a", b"100".to_vec());
        state.apply(&writes).unwrap();
        state
    }

    #[test]
    fn test_reads_do_not_see_own_writes() {
        let state = seeded();
        let mut sim = TxSimulator::new("tx-1", "transfer", Vec::new(), &state);

        sim.put_state("a", b"70".to_vec()).unwrap();
        assert_eq!(sim.get_state("a").unwrap(), Some(b"100".to_vec()));
        assert_eq!(
            sim.writes().get("a"),
            Some(&WriteOp::Put { value: b"70".to_vec() })
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        let state = seeded();
        let mut sim = TxSimulator::new("tx-1", "create", Vec::new(), &state);

        assert!(matches!(
            sim.put_state("", b"1".to_vec()),
            Err(StateError::Rejected { .. })
        ));
        assert!(sim.del_state("").is_err());
        assert!(sim.into_write_set().is_empty());
    }

    #[test]
    fn test_function_and_parameters() {
        let state = MemoryWorldState::new();
        let sim = TxSimulator::new("tx-9", "query", vec!["b".to_string()], &state);
        assert_eq!(sim.tx_id(), "tx-9");
        assert_eq!(
            sim.function_and_parameters(),
            ("query".to_string(), vec!["b".to_string()])
        );
    }
}
