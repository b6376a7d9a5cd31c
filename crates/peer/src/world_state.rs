//! World state - the committed key-value view of the ledger

use crate::write_set::{WriteOp, WriteSet};
use acctbook_shim::StateError;
use std::collections::BTreeMap;

/// Committed state a peer simulates transactions against.
///
/// `apply` must be all-or-nothing: either every write of the set is
/// visible afterwards or none is.
pub trait WorldState {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StateError>;

    fn apply(&mut self, writes: &WriteSet) -> Result<(), StateError>;
}

/// In-memory world state
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryWorldState {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryWorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of every committed entry (for debugging/testing)
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.entries.clone()
    }
}

impl WorldState for MemoryWorldState {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.entries.get(key).cloned())
    }

    fn apply(&mut self, writes: &WriteSet) -> Result<(), StateError> {
        for (key, op) in writes.iter() {
            match op {
                WriteOp::Put { value } => {
                    self.entries.insert(key.clone(), value.clone());
                }
                WriteOp::Delete => {
                    self.entries.remove(key);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_put_and_delete() {
        let mut state = MemoryWorldState::new();

        let mut writes = WriteSet::new();
        writes.put("a", b"100".to_vec());
        writes.put("b", b"50".to_vec());
        state.apply(&writes).unwrap();
        assert_eq!(state.len(), 2);

        let mut writes = WriteSet::new();
        writes.delete("b");
        writes.put("a", b"150".to_vec());
        state.apply(&writes).unwrap();

        assert_eq!(state.get("a").unwrap(), Some(b"150".to_vec()));
        assert_eq!(state.get("b").unwrap(), None);
    }

    #[test]
    fn test_empty_value_is_not_absent() {
        let mut state = MemoryWorldState::new();
        let mut writes = WriteSet::new();
        writes.put("a", Vec::new());
        state.apply(&writes).unwrap();

        assert_eq!(state.get("a").unwrap(), Some(Vec::new()));
        assert_eq!(state.get("z").unwrap(), None);
    }
}
