//! Founder guard
//!
//! The founder account is designated at init and persisted under a
//! reserved sentinel key. It is looked up from the ledger on every close,
//! never from process memory.

use crate::accessor::BalanceStore;
use crate::config::ChaincodeConfig;
use crate::error::ChaincodeError;
use tracing::debug;

pub struct FounderGuard<'c> {
    sentinel_key: &'c str,
}

impl<'c> FounderGuard<'c> {
    pub fn new(config: &'c ChaincodeConfig) -> Self {
        Self {
            sentinel_key: &config.founder_sentinel_key,
        }
    }

    /// Persist `founder` as the founder account key
    pub fn designate(&self, store: &mut BalanceStore<'_>, founder: &str) -> Result<(), ChaincodeError> {
        debug!(tx_id = %store.tx_id(), founder, "designating founder account");
        store.write_raw(self.sentinel_key, founder.as_bytes().to_vec())
    }

    /// Current founder account key
    pub fn founder(&self, store: &BalanceStore<'_>) -> Result<String, ChaincodeError> {
        let raw = store
            .read_raw(self.sentinel_key)?
            .ok_or(ChaincodeError::FounderNotSet)?;
        match String::from_utf8(raw) {
            Ok(founder) if !founder.is_empty() => Ok(founder),
            _ => Err(ChaincodeError::FounderNotSet),
        }
    }

    /// Fails with `FounderProtected` if `key` is the founder; otherwise returns the founder key
    pub fn ensure_closable(
        &self,
        store: &BalanceStore<'_>,
        key: &str,
    ) -> Result<String, ChaincodeError> {
        let founder = self.founder(store)?;
        if founder == key {
            return Err(ChaincodeError::FounderProtected(founder));
        }
        Ok(founder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockStub;
    use acctbook_core::FOUNDER_SENTINEL_KEY;

    #[test]
    fn test_founder_not_set() {
        let config = ChaincodeConfig::default();
        let mut stub = MockStub::new();
        let store = BalanceStore::new(&mut stub);
        assert_eq!(
            FounderGuard::new(&config).founder(&store),
            Err(ChaincodeError::FounderNotSet)
        );
    }

    #[test]
    fn test_founder_read_from_sentinel() {
        let config = ChaincodeConfig::default();
        let mut stub = MockStub::new().with_state(FOUNDER_SENTINEL_KEY, "a");
        let store = BalanceStore::new(&mut stub);
        let guard = FounderGuard::new(&config);

        assert_eq!(guard.founder(&store).unwrap(), "a");
        assert_eq!(guard.ensure_closable(&store, "b").unwrap(), "a");
        assert_eq!(
            guard.ensure_closable(&store, "a"),
            Err(ChaincodeError::FounderProtected("a".to_string()))
        );
    }

    #[test]
    fn test_custom_sentinel_key() {
        let config = ChaincodeConfig {
            founder_sentinel_key: "\u{0}acctbook/owner".to_string(),
            ..Default::default()
        };
        let mut stub = MockStub::new().with_state(FOUNDER_SENTINEL_KEY, "a");
        let store = BalanceStore::new(&mut stub);
        assert_eq!(
            FounderGuard::new(&config).founder(&store),
            Err(ChaincodeError::FounderNotSet)
        );
    }
}
