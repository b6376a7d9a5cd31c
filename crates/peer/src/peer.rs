//! Peer - runs chaincode transactions and commits their write sets
//!
//! Flow per invocation: Simulate → (OK?) → Seal block → Journal → Apply

use crate::config::PeerConfig;
use crate::error::PeerError;
use crate::journal::{Block, Journal, GENESIS_HASH};
use crate::simulator::TxSimulator;
use crate::world_state::{MemoryWorldState, WorldState};
use crate::write_set::WriteSet;
use acctbook_shim::{Chaincode, Response};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Function name recorded for instantiation blocks
pub const INIT_FUNCTION: &str = "init";

/// Single-writer ledger runtime.
///
/// `invoke` takes `&mut self`, so transactions are serialized by
/// construction; each one either commits its whole write set or nothing.
pub struct Peer<S: WorldState = MemoryWorldState> {
    state: S,
    journal: Option<Journal>,
    config: PeerConfig,
    height: u64,
    last_hash: String,
    instantiated: bool,
}

impl Peer<MemoryWorldState> {
    /// In-memory peer without a journal
    pub fn in_memory() -> Self {
        Self::with_state(MemoryWorldState::new(), PeerConfig::default())
    }

    /// Open a peer, replaying the journal when one is configured
    pub fn open(config: PeerConfig) -> Result<Self, PeerError> {
        let Some(dir) = config.journal_dir.clone() else {
            return Ok(Self::with_state(MemoryWorldState::new(), config));
        };

        let (journal, blocks) = Journal::open(&dir)?;
        let mut peer = Self::with_state(MemoryWorldState::new(), config);

        for block in &blocks {
            peer.state.apply(&block.writes)?;
            peer.instantiated |= block.function == INIT_FUNCTION;
        }
        if let Some(last) = blocks.last() {
            peer.height = last.number;
            peer.last_hash = last.hash.clone();
        }
        peer.journal = Some(journal);

        info!(dir = %dir.display(), height = peer.height, "peer state rebuilt from journal");
        Ok(peer)
    }
}

impl<S: WorldState> Peer<S> {
    /// Peer over a custom world state; no journal is attached
    pub fn with_state(state: S, config: PeerConfig) -> Self {
        Self {
            state,
            journal: None,
            config,
            height: 0,
            last_hash: GENESIS_HASH.to_string(),
            instantiated: false,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn config(&self) -> &PeerConfig {
        &self.config
    }

    /// Number of committed blocks
    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn last_hash(&self) -> &str {
        &self.last_hash
    }

    pub fn is_instantiated(&self) -> bool {
        self.instantiated
    }

    /// Run `Chaincode::init` with `args` and commit on success.
    ///
    /// May be called again to upgrade; the chaincode decides what re-init means.
    pub fn instantiate(
        &mut self,
        chaincode: &dyn Chaincode,
        args: &[&str],
    ) -> Result<Response, PeerError> {
        let response = self.execute(chaincode, INIT_FUNCTION, args, true)?;
        if response.is_ok() {
            self.instantiated = true;
        }
        Ok(response)
    }

    /// Run `Chaincode::invoke` for `function` with `args` and commit on success
    pub fn invoke(
        &mut self,
        chaincode: &dyn Chaincode,
        function: &str,
        args: &[&str],
    ) -> Result<Response, PeerError> {
        if !self.instantiated {
            return Err(PeerError::NotInstantiated);
        }
        self.execute(chaincode, function, args, false)
    }

    fn execute(
        &mut self,
        chaincode: &dyn Chaincode,
        function: &str,
        args: &[&str],
        init: bool,
    ) -> Result<Response, PeerError> {
        let tx_id = Uuid::new_v4().to_string();
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();

        let (response, writes) = {
            let mut sim = TxSimulator::new(&tx_id, function, args, &self.state);
            let response = if init {
                chaincode.init(&mut sim)
            } else {
                chaincode.invoke(&mut sim)
            };
            (response, sim.into_write_set())
        };

        if !response.is_ok() {
            warn!(tx_id = %tx_id, function, message = %response.message, "transaction rejected, write set discarded");
            return Ok(response);
        }
        // An empty init is still journaled so a reopened peer knows it was instantiated
        if writes.is_empty() && !init {
            debug!(tx_id = %tx_id, function, "read-only transaction, nothing to commit");
            return Ok(response);
        }

        self.commit(&tx_id, function, writes)?;
        Ok(response)
    }

    /// Journal first, then apply; the journal is the source of truth on reopen
    fn commit(&mut self, tx_id: &str, function: &str, writes: WriteSet) -> Result<(), PeerError> {
        let block = Block::seal(
            self.height + 1,
            tx_id,
            self.config.channel.as_str(),
            function,
            writes,
            self.last_hash.as_str(),
        );

        if let Some(journal) = self.journal.as_mut() {
            journal.append(&block)?;
        }
        self.state.apply(&block.writes)?;

        self.height = block.number;
        self.last_hash = block.hash;

        info!(
            tx_id,
            function,
            block = self.height,
            writes = block.writes.len(),
            "transaction committed"
        );
        Ok(())
    }
}
