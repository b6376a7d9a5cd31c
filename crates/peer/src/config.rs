//! Peer configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_JOURNAL_DIR: &str = "ACCTBOOK_JOURNAL_DIR";
pub const ENV_CHANNEL: &str = "ACCTBOOK_CHANNEL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerConfig {
    /// Directory of the block journal; `None` keeps the ledger in memory only
    #[serde(default)]
    pub journal_dir: Option<PathBuf>,

    /// Channel name recorded in every block
    #[serde(default = "default_channel")]
    pub channel: String,
}

fn default_channel() -> String {
    "acctbook".to_string()
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            journal_dir: None,
            channel: default_channel(),
        }
    }
}

impl PeerConfig {
    /// Journaled configuration rooted at `dir`
    pub fn journaled(dir: impl Into<PathBuf>) -> Self {
        Self {
            journal_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Load configuration from the process environment, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(dir) = lookup(ENV_JOURNAL_DIR).filter(|d| !d.is_empty()) {
            config.journal_dir = Some(PathBuf::from(dir));
        }
        if let Some(channel) = lookup(ENV_CHANNEL).filter(|c| !c.is_empty()) {
            config.channel = channel;
        }
        config
    }
}
