//! Chaincode configuration
//!
//! Defaults reproduce the historical behavior. Values can be overridden from
//! a JSON file or from `ACCTBOOK_*` environment variables.

use crate::error::ConfigError;
use acctbook_core::key::is_reserved;
use acctbook_core::FOUNDER_SENTINEL_KEY;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

pub const ENV_FOUNDER_SENTINEL_KEY: &str = "ACCTBOOK_FOUNDER_SENTINEL_KEY";
pub const ENV_MISSING_BALANCE_POLICY: &str = "ACCTBOOK_MISSING_BALANCE_POLICY";

/// Configuration for [`AccountChaincode`](crate::AccountChaincode)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeConfig {
    /// Ledger key holding the founder account's key
    #[serde(default = "default_founder_sentinel_key")]
    pub founder_sentinel_key: String,

    /// What `unsubscribe` does when a balance it reads is missing or unparseable
    #[serde(default)]
    pub missing_balance_policy: MissingBalancePolicy,
}

/// Handling of missing/unreadable balances while closing an account
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MissingBalancePolicy {
    /// Count the balance as zero and carry on
    #[default]
    TreatAsZero,

    /// Abort the close with `AccountNotFound` / `CorruptBalance`
    Reject,
}

fn default_founder_sentinel_key() -> String {
    FOUNDER_SENTINEL_KEY.to_string()
}

impl Default for ChaincodeConfig {
    fn default() -> Self {
        Self {
            founder_sentinel_key: default_founder_sentinel_key(),
            missing_balance_policy: MissingBalancePolicy::default(),
        }
    }
}

impl ChaincodeConfig {
    /// Parse configuration from a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from the process environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup(ENV_FOUNDER_SENTINEL_KEY) {
            config.founder_sentinel_key = key;
        }
        if let Some(policy) = lookup(ENV_MISSING_BALANCE_POLICY) {
            config.missing_balance_policy = MissingBalancePolicy::from_str(policy.trim())
                .map_err(|_| ConfigError::UnknownPolicy(policy))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// The sentinel must never collide with an account key
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_reserved(&self.founder_sentinel_key) {
            return Err(ConfigError::SentinelNotReserved(
                self.founder_sentinel_key.clone(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ChaincodeConfig::default();
        assert_eq!(config.founder_sentinel_key, FOUNDER_SENTINEL_KEY);
        assert_eq!(config.missing_balance_policy, MissingBalancePolicy::TreatAsZero);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ChaincodeConfig::from_json(r#"{"missing_balance_policy":"reject"}"#).unwrap();
        assert_eq!(config.missing_balance_policy, MissingBalancePolicy::Reject);
        assert_eq!(config.founder_sentinel_key, FOUNDER_SENTINEL_KEY);
    }

    #[test]
    fn test_from_json_rejects_plain_sentinel() {
        let result = ChaincodeConfig::from_json(r#"{"founder_sentinel_key":"founder"}"#);
        assert!(matches!(result, Err(ConfigError::SentinelNotReserved(_))));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_FOUNDER_SENTINEL_KEY, "\u{0}acctbook/owner"),
            (ENV_MISSING_BALANCE_POLICY, "reject"),
        ]
        .into_iter()
        .collect();

        let config =
            ChaincodeConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.founder_sentinel_key, "\u{0}acctbook/owner");
        assert_eq!(config.missing_balance_policy, MissingBalancePolicy::Reject);
    }

    #[test]
    fn test_from_lookup_unknown_policy() {
        let result = ChaincodeConfig::from_lookup(|name| {
            (name == ENV_MISSING_BALANCE_POLICY).then(|| "ignore".to_string())
        });
        assert!(matches!(result, Err(ConfigError::UnknownPolicy(_))));
    }

    #[test]
    fn test_from_lookup_empty_uses_defaults() {
        let config = ChaincodeConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ChaincodeConfig::default());
    }

    #[test]
    fn test_policy_display() {
        assert_eq!(MissingBalancePolicy::TreatAsZero.to_string(), "treat_as_zero");
    }
}
