//! Relay host configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::LogFormat;
use crate::NodeError;

/// Limits and logging settings for a [`RelayHost`](crate::RelayHost).
///
/// Can be loaded from a TOML file via [`RelayConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Largest address batch accepted by one call.
    #[serde(default = "default_max_addresses_per_batch")]
    pub max_addresses_per_batch: usize,

    /// Largest signature batch accepted by one call.
    #[serde(default = "default_max_signatures_per_batch")]
    pub max_signatures_per_batch: usize,

    /// Longest invitation proof accepted, in sibling hashes.
    #[serde(default = "default_max_proof_depth")]
    pub max_proof_depth: usize,

    /// Largest revocation payload accepted, in bytes.
    #[serde(default = "default_max_payload_len")]
    pub max_payload_len: usize,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Where snapshots are written when no explicit path is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_max_addresses_per_batch() -> usize {
    1000
}

fn default_max_signatures_per_batch() -> usize {
    256
}

fn default_max_proof_depth() -> usize {
    64
}

fn default_max_payload_len() -> usize {
    1024
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl RelayConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// The configured log format, parsed.
    pub fn log_format(&self) -> Result<LogFormat, NodeError> {
        self.log_format.parse()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_addresses_per_batch: default_max_addresses_per_batch(),
            max_signatures_per_batch: default_max_signatures_per_batch(),
            max_proof_depth: default_max_proof_depth(),
            max_payload_len: default_max_payload_len(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            snapshot_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = RelayConfig {
            snapshot_path: Some(PathBuf::from("/var/lib/relay/ledger.snap")),
            ..RelayConfig::default()
        };
        let toml_str = config.to_toml_string().expect("serializable");
        let parsed = RelayConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = RelayConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.max_addresses_per_batch, 1000);
        assert_eq!(config.max_signatures_per_batch, 256);
        assert_eq!(config.max_proof_depth, 64);
        assert_eq!(config.log_format, "human");
        assert!(config.snapshot_path.is_none());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            max_addresses_per_batch = 50
            log_format = "json"
        "#;
        let config = RelayConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.max_addresses_per_batch, 50);
        assert_eq!(config.log_format().unwrap(), LogFormat::Json);
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = RelayConfig::from_toml_file("/nonexistent/relay.toml");
        assert!(matches!(result, Err(NodeError::Config(_))));
    }

    #[test]
    fn malformed_toml_returns_config_error() {
        let result = RelayConfig::from_toml_str("max_proof_depth = \"deep\"");
        assert!(matches!(result, Err(NodeError::Config(_))));
    }
}
