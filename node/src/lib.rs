//! Relay host: the byte-level face of the epoch relay engine.
//!
//! The host wraps an [`EpochLedger`](relay_ledger::EpochLedger) and:
//! - decodes fixed-width byte batches from the host chain
//! - enforces per-call size limits from [`RelayConfig`]
//! - persists and restores ledger snapshots
//! - installs structured logging

pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod tracing_spans;

pub use config::RelayConfig;
pub use error::NodeError;
pub use host::{RawRevocation, RelayHost};
pub use logging::{init_logging, LogFormat};
