//! [`tracing::Span`] constructors for host entry points.
//!
//! Every call into the host runs inside one of these so that ledger events
//! carry the operation and the epoch they happened in.

use relay_types::Epoch;
use tracing::{debug_span, info_span, Span};

/// Span covering one state-changing host call.
pub fn relay_call_span(operation: &'static str, epoch: Epoch) -> Span {
    info_span!("relay_call", operation, epoch = %epoch)
}

/// Span covering a read-only query.
pub fn query_span(operation: &'static str) -> Span {
    debug_span!("relay_query", operation)
}

/// Span covering a snapshot write or restore.
pub fn snapshot_span(action: &'static str, path: &std::path::Path) -> Span {
    info_span!("snapshot", action, path = %path.display())
}
