//! Genesis configuration for the epoch ledger.
//!
//! Epoch 0 is fixed by two roots: the identity root that the genesis set must
//! hash to, and the invitation root used by inviter-attested revocations for
//! the lifetime of the ledger. The genesis set itself is either supplied up
//! front (small sets) or assembled later in batches.

use relay_types::{Address, Hash256};

/// Configuration for constructing an [`EpochLedger`](crate::EpochLedger).
#[derive(Clone, Debug)]
pub struct GenesisConfig {
    /// Root the genesis identity set must hash to.
    pub root: Hash256,
    /// Immutable root over `(inviter, invitee)` edges.
    pub invitation_root: Hash256,
    /// The full genesis set, or `None` for batched initialization.
    pub addresses: Option<Vec<Address>>,
}

impl GenesisConfig {
    /// Genesis with the whole address set supplied immediately.
    pub fn with_addresses(root: Hash256, invitation_root: Hash256, addresses: Vec<Address>) -> Self {
        Self {
            root,
            invitation_root,
            addresses: Some(addresses),
        }
    }

    /// Genesis whose set will be assembled through `init_state` / `finish_init`.
    pub fn batched(root: Hash256, invitation_root: Hash256) -> Self {
        Self {
            root,
            invitation_root,
            addresses: None,
        }
    }
}
