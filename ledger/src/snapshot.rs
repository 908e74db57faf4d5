//! Ledger snapshots of the committed identity state of one epoch.
//!
//! A host persists a snapshot between runs and restores the ledger from it
//! with [`EpochLedger::from_snapshot`](crate::EpochLedger::from_snapshot).
//! Staging state of an unfinished relay cycle is never captured. The snapshot
//! hash is computed deterministically from its fields so tampering is
//! detectable before the state is trusted.

use serde::{Deserialize, Serialize};

use relay_crypto::blake2b_256_multi;
use relay_types::{Address, Epoch, Hash256};

use crate::error::LedgerError;

/// Committed ledger state at a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Snapshot format version.
    pub version: u32,
    /// Epoch that was current when the snapshot was taken.
    pub epoch: Epoch,
    /// Root committed for that epoch.
    pub root: Hash256,
    /// Genesis invitation root.
    pub invitation_root: Hash256,
    /// Live members in ascending order (revocations already applied).
    pub members: Vec<Address>,
    /// Blake2b-256 over all fields above.
    pub hash: [u8; 32],
}

impl LedgerSnapshot {
    pub const VERSION: u32 = 1;

    /// Create a snapshot; members are sorted so equal states hash equally.
    pub fn create(
        epoch: Epoch,
        root: Hash256,
        invitation_root: Hash256,
        mut members: Vec<Address>,
    ) -> Self {
        members.sort_unstable();
        let mut snap = Self {
            version: Self::VERSION,
            epoch,
            root,
            invitation_root,
            members,
            hash: [0u8; 32],
        };
        snap.hash = snap.compute_hash();
        snap
    }

    fn compute_hash(&self) -> [u8; 32] {
        let version = self.version.to_le_bytes();
        let epoch = self.epoch.as_u64().to_le_bytes();
        let count = (self.members.len() as u64).to_le_bytes();
        let mut parts: Vec<&[u8]> = vec![
            &version[..],
            &epoch[..],
            &self.root.as_bytes()[..],
            &self.invitation_root.as_bytes()[..],
            &count[..],
        ];
        parts.extend(self.members.iter().map(|m| m.as_bytes().as_slice()));
        blake2b_256_multi(&parts)
    }

    /// Verify the snapshot hash matches its contents.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(self).map_err(|e| LedgerError::InvalidSnapshot(e.to_string()))
    }

    /// Deserialize a snapshot from bytes. The hash is not checked here.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        bincode::deserialize(bytes).map_err(|e| LedgerError::InvalidSnapshot(e.to_string()))
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
