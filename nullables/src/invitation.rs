//! Nullable invitation tree for inviter-attested revocation tests.

use relay_crypto::merkle;
use relay_types::{encode_batch, Address, Hash256};

/// A fixed set of `(inviter, invitee)` edges committed at genesis.
#[derive(Clone, Debug, Default)]
pub struct NullInvitationTree {
    edges: Vec<(Address, Address)>,
}

impl NullInvitationTree {
    pub fn new(edges: Vec<(Address, Address)>) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &[(Address, Address)] {
        &self.edges
    }

    pub fn root(&self) -> Hash256 {
        merkle::edge_root(&self.edges)
    }

    /// Sibling path for an edge, `None` if the pair was never invited.
    pub fn proof(&self, inviter: &Address, invitee: &Address) -> Option<Vec<Hash256>> {
        merkle::edge_proof(&self.edges, inviter, invitee)
    }

    /// The proof as concatenated 32-byte hashes, ready for the host.
    pub fn proof_bytes(&self, inviter: &Address, invitee: &Address) -> Option<Vec<u8>> {
        self.proof(inviter, invitee).map(|p| encode_batch(&p))
    }
}
