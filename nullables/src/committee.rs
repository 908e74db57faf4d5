//! Nullable committee: a fixed roster of deterministic identities.

use relay_crypto::merkle;
use relay_types::{encode_batch, Address, Hash256, RecoverableSignature};

use crate::NullIdentity;

/// A roster of `NullIdentity` signers addressed by index.
pub struct NullCommittee {
    members: Vec<NullIdentity>,
}

impl NullCommittee {
    /// Create identities `0..size`.
    pub fn new(size: u32) -> Self {
        Self {
            members: (0..size).map(NullIdentity::from_index).collect(),
        }
    }

    pub fn get(&self, index: usize) -> &NullIdentity {
        &self.members[index]
    }

    pub fn address(&self, index: usize) -> Address {
        self.members[index].address()
    }

    /// Addresses of the selected members, in the given order.
    pub fn addresses(&self, indices: &[usize]) -> Vec<Address> {
        indices.iter().map(|&i| self.address(i)).collect()
    }

    /// Merkle root over the selected members.
    pub fn root(&self, indices: &[usize]) -> Hash256 {
        merkle::root(&self.addresses(indices))
    }

    /// Concatenated address bytes of the selected members.
    pub fn address_batch(&self, indices: &[usize]) -> Vec<u8> {
        encode_batch(&self.addresses(indices))
    }

    /// Signatures over `digest` from the selected members.
    pub fn sign_all(&self, digest: &Hash256, indices: &[usize]) -> Vec<RecoverableSignature> {
        indices.iter().map(|&i| self.members[i].sign(digest)).collect()
    }

    /// Concatenated signature bytes over `digest` from the selected members.
    pub fn signature_batch(&self, digest: &Hash256, indices: &[usize]) -> Vec<u8> {
        encode_batch(&self.sign_all(digest, indices))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_batch_width() {
        let c = NullCommittee::new(4);
        assert_eq!(c.address_batch(&[0, 1, 2]).len(), 3 * Address::LEN);
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn root_matches_merkle_root() {
        let c = NullCommittee::new(3);
        assert_eq!(c.root(&[0, 1, 2]), merkle::root(&c.addresses(&[2, 0, 1])));
    }
}
