//! Nullable identity: a signer whose key is derived from an index.

use relay_crypto::{blake2b_256_multi, derive_address, keypair_from_seed, sign_recoverable};
use relay_types::{Address, Hash256, KeyPair, RecoverableSignature};

/// A deterministic signer for tests.
///
/// The same index always yields the same key pair and address.
pub struct NullIdentity {
    index: u32,
    keypair: KeyPair,
    address: Address,
}

impl NullIdentity {
    pub fn from_index(index: u32) -> Self {
        let seed = blake2b_256_multi(&[b"null-identity", &index.to_le_bytes()]);
        let keypair = keypair_from_seed(&seed);
        let address = derive_address(&keypair.public);
        Self {
            index,
            keypair,
            address,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn keypair(&self) -> &KeyPair {
        &self.keypair
    }

    /// Sign a 32-byte digest.
    pub fn sign(&self, digest: &Hash256) -> RecoverableSignature {
        sign_recoverable(digest.as_bytes(), &self.keypair)
    }
}

impl std::fmt::Debug for NullIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NullIdentity")
            .field("index", &self.index)
            .field("address", &self.address)
            .finish()
    }
}
