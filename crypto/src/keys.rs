//! Ed25519 key derivation.

use ed25519_dalek::SigningKey;
use relay_types::{KeyPair, PrivateKey, PublicKey};

/// Derive the public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    let signing_key = SigningKey::from_bytes(&private.0);
    PublicKey(signing_key.verifying_key().to_bytes())
}

/// Reconstruct a full key pair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> KeyPair {
    let public = public_from_private(&private);
    KeyPair { public, private }
}

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed);
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_derivation_is_deterministic() {
        let a = keypair_from_seed(&[9u8; 32]);
        let b = keypair_from_seed(&[9u8; 32]);
        assert_eq!(a.public, b.public);
    }

    #[test]
    fn keypair_from_private_roundtrip() {
        let kp = keypair_from_seed(&[3u8; 32]);
        let expected = kp.public;
        let rebuilt = keypair_from_private(PrivateKey(kp.private.0));
        assert_eq!(rebuilt.public, expected);
    }

    #[test]
    fn different_seeds_different_keys() {
        let a = keypair_from_seed(&[1u8; 32]);
        let b = keypair_from_seed(&[2u8; 32]);
        assert_ne!(a.public, b.public);
    }
}
