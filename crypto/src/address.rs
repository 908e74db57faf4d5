//! Address derivation from public keys.
//!
//! Address = right-most 20 bytes of `Blake2b-256(public_key)`.

use relay_types::{Address, PublicKey};

/// Derive the 20-byte relay address of a public key.
pub fn derive_address(public_key: &PublicKey) -> Address {
    let hash = crate::blake2b_256(public_key.as_bytes());
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    Address::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    #[test]
    fn derive_is_deterministic() {
        let kp = keypair_from_seed(&[7u8; 32]);
        assert_eq!(derive_address(&kp.public), derive_address(&kp.public));
    }

    #[test]
    fn derive_takes_hash_suffix() {
        let kp = keypair_from_seed(&[7u8; 32]);
        let hash = crate::blake2b_256(kp.public.as_bytes());
        assert_eq!(derive_address(&kp.public).as_bytes()[..], hash[12..]);
    }

    #[test]
    fn different_keys_different_addresses() {
        let k1 = keypair_from_seed(&[1u8; 32]);
        let k2 = keypair_from_seed(&[2u8; 32]);
        assert_ne!(derive_address(&k1.public), derive_address(&k2.public));
    }
}
