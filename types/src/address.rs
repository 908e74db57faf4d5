//! 20-byte identity address.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A relay identity address.
///
/// Derived from an Ed25519 public key as the right-most 20 bytes of its
/// Blake2b-256 hash (see `relay_crypto::derive_address`). The all-zero value
/// is reserved as the "absent" sentinel and is never installed as a member.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; 20]);

impl Address {
    /// Width of an encoded address in bytes.
    pub const LEN: usize = 20;

    /// The sentinel "absent" address.
    pub const ZERO: Self = Self([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Build an address from a slice, returning `None` on a width mismatch.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; 20] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x")?;
        for b in &self.0[..4] {
            write!(f, "{:02x}", b)?;
        }
        write!(f, "\u{2026})")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_full_lowercase_hex() {
        let addr = Address::new([0xAB; 20]);
        let s = addr.to_string();
        assert_eq!(s.len(), 2 + 40);
        assert!(s.starts_with("0xabab"));
    }

    #[test]
    fn from_slice_rejects_wrong_width() {
        assert!(Address::from_slice(&[1u8; 19]).is_none());
        assert!(Address::from_slice(&[1u8; 21]).is_none());
        assert_eq!(Address::from_slice(&[1u8; 20]), Some(Address::new([1u8; 20])));
    }

    #[test]
    fn zero_is_sentinel() {
        assert!(Address::ZERO.is_zero());
        assert!(Address::default().is_zero());
        assert!(!Address::new([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]).is_zero());
    }
}
