//! Key and signature types for relay signers.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 32]);

/// A 32-byte Ed25519 private key (secret scalar).
///
/// Does not implement `Debug` or `Clone`. Key bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub [u8; 32]);

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

/// An Ed25519 key pair (public + private).
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

/// A signature that carries the signer's public key, so the signing address
/// can be recovered from the signature and the signed digest alone.
///
/// Wire layout: `public_key (32) || signature (64)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub public: PublicKey,
    pub signature: Signature,
}

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Signature {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl RecoverableSignature {
    /// Width of an encoded recoverable signature in bytes.
    pub const LEN: usize = 96;

    pub fn new(public: PublicKey, signature: Signature) -> Self {
        Self { public, signature }
    }

    /// Parse the 96-byte wire form. Returns `None` on a width mismatch.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::LEN {
            return None;
        }
        let mut public = [0u8; 32];
        let mut signature = [0u8; 64];
        public.copy_from_slice(&bytes[..32]);
        signature.copy_from_slice(&bytes[32..]);
        Some(Self {
            public: PublicKey(public),
            signature: Signature(signature),
        })
    }

    pub fn to_bytes(&self) -> [u8; 96] {
        let mut out = [0u8; 96];
        out[..32].copy_from_slice(&self.public.0);
        out[32..].copy_from_slice(&self.signature.0);
        out
    }
}
