//! Cryptographic primitives for the epoch relay.
//!
//! - **Ed25519** for signing and signer recovery (public key travels with the signature)
//! - **Blake2b-256** for every hash: leaves, tree nodes, relay digests
//! - **Sorted-pair Merkle trees** committing to address sets and invitation edges
//! - Address derivation: right-most 20 bytes of `Blake2b-256(public_key)`

pub mod address;
pub mod hash;
pub mod keys;
pub mod merkle;
pub mod sign;

pub use address::derive_address;
pub use hash::{blake2b_256, blake2b_256_multi, hash256};
pub use keys::{keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{recover_signer, sign_message, sign_recoverable, verify_signature};
