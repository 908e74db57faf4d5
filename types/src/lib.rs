//! Fundamental types for the epoch relay.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: addresses, hashes, epochs, signer keys, and the fixed-width
//! batch codec used at the host boundary.

pub mod address;
pub mod codec;
pub mod epoch;
pub mod error;
pub mod hash;
pub mod keys;

pub use address::Address;
pub use codec::{decode_batch, decode_one, encode_batch, FixedWidth};
pub use epoch::Epoch;
pub use error::DecodeError;
pub use hash::Hash256;
pub use keys::{KeyPair, PrivateKey, PublicKey, RecoverableSignature, Signature};
