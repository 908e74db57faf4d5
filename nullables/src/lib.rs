//! Nullable infrastructure for deterministic testing.
//!
//! Real signers live off-chain and hold their own keys. Tests need
//! reproducible signers instead, so this crate derives Ed25519 identities
//! from fixed seeds and offers helpers that produce the exact byte batches
//! the relay host accepts.

pub mod committee;
pub mod identity;
pub mod invitation;

pub use committee::NullCommittee;
pub use identity::NullIdentity;
pub use invitation::NullInvitationTree;
