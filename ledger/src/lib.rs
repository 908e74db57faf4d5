//! Epoch relay engine.
//!
//! The relay chain keeps one trusted identity set at a time. A new set is
//! adopted only when a strict majority of the current set signs a digest
//! binding the new set's Merkle root and its full address list. Sets are
//! committed root-first and revealed in bounded batches, and individual
//! identities can be revoked between epochs without a quorum.
//!
//! - [`BatchAssembler`]: commit-then-reveal address assembly
//! - [`QuorumValidator`]: deduplicated strict-majority signer accounting
//! - [`EpochLedger`]: the state machine tying everything together
//! - [`RevocationProcessor`]: self and inviter-attested revocation

pub mod assembler;
pub mod epoch_ledger;
pub mod error;
pub mod genesis;
pub mod identity;
pub mod quorum;
pub mod revocation;
pub mod snapshot;

pub use assembler::{BatchAssembler, SealedBatch};
pub use epoch_ledger::{EpochLedger, RelayPhase, SimpleRelayOutcome};
pub use error::LedgerError;
pub use genesis::GenesisConfig;
pub use identity::IdentitySet;
pub use quorum::{meets_threshold, quorum_size, recover_member, relay_digest, QuorumValidator, SignatureReport};
pub use revocation::{RequestType, RevocationProcessor, RevocationRequest};
pub use snapshot::LedgerSnapshot;
