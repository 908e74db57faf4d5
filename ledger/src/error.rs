use relay_types::{Address, Hash256};
use thiserror::Error;

use crate::epoch_ledger::RelayPhase;
use crate::revocation::RequestType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("commitment mismatch: declared root {expected}, assembled root {computed}")]
    CommitmentMismatch { expected: Hash256, computed: Hash256 },

    #[error("{operation} called out of order (phase: {phase})")]
    OutOfOrderCall {
        operation: &'static str,
        phase: RelayPhase,
    },

    #[error("insufficient quorum: {have} of {reference} identities signed, need {need}")]
    InsufficientQuorum {
        have: usize,
        need: usize,
        reference: usize,
    },

    #[error("signer {0} is not an identity of the current epoch")]
    UnauthorizedSigner(Address),

    #[error("invalid signature")]
    InvalidSignature,

    #[error("signer {0} is missing from the candidate set it signed")]
    SignerNotInCandidate(Address),

    #[error("address {0} is not an identity of the current epoch")]
    NotAMember(Address),

    #[error("recovered signer {signer} does not match {expected}")]
    SignerMismatch { signer: Address, expected: Address },

    #[error("proof does not establish invitation edge {inviter} -> {invitee}")]
    InvalidEdgeProof { inviter: Address, invitee: Address },

    #[error("request type {actual} where {expected:?} was expected")]
    RequestTypeMismatch { expected: RequestType, actual: u8 },

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
