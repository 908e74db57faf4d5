//! Identity revocation between epochs.
//!
//! Two request forms are accepted, both checked against the live mapping of
//! the current epoch and applied immediately (no quorum, no epoch change):
//!
//! - **Kill**: the identity revokes itself; the recovered signer must be the
//!   target.
//! - **Kill invitee**: the inviter revokes someone it invited at genesis; the
//!   recovered signer must be the claimed inviter and a Merkle proof must tie
//!   `(inviter, target)` to the immutable invitation root.

use relay_crypto::{blake2b_256, merkle};
use relay_types::{Address, Hash256, RecoverableSignature};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::identity::IdentitySet;

/// Source-chain transaction type codes understood by the relay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RequestType {
    Kill = 3,
    KillInvitee = 10,
}

impl RequestType {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            3 => Some(Self::Kill),
            10 => Some(Self::KillInvitee),
            _ => None,
        }
    }
}

/// A revocation request as signed on the source chain.
///
/// Only `request_type` and `target` drive validation; the remaining fields
/// are carried so the signed digest matches what the signer actually signed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationRequest {
    pub nonce: u32,
    pub epoch: u64,
    pub request_type: u8,
    pub target: Address,
    pub amount: u128,
    pub max_fee: u128,
    pub tips: u128,
    pub payload: Vec<u8>,
}

impl RevocationRequest {
    /// Compute the bytes that are signed.
    ///
    /// Format: `nonce_le || epoch_le || type || target || amount_le || max_fee_le || tips_le || payload_len_le (u64) || payload`
    pub fn signing_data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(4 + 8 + 1 + 20 + 16 * 3 + 8 + self.payload.len());
        data.extend_from_slice(&self.nonce.to_le_bytes());
        data.extend_from_slice(&self.epoch.to_le_bytes());
        data.push(self.request_type);
        data.extend_from_slice(self.target.as_bytes());
        data.extend_from_slice(&self.amount.to_le_bytes());
        data.extend_from_slice(&self.max_fee.to_le_bytes());
        data.extend_from_slice(&self.tips.to_le_bytes());
        data.extend_from_slice(&(self.payload.len() as u64).to_le_bytes());
        data.extend_from_slice(&self.payload);
        data
    }

    /// Blake2b-256 of [`signing_data`](Self::signing_data).
    pub fn digest(&self) -> Hash256 {
        Hash256::new(blake2b_256(&self.signing_data()))
    }

    fn expect_type(&self, expected: RequestType) -> Result<(), LedgerError> {
        if self.request_type != expected.code() {
            return Err(LedgerError::RequestTypeMismatch {
                expected,
                actual: self.request_type,
            });
        }
        Ok(())
    }

    fn signer(&self, signature: &RecoverableSignature) -> Result<Address, LedgerError> {
        relay_crypto::recover_signer(self.digest().as_bytes(), signature)
            .ok_or(LedgerError::InvalidSignature)
    }
}

/// Validates revocation requests and clears membership flags.
pub struct RevocationProcessor;

impl RevocationProcessor {
    /// Apply a self-revocation. Returns the revoked address.
    pub fn kill(
        &self,
        identities: &mut IdentitySet,
        request: &RevocationRequest,
        signature: &RecoverableSignature,
    ) -> Result<Address, LedgerError> {
        request.expect_type(RequestType::Kill)?;
        let signer = request.signer(signature)?;
        if signer != request.target {
            return Err(LedgerError::SignerMismatch {
                signer,
                expected: request.target,
            });
        }
        Self::clear(identities, request.target)
    }

    /// Apply an inviter-attested revocation. Returns the revoked address.
    pub fn kill_invitee(
        &self,
        identities: &mut IdentitySet,
        invitation_root: &Hash256,
        request: &RevocationRequest,
        signature: &RecoverableSignature,
        inviter: &Address,
        proof: &[Hash256],
    ) -> Result<Address, LedgerError> {
        request.expect_type(RequestType::KillInvitee)?;
        let signer = request.signer(signature)?;
        if signer != *inviter {
            return Err(LedgerError::SignerMismatch {
                signer,
                expected: *inviter,
            });
        }
        let edge = merkle::edge_hash(inviter, &request.target);
        if !merkle::verify(invitation_root, &edge, proof) {
            return Err(LedgerError::InvalidEdgeProof {
                inviter: *inviter,
                invitee: request.target,
            });
        }
        Self::clear(identities, request.target)
    }

    fn clear(identities: &mut IdentitySet, target: Address) -> Result<Address, LedgerError> {
        if !identities.revoke(&target) {
            return Err(LedgerError::NotAMember(target));
        }
        Ok(target)
    }
}
