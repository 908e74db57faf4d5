//! Quorum accumulation over relay signatures.
//!
//! Signers endorse a digest that binds both the candidate root and the
//! candidate address list, so a quorum gathered for one candidate can never
//! be replayed against another. Each signature is recovered to an address
//! and counted once if that address is a member of the reference (previous
//! epoch) identity set. Bad entries are skipped, not fatal.

use relay_crypto::{blake2b_256_multi, recover_signer};
use relay_types::{Address, Hash256, RecoverableSignature};
use std::collections::HashSet;

use crate::error::LedgerError;
use crate::identity::IdentitySet;

/// Digest signers endorse for a candidate set.
///
/// `Blake2b-256(root || address_1 || ... || address_n)` with the addresses in
/// ascending byte order, so the digest depends on the set and not on the
/// order a relayer happened to submit it in.
pub fn relay_digest(root: &Hash256, addresses: &[Address]) -> Hash256 {
    let mut sorted: Vec<&Address> = addresses.iter().collect();
    sorted.sort_unstable();
    let mut parts: Vec<&[u8]> = Vec::with_capacity(1 + sorted.len());
    parts.push(root.as_bytes());
    parts.extend(sorted.iter().map(|a| a.as_bytes().as_slice()));
    Hash256::new(blake2b_256_multi(&parts))
}

/// Strict majority: `count * 2 > reference_size`. A tie is not enough.
pub fn meets_threshold(count: usize, reference_size: usize) -> bool {
    count.saturating_mul(2) > reference_size
}

/// Smallest signer count that satisfies [`meets_threshold`].
pub fn quorum_size(reference_size: usize) -> usize {
    reference_size / 2 + 1
}

/// Recover the signer of `digest` and require membership in `reference`.
pub fn recover_member(
    digest: &Hash256,
    signature: &RecoverableSignature,
    reference: &IdentitySet,
) -> Result<Address, LedgerError> {
    let signer =
        recover_signer(digest.as_bytes(), signature).ok_or(LedgerError::InvalidSignature)?;
    if !reference.contains(&signer) {
        return Err(LedgerError::UnauthorizedSigner(signer));
    }
    Ok(signer)
}

/// Per-batch accounting of what happened to each submitted signature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignatureReport {
    /// Newly counted distinct signers.
    pub accepted: usize,
    /// Valid member signatures already counted earlier in the cycle.
    pub duplicates: usize,
    /// Valid signatures from addresses outside the reference set.
    pub unauthorized: usize,
    /// Signatures that did not verify.
    pub invalid: usize,
}

impl SignatureReport {
    pub fn total(&self) -> usize {
        self.accepted + self.duplicates + self.unauthorized + self.invalid
    }
}

/// Distinct signers collected for one digest.
#[derive(Clone, Debug)]
pub struct QuorumValidator {
    digest: Hash256,
    signers: HashSet<Address>,
}

impl QuorumValidator {
    pub fn new(digest: Hash256) -> Self {
        Self {
            digest,
            signers: HashSet::new(),
        }
    }

    pub fn digest(&self) -> Hash256 {
        self.digest
    }

    /// Record an already-authenticated signer. Returns `false` for repeats.
    pub fn record(&mut self, signer: Address) -> bool {
        self.signers.insert(signer)
    }

    /// Recover and count a batch of signatures against `reference`.
    pub fn accumulate(
        &mut self,
        signatures: &[RecoverableSignature],
        reference: &IdentitySet,
    ) -> SignatureReport {
        let mut report = SignatureReport::default();
        for signature in signatures {
            match recover_member(&self.digest, signature, reference) {
                Ok(signer) if self.record(signer) => report.accepted += 1,
                Ok(_) => report.duplicates += 1,
                Err(LedgerError::UnauthorizedSigner(signer)) => {
                    tracing::trace!(%signer, "skipping signature from non-member");
                    report.unauthorized += 1;
                }
                Err(_) => report.invalid += 1,
            }
        }
        report
    }

    /// Number of distinct qualifying signers so far.
    pub fn tally(&self) -> usize {
        self.signers.len()
    }

    pub fn has_signed(&self, address: &Address) -> bool {
        self.signers.contains(address)
    }

    /// Drop a previously recorded signer. Returns `false` if it never signed.
    pub fn withdraw(&mut self, signer: &Address) -> bool {
        self.signers.remove(signer)
    }
}
