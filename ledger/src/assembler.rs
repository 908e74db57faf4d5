//! Commit-then-reveal batch assembly.
//!
//! A relayer declares the target root with [`BatchAssembler::begin`], feeds
//! the address set through any number of [`append`](BatchAssembler::append)
//! calls, and finally [`seal`](BatchAssembler::seal)s it. Sealing consumes the
//! assembler, so nothing can be appended to a sealed set; the result is only
//! produced when the assembled addresses hash to the declared root.

use relay_crypto::merkle;
use relay_types::{Address, Hash256};

use crate::error::LedgerError;
use crate::quorum::relay_digest;

/// An open address buffer bound to a declared root.
#[derive(Clone, Debug)]
pub struct BatchAssembler {
    target: Hash256,
    buffer: Vec<Address>,
}

impl BatchAssembler {
    /// Start assembling a set that must hash to `target`.
    pub fn begin(target: Hash256) -> Self {
        Self {
            target,
            buffer: Vec::new(),
        }
    }

    pub fn target(&self) -> Hash256 {
        self.target
    }

    /// Append a batch to the buffer, returning the new buffer length.
    pub fn append(&mut self, batch: &[Address]) -> usize {
        self.buffer.extend_from_slice(batch);
        self.buffer.len()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Recompute the root over the buffer and compare it to the target.
    pub fn seal(self) -> Result<SealedBatch, LedgerError> {
        let computed = merkle::root(&self.buffer);
        if computed != self.target {
            return Err(LedgerError::CommitmentMismatch {
                expected: self.target,
                computed,
            });
        }
        Ok(SealedBatch::new(computed, self.buffer))
    }
}

/// An immutable address set whose root has been checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedBatch {
    root: Hash256,
    digest: Hash256,
    addresses: Vec<Address>,
}

impl SealedBatch {
    fn new(root: Hash256, addresses: Vec<Address>) -> Self {
        let digest = relay_digest(&root, &addresses);
        Self {
            root,
            digest,
            addresses,
        }
    }

    /// Seal a candidate list as-is, committing to whatever root it has.
    pub fn from_addresses(addresses: Vec<Address>) -> Self {
        let root = merkle::root(&addresses);
        Self::new(root, addresses)
    }

    pub fn root(&self) -> Hash256 {
        self.root
    }

    /// The digest signers must endorse for this set.
    pub fn digest(&self) -> Hash256 {
        self.digest
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.addresses.contains(address)
    }

    pub fn into_addresses(self) -> Vec<Address> {
        self.addresses
    }
}
