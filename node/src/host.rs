//! Byte-level relay host.
//!
//! [`RelayHost`] is what a host chain calls into. Every binary argument
//! arrives as a run of fixed-width items (addresses 20 bytes, hashes 32,
//! signatures 96). Inputs are decoded and checked against the configured
//! limits before the ledger is touched, so a malformed or oversized call
//! never leaves partial state behind.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use relay_ledger::{
    EpochLedger, GenesisConfig, LedgerSnapshot, RelayPhase, RevocationRequest, SignatureReport,
    SimpleRelayOutcome,
};
use relay_types::{decode_batch, decode_one, Address, Epoch, FixedWidth, Hash256, RecoverableSignature};

use crate::config::RelayConfig;
use crate::tracing_spans::{query_span, relay_call_span, snapshot_span};
use crate::NodeError;

/// Revocation request fields as they arrive from the source chain.
#[derive(Clone, Copy, Debug)]
pub struct RawRevocation<'a> {
    pub nonce: u32,
    pub epoch: u64,
    pub request_type: u8,
    /// 20-byte target address.
    pub target: &'a [u8],
    pub amount: u128,
    pub max_fee: u128,
    pub tips: u128,
    pub payload: &'a [u8],
}

/// An [`EpochLedger`] behind byte-level entry points.
pub struct RelayHost {
    config: RelayConfig,
    ledger: EpochLedger,
}

impl RelayHost {
    /// Construct the host at epoch 0.
    ///
    /// `genesis_batch` selects the small-set path; without it the host
    /// starts in [`RelayPhase::Initializing`] and expects
    /// [`init_state`](Self::init_state) calls.
    pub fn new(
        config: RelayConfig,
        genesis_root: &[u8],
        invitation_root: &[u8],
        genesis_batch: Option<&[u8]>,
    ) -> Result<Self, NodeError> {
        let root: Hash256 = decode_one(genesis_root)?;
        let invitation_root: Hash256 = decode_one(invitation_root)?;
        let genesis = match genesis_batch {
            Some(bytes) => {
                let addresses = decode_limited(bytes, config.max_addresses_per_batch)?;
                GenesisConfig::with_addresses(root, invitation_root, addresses)
            }
            None => GenesisConfig::batched(root, invitation_root),
        };
        let ledger = EpochLedger::new(genesis)?;
        tracing::info!(%root, phase = %ledger.phase(), "relay host started");
        Ok(Self { config, ledger })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn ledger(&self) -> &EpochLedger {
        &self.ledger
    }

    // ── Batched genesis ─────────────────────────────────────────────────

    pub fn init_state(&mut self, batch: &[u8]) -> Result<usize, NodeError> {
        let _span = relay_call_span("init_state", self.ledger.epoch()).entered();
        let addresses = decode_limited(batch, self.config.max_addresses_per_batch)?;
        Ok(self.ledger.init_state(&addresses)?)
    }

    pub fn finish_init(&mut self) -> Result<(), NodeError> {
        let _span = relay_call_span("finish_init", self.ledger.epoch()).entered();
        Ok(self.ledger.finish_init()?)
    }

    // ── Batched relay ───────────────────────────────────────────────────

    pub fn init_relay(&mut self, root: &[u8]) -> Result<(), NodeError> {
        let _span = relay_call_span("init_relay", self.ledger.epoch()).entered();
        let root: Hash256 = decode_one(root)?;
        Ok(self.ledger.init_relay(root)?)
    }

    pub fn relay_state(&mut self, batch: &[u8]) -> Result<usize, NodeError> {
        let _span = relay_call_span("relay_state", self.ledger.epoch()).entered();
        let addresses = decode_limited(batch, self.config.max_addresses_per_batch)?;
        Ok(self.ledger.relay_state(&addresses)?)
    }

    /// Seal the candidate; returns the digest signers must endorse.
    pub fn finish_state(&mut self) -> Result<Hash256, NodeError> {
        let _span = relay_call_span("finish_state", self.ledger.epoch()).entered();
        Ok(self.ledger.finish_state()?)
    }

    pub fn relay_signatures(&mut self, batch: &[u8]) -> Result<SignatureReport, NodeError> {
        let _span = relay_call_span("relay_signatures", self.ledger.epoch()).entered();
        let signatures: Vec<RecoverableSignature> =
            decode_limited(batch, self.config.max_signatures_per_batch)?;
        Ok(self.ledger.relay_signatures(&signatures)?)
    }

    pub fn finish_signatures(&mut self) -> Result<Epoch, NodeError> {
        let _span = relay_call_span("finish_signatures", self.ledger.epoch()).entered();
        Ok(self.ledger.finish_signatures()?)
    }

    // ── Single-step relay ───────────────────────────────────────────────

    /// Submit a whole candidate list with one signature over its digest.
    pub fn relay_state_signed(
        &mut self,
        candidate: &[u8],
        signature: &[u8],
    ) -> Result<SimpleRelayOutcome, NodeError> {
        let _span = relay_call_span("relay_state_signed", self.ledger.epoch()).entered();
        let addresses = decode_limited(candidate, self.config.max_addresses_per_batch)?;
        let signature: RecoverableSignature = decode_one(signature)?;
        Ok(self.ledger.relay_state_signed(addresses, &signature)?)
    }

    // ── Revocation ──────────────────────────────────────────────────────

    /// Self-revocation. Returns the revoked address.
    pub fn relay_kill(
        &mut self,
        request: RawRevocation<'_>,
        signature: &[u8],
    ) -> Result<Address, NodeError> {
        let _span = relay_call_span("relay_kill", self.ledger.epoch()).entered();
        let request = self.decode_request(request)?;
        let signature: RecoverableSignature = decode_one(signature)?;
        Ok(self.ledger.relay_kill(&request, &signature)?)
    }

    /// Inviter-attested revocation. `proof` is a run of 32-byte sibling
    /// hashes for the `(inviter, target)` edge.
    pub fn relay_kill_invitee(
        &mut self,
        request: RawRevocation<'_>,
        signature: &[u8],
        inviter: &[u8],
        proof: &[u8],
    ) -> Result<Address, NodeError> {
        let _span = relay_call_span("relay_kill_invitee", self.ledger.epoch()).entered();
        let request = self.decode_request(request)?;
        let signature: RecoverableSignature = decode_one(signature)?;
        let inviter: Address = decode_one(inviter)?;
        let proof: Vec<Hash256> = decode_limited(proof, self.config.max_proof_depth)?;
        Ok(self
            .ledger
            .relay_kill_invitee(&request, &signature, &inviter, &proof)?)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Whether `address` (20 bytes) is a member of `epoch`.
    pub fn is_identity(&self, epoch: u64, address: &[u8]) -> Result<bool, NodeError> {
        let _span = query_span("is_identity").entered();
        let address: Address = decode_one(address)?;
        Ok(self.ledger.is_identity(Epoch::new(epoch), &address))
    }

    pub fn epoch(&self) -> u64 {
        self.ledger.epoch().as_u64()
    }

    pub fn root(&self) -> Hash256 {
        self.ledger.root()
    }

    pub fn identity_count(&self) -> usize {
        self.ledger.identity_count()
    }

    pub fn phase(&self) -> RelayPhase {
        self.ledger.phase()
    }

    // ── Snapshots ───────────────────────────────────────────────────────

    /// Write the committed state to `path`.
    ///
    /// The file is written next to its destination and renamed into place.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<(), NodeError> {
        let path = path.as_ref();
        let _span = snapshot_span("save", path).entered();
        let snapshot = self.ledger.snapshot()?;
        let bytes = snapshot.to_bytes()?;
        let staging = staging_path(path);
        std::fs::write(&staging, &bytes)?;
        std::fs::rename(&staging, path)?;
        tracing::info!(
            epoch = %snapshot.epoch,
            members = snapshot.member_count(),
            bytes = bytes.len(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Write the committed state to the configured `snapshot_path`.
    pub fn persist(&self) -> Result<(), NodeError> {
        let path = self
            .config
            .snapshot_path
            .clone()
            .ok_or_else(|| NodeError::Config("snapshot_path is not set".into()))?;
        self.save_snapshot(path)
    }

    /// Restore a host from a snapshot file.
    pub fn load_snapshot(config: RelayConfig, path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let path = path.as_ref();
        let _span = snapshot_span("load", path).entered();
        let bytes = std::fs::read(path)?;
        let snapshot = LedgerSnapshot::from_bytes(&bytes)?;
        let ledger = EpochLedger::from_snapshot(snapshot)?;
        Ok(Self { config, ledger })
    }

    fn decode_request(&self, raw: RawRevocation<'_>) -> Result<RevocationRequest, NodeError> {
        if raw.payload.len() > self.config.max_payload_len {
            return Err(NodeError::BatchTooLarge {
                len: raw.payload.len(),
                max: self.config.max_payload_len,
            });
        }
        Ok(RevocationRequest {
            nonce: raw.nonce,
            epoch: raw.epoch,
            request_type: raw.request_type,
            target: decode_one(raw.target)?,
            amount: raw.amount,
            max_fee: raw.max_fee,
            tips: raw.tips,
            payload: raw.payload.to_vec(),
        })
    }
}

/// `path` with `.tmp` appended to its file name.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Decode a fixed-width batch and enforce an item-count limit.
fn decode_limited<T: FixedWidth>(bytes: &[u8], max: usize) -> Result<Vec<T>, NodeError> {
    let items = decode_batch::<T>(bytes)?;
    if items.len() > max {
        return Err(NodeError::BatchTooLarge {
            len: items.len(),
            max,
        });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_nullables::NullCommittee;
    use relay_types::DecodeError;

    fn host(config: RelayConfig, c: &NullCommittee, indices: &[usize]) -> RelayHost {
        RelayHost::new(
            config,
            c.root(indices).as_bytes(),
            Hash256::ZERO.as_bytes(),
            Some(c.address_batch(indices).as_slice()),
        )
        .unwrap()
    }

    #[test]
    fn misaligned_batch_changes_nothing() {
        let c = NullCommittee::new(4);
        let mut h = host(RelayConfig::default(), &c, &[0, 1, 2]);
        h.init_relay(c.root(&[1, 2, 3]).as_bytes()).unwrap();
        let mut batch = c.address_batch(&[1, 2]);
        batch.pop();
        assert!(matches!(
            h.relay_state(&batch),
            Err(NodeError::Decode(DecodeError::MisalignedBatch { len: 39, width: 20 }))
        ));
        assert_eq!(h.relay_state(&c.address_batch(&[1, 2, 3])).unwrap(), 3);
    }

    #[test]
    fn oversized_batches_are_refused() {
        let c = NullCommittee::new(6);
        let config = RelayConfig {
            max_addresses_per_batch: 2,
            max_signatures_per_batch: 1,
            ..RelayConfig::default()
        };
        let mut h = RelayHost::new(
            config,
            c.root(&[0, 1, 2]).as_bytes(),
            Hash256::ZERO.as_bytes(),
            None,
        )
        .unwrap();
        assert!(matches!(
            h.init_state(&c.address_batch(&[0, 1, 2])),
            Err(NodeError::BatchTooLarge { len: 3, max: 2 })
        ));
        h.init_state(&c.address_batch(&[0, 1])).unwrap();
        h.init_state(&c.address_batch(&[2])).unwrap();
        h.finish_init().unwrap();

        h.init_relay(c.root(&[0, 1]).as_bytes()).unwrap();
        h.relay_state(&c.address_batch(&[0, 1])).unwrap();
        let digest = h.finish_state().unwrap();
        assert!(matches!(
            h.relay_signatures(&c.signature_batch(&digest, &[0, 1])),
            Err(NodeError::BatchTooLarge { len: 2, max: 1 })
        ));
        assert_eq!(h.ledger().pending_tally(), Some(0));
    }

    #[test]
    fn wrong_width_arguments_are_decode_errors() {
        let c = NullCommittee::new(2);
        let mut h = host(RelayConfig::default(), &c, &[0, 1]);
        assert!(matches!(
            h.init_relay(&[0u8; 31]),
            Err(NodeError::Decode(DecodeError::InvalidLength { expected: 32, actual: 31 }))
        ));
        assert!(matches!(h.is_identity(0, &[0u8; 19]), Err(NodeError::Decode(_))));
        assert_eq!(h.phase(), RelayPhase::Idle);
    }

    #[test]
    fn oversized_payload_is_refused() {
        let c = NullCommittee::new(2);
        let config = RelayConfig {
            max_payload_len: 4,
            ..RelayConfig::default()
        };
        let mut h = host(config, &c, &[0, 1]);
        let target = c.address(0);
        let request = RawRevocation {
            nonce: 0,
            epoch: 0,
            request_type: 3,
            target: target.as_bytes(),
            amount: 0,
            max_fee: 0,
            tips: 0,
            payload: &[0u8; 5],
        };
        let sig = c.get(0).sign(&Hash256::ZERO).to_bytes();
        assert!(matches!(
            h.relay_kill(request, &sig),
            Err(NodeError::BatchTooLarge { len: 5, max: 4 })
        ));
        assert_eq!(h.identity_count(), 2);
    }

    #[test]
    fn staging_file_sits_beside_the_target() {
        assert_eq!(
            staging_path(Path::new("/data/ledger.snap")),
            PathBuf::from("/data/ledger.snap.tmp")
        );
        assert_eq!(
            staging_path(Path::new("/data/ledger.tmp")),
            PathBuf::from("/data/ledger.tmp.tmp")
        );
    }

    #[test]
    fn snapshot_target_may_end_in_tmp() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("ledger.tmp");
        let c = NullCommittee::new(3);
        let h = host(RelayConfig::default(), &c, &[0, 1, 2]);
        h.save_snapshot(&path).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("ledger.tmp.tmp").exists());
        let restored = RelayHost::load_snapshot(RelayConfig::default(), &path).unwrap();
        assert_eq!(restored.identity_count(), 3);
    }

    #[test]
    fn persist_requires_a_configured_path() {
        let c = NullCommittee::new(2);
        let h = host(RelayConfig::default(), &c, &[0, 1]);
        assert!(matches!(h.persist(), Err(NodeError::Config(_))));
    }
}
