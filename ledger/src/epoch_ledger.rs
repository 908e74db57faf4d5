//! The epoch ledger: authoritative identity state and the relay state machine.
//!
//! ```text
//!  Initializing --finish_init--> Idle(0)
//!
//!  Idle(n) --init_relay--> StateBuilding --finish_state--> SignatureBuilding
//!     ^                        |  ^  relay_state*             |  relay_signatures*
//!     |                        |  '---------------------------' init_relay restarts
//!     |                        '-- seal mismatch --> Idle(n)  |
//!     '------------------ finish_signatures (quorum) ---------'  => Idle(n+1)
//! ```
//!
//! A second, single-step entry point (`relay_state_signed`) lets each signer
//! submit the whole candidate list with one signature. It shares the digest,
//! the quorum accounting, and the commit routine with the batched path.
//! Approvals count per candidate list, not per address: members who sign
//! different lists do not pool their approvals. Each member backs at most one
//! candidate at a time, so single-step staging never outgrows the current
//! identity set.

use relay_types::{Address, Epoch, Hash256, RecoverableSignature};
use std::collections::HashMap;
use std::fmt;

use crate::assembler::{BatchAssembler, SealedBatch};
use crate::error::LedgerError;
use crate::genesis::GenesisConfig;
use crate::identity::IdentitySet;
use crate::quorum::{meets_threshold, quorum_size, recover_member, QuorumValidator, SignatureReport};
use crate::revocation::{RevocationProcessor, RevocationRequest};
use crate::snapshot::LedgerSnapshot;

/// Externally visible phase of the ledger's state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayPhase {
    /// Genesis set is being assembled in batches.
    Initializing,
    /// No relay cycle in progress.
    Idle,
    /// A relay cycle is open and collecting addresses (includes the freshly
    /// started cycle with an empty buffer).
    StateBuilding,
    /// The candidate set is sealed and signatures are being collected.
    SignatureBuilding,
}

impl fmt::Display for RelayPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Initializing => "initializing",
            Self::Idle => "idle",
            Self::StateBuilding => "state building",
            Self::SignatureBuilding => "signature building",
        };
        f.write_str(s)
    }
}

enum Phase {
    Initializing(BatchAssembler),
    Idle,
    StateBuilding(BatchAssembler),
    SignatureBuilding {
        sealed: SealedBatch,
        quorum: QuorumValidator,
    },
}

impl Phase {
    fn public(&self) -> RelayPhase {
        match self {
            Self::Initializing(_) => RelayPhase::Initializing,
            Self::Idle => RelayPhase::Idle,
            Self::StateBuilding(_) => RelayPhase::StateBuilding,
            Self::SignatureBuilding { .. } => RelayPhase::SignatureBuilding,
        }
    }
}

/// Result of one single-step relay submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimpleRelayOutcome {
    /// The candidate has not reached quorum yet.
    Pending { approvals: usize, needed: usize },
    /// The candidate was installed as this epoch.
    Committed(Epoch),
}

/// Owns the current epoch's identities and all relay staging state.
pub struct EpochLedger {
    epoch: Epoch,
    root: Hash256,
    invitation_root: Hash256,
    identities: IdentitySet,
    phase: Phase,
    /// Approvals gathered through the single-step path, keyed by digest.
    candidates: HashMap<Hash256, (SealedBatch, QuorumValidator)>,
    /// The candidate each member currently backs on the single-step path.
    ballots: HashMap<Address, Hash256>,
}

impl EpochLedger {
    /// Construct the ledger at epoch 0.
    ///
    /// With a genesis address set the commitment is checked immediately;
    /// otherwise the ledger starts in [`RelayPhase::Initializing`].
    pub fn new(genesis: GenesisConfig) -> Result<Self, LedgerError> {
        let mut ledger = Self {
            epoch: Epoch::GENESIS,
            root: genesis.root,
            invitation_root: genesis.invitation_root,
            identities: IdentitySet::empty(Epoch::GENESIS),
            phase: Phase::Initializing(BatchAssembler::begin(genesis.root)),
            candidates: HashMap::new(),
            ballots: HashMap::new(),
        };
        if let Some(addresses) = genesis.addresses {
            ledger.init_state(&addresses)?;
            ledger.finish_init()?;
        }
        Ok(ledger)
    }

    /// Restore a ledger from a verified snapshot.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self, LedgerError> {
        if !snapshot.verify() {
            return Err(LedgerError::InvalidSnapshot("hash mismatch".into()));
        }
        if snapshot.version != LedgerSnapshot::VERSION {
            return Err(LedgerError::InvalidSnapshot(format!(
                "unsupported version {}",
                snapshot.version
            )));
        }
        let epoch = snapshot.epoch;
        tracing::info!(%epoch, members = snapshot.members.len(), "ledger restored from snapshot");
        Ok(Self {
            epoch,
            root: snapshot.root,
            invitation_root: snapshot.invitation_root,
            identities: IdentitySet::from_addresses(epoch, snapshot.members),
            phase: Phase::Idle,
            candidates: HashMap::new(),
            ballots: HashMap::new(),
        })
    }

    /// Capture the committed state. Staging buffers are not included.
    pub fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError> {
        if let Phase::Initializing(_) = self.phase {
            return Err(self.out_of_order("snapshot"));
        }
        Ok(LedgerSnapshot::create(
            self.epoch,
            self.root,
            self.invitation_root,
            self.identities.sorted_members(),
        ))
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Root of the current epoch's identity set.
    pub fn root(&self) -> Hash256 {
        self.root
    }

    pub fn invitation_root(&self) -> Hash256 {
        self.invitation_root
    }

    pub fn phase(&self) -> RelayPhase {
        self.phase.public()
    }

    /// Membership lookup. Only the current epoch is authoritative; any other
    /// epoch answers `false`.
    pub fn is_identity(&self, epoch: Epoch, address: &Address) -> bool {
        epoch == self.epoch && self.identities.contains(address)
    }

    /// Number of live identities in the current epoch.
    pub fn identity_count(&self) -> usize {
        self.identities.len()
    }

    pub fn identities(&self) -> &IdentitySet {
        &self.identities
    }

    /// Distinct signers counted for the sealed candidate, if any.
    pub fn pending_tally(&self) -> Option<usize> {
        match &self.phase {
            Phase::SignatureBuilding { quorum, .. } => Some(quorum.tally()),
            _ => None,
        }
    }

    /// Number of candidate lists holding single-step approvals.
    pub fn signed_candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Digest signers must endorse for the sealed candidate, if any.
    pub fn pending_digest(&self) -> Option<Hash256> {
        match &self.phase {
            Phase::SignatureBuilding { sealed, .. } => Some(sealed.digest()),
            _ => None,
        }
    }

    // ── Batched genesis ─────────────────────────────────────────────────

    /// Append a batch of genesis addresses.
    pub fn init_state(&mut self, batch: &[Address]) -> Result<usize, LedgerError> {
        match &mut self.phase {
            Phase::Initializing(assembler) => {
                let buffered = assembler.append(batch);
                tracing::debug!(batch = batch.len(), buffered, "genesis batch appended");
                Ok(buffered)
            }
            _ => Err(self.out_of_order("init_state")),
        }
    }

    /// Seal the genesis set and make epoch 0 current.
    ///
    /// On a root mismatch the buffer is discarded and genesis assembly starts
    /// over against the same declared root.
    pub fn finish_init(&mut self) -> Result<(), LedgerError> {
        let assembler = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Initializing(assembler) => assembler,
            other => {
                self.phase = other;
                return Err(self.out_of_order("finish_init"));
            }
        };
        match assembler.seal() {
            Ok(sealed) => {
                self.identities =
                    IdentitySet::from_addresses(Epoch::GENESIS, sealed.into_addresses());
                tracing::info!(members = self.identities.len(), root = %self.root, "genesis installed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "genesis commitment mismatch");
                self.phase = Phase::Initializing(BatchAssembler::begin(self.root));
                Err(e)
            }
        }
    }

    // ── Batched relay ───────────────────────────────────────────────────

    /// Start a relay cycle towards `root`, discarding any unfinished cycle
    /// and any single-step approvals.
    pub fn init_relay(&mut self, root: Hash256) -> Result<(), LedgerError> {
        if let Phase::Initializing(_) = self.phase {
            return Err(self.out_of_order("init_relay"));
        }
        if self.phase.public() != RelayPhase::Idle {
            tracing::debug!(phase = %self.phase.public(), "abandoning unfinished relay cycle");
        }
        if !self.candidates.is_empty() {
            tracing::debug!(
                candidates = self.candidates.len(),
                "discarding single-step approvals"
            );
        }
        self.candidates.clear();
        self.ballots.clear();
        self.phase = Phase::StateBuilding(BatchAssembler::begin(root));
        tracing::debug!(epoch = %self.epoch, %root, "relay cycle started");
        Ok(())
    }

    /// Append a batch of candidate addresses.
    pub fn relay_state(&mut self, batch: &[Address]) -> Result<usize, LedgerError> {
        match &mut self.phase {
            Phase::StateBuilding(assembler) => {
                let buffered = assembler.append(batch);
                tracing::debug!(batch = batch.len(), buffered, "relay batch appended");
                Ok(buffered)
            }
            _ => Err(self.out_of_order("relay_state")),
        }
    }

    /// Seal the candidate set. Returns the digest signers must endorse.
    ///
    /// A root mismatch aborts the cycle; the current epoch stays in force and
    /// a new cycle must be started with [`init_relay`](Self::init_relay).
    pub fn finish_state(&mut self) -> Result<Hash256, LedgerError> {
        let assembler = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::StateBuilding(assembler) => assembler,
            other => {
                self.phase = other;
                return Err(self.out_of_order("finish_state"));
            }
        };
        let sealed = assembler.seal().inspect_err(|e| {
            tracing::warn!(error = %e, "relay commitment mismatch, cycle aborted");
        })?;
        let digest = sealed.digest();
        tracing::debug!(
            candidates = sealed.addresses().len(),
            %digest,
            "relay state sealed"
        );
        self.phase = Phase::SignatureBuilding {
            sealed,
            quorum: QuorumValidator::new(digest),
        };
        Ok(digest)
    }

    /// Count a batch of signatures over the sealed candidate.
    pub fn relay_signatures(
        &mut self,
        signatures: &[RecoverableSignature],
    ) -> Result<SignatureReport, LedgerError> {
        let phase = self.phase.public();
        let Phase::SignatureBuilding { quorum, .. } = &mut self.phase else {
            return Err(LedgerError::OutOfOrderCall {
                operation: "relay_signatures",
                phase,
            });
        };
        let report = quorum.accumulate(signatures, &self.identities);
        if report.unauthorized + report.invalid > 0 {
            tracing::warn!(
                unauthorized = report.unauthorized,
                invalid = report.invalid,
                "skipped relay signatures"
            );
        }
        tracing::debug!(
            accepted = report.accepted,
            tally = quorum.tally(),
            reference = self.identities.len(),
            "relay signatures accumulated"
        );
        Ok(report)
    }

    /// Commit the sealed candidate if a strict majority has signed.
    ///
    /// Without quorum nothing changes and the cycle stays open.
    pub fn finish_signatures(&mut self) -> Result<Epoch, LedgerError> {
        let have = match &self.phase {
            Phase::SignatureBuilding { quorum, .. } => quorum.tally(),
            _ => return Err(self.out_of_order("finish_signatures")),
        };
        let reference = self.identities.len();
        if !meets_threshold(have, reference) {
            return Err(LedgerError::InsufficientQuorum {
                have,
                need: quorum_size(reference),
                reference,
            });
        }
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::SignatureBuilding { sealed, .. } => Ok(self.commit(sealed, have)),
            other => {
                self.phase = other;
                Err(self.out_of_order("finish_signatures"))
            }
        }
    }

    // ── Single-step relay ───────────────────────────────────────────────

    /// Submit a full candidate list with one member's signature over it.
    ///
    /// The signer must be a current identity and must appear in the list it
    /// signed. Approvals are counted per candidate; the first candidate to
    /// reach a strict majority becomes the next epoch. Signing a different
    /// candidate moves the signer's approval there.
    pub fn relay_state_signed(
        &mut self,
        candidate: Vec<Address>,
        signature: &RecoverableSignature,
    ) -> Result<SimpleRelayOutcome, LedgerError> {
        if let Phase::Initializing(_) = self.phase {
            return Err(self.out_of_order("relay_state_signed"));
        }
        let sealed = SealedBatch::from_addresses(candidate);
        let digest = sealed.digest();
        let signer = recover_member(&digest, signature, &self.identities)?;
        if !sealed.contains(&signer) {
            return Err(LedgerError::SignerNotInCandidate(signer));
        }

        if let Some(previous) = self.ballots.insert(signer, digest) {
            if previous != digest {
                self.withdraw_approval(&previous, &signer);
            }
        }
        let (_, quorum) = self
            .candidates
            .entry(digest)
            .or_insert_with(|| (sealed, QuorumValidator::new(digest)));
        if !quorum.record(signer) {
            tracing::debug!(%signer, %digest, "repeated approval ignored");
        }
        let approvals = quorum.tally();
        let reference = self.identities.len();
        if meets_threshold(approvals, reference) {
            if let Some((sealed, _)) = self.candidates.remove(&digest) {
                self.phase = Phase::Idle;
                return Ok(SimpleRelayOutcome::Committed(self.commit(sealed, approvals)));
            }
        }
        Ok(SimpleRelayOutcome::Pending {
            approvals,
            needed: quorum_size(reference),
        })
    }

    // ── Revocation ──────────────────────────────────────────────────────

    /// Self-revocation of the request's target.
    pub fn relay_kill(
        &mut self,
        request: &RevocationRequest,
        signature: &RecoverableSignature,
    ) -> Result<Address, LedgerError> {
        let revoked = RevocationProcessor.kill(&mut self.identities, request, signature)?;
        tracing::info!(epoch = %self.epoch, %revoked, "identity revoked by itself");
        Ok(revoked)
    }

    /// Revocation of an invitee by its genesis inviter.
    pub fn relay_kill_invitee(
        &mut self,
        request: &RevocationRequest,
        signature: &RecoverableSignature,
        inviter: &Address,
        proof: &[Hash256],
    ) -> Result<Address, LedgerError> {
        let revoked = RevocationProcessor.kill_invitee(
            &mut self.identities,
            &self.invitation_root,
            request,
            signature,
            inviter,
            proof,
        )?;
        tracing::info!(epoch = %self.epoch, %revoked, %inviter, "identity revoked by inviter");
        Ok(revoked)
    }

    // ── Internals ───────────────────────────────────────────────────────

    /// Install `sealed` as the next epoch and drop all staging state.
    fn commit(&mut self, sealed: SealedBatch, signers: usize) -> Epoch {
        let next = self.epoch.next();
        let root = sealed.root();
        self.identities = IdentitySet::from_addresses(next, sealed.into_addresses());
        self.root = root;
        self.epoch = next;
        self.candidates.clear();
        self.ballots.clear();
        tracing::info!(
            epoch = %next,
            %root,
            members = self.identities.len(),
            signers,
            "epoch committed"
        );
        next
    }

    /// Remove `signer` from the candidate at `digest`, dropping the
    /// candidate once nobody backs it.
    fn withdraw_approval(&mut self, digest: &Hash256, signer: &Address) {
        let Some((_, quorum)) = self.candidates.get_mut(digest) else {
            return;
        };
        quorum.withdraw(signer);
        tracing::debug!(%signer, %digest, "single-step approval moved");
        if quorum.tally() == 0 {
            self.candidates.remove(digest);
        }
    }

    fn out_of_order(&self, operation: &'static str) -> LedgerError {
        LedgerError::OutOfOrderCall {
            operation,
            phase: self.phase.public(),
        }
    }
}
