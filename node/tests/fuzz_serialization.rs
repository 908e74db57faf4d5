//! Property-based tests for the byte boundaries of the relay host.
//!
//! Arbitrary input at the host boundary must either be rejected cleanly or
//! accepted without disturbing committed state, and persisted snapshots must
//! survive a bincode roundtrip for arbitrary valid contents.

use proptest::prelude::*;

use relay_ledger::LedgerSnapshot;
use relay_node::{NodeError, RelayConfig, RelayHost};
use relay_nullables::NullCommittee;
use relay_types::{Address, Epoch, Hash256};

// ---------------------------------------------------------------------------
// Proptest strategies
// ---------------------------------------------------------------------------

fn arb_address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::new)
}

fn arb_hash() -> impl Strategy<Value = Hash256> {
    any::<[u8; 32]>().prop_map(Hash256::new)
}

fn arb_snapshot() -> impl Strategy<Value = LedgerSnapshot> {
    (
        any::<u64>(),
        arb_hash(),
        arb_hash(),
        prop::collection::vec(arb_address(), 0..40),
    )
        .prop_map(|(epoch, root, invitation_root, members)| {
            LedgerSnapshot::create(Epoch::new(epoch), root, invitation_root, members)
        })
}

fn genesis_host(c: &NullCommittee) -> RelayHost {
    let indices = [0, 1, 2, 3];
    RelayHost::new(
        RelayConfig::default(),
        c.root(&indices).as_bytes(),
        Hash256::ZERO.as_bytes(),
        Some(c.address_batch(&indices).as_slice()),
    )
    .expect("genesis")
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn snapshot_bincode_roundtrip(snapshot in arb_snapshot()) {
        let bytes = snapshot.to_bytes().unwrap();
        let decoded = LedgerSnapshot::from_bytes(&bytes).unwrap();
        prop_assert!(decoded.verify());
        prop_assert_eq!(decoded, snapshot);
    }

    #[test]
    fn random_signature_bytes_never_commit(bytes in prop::collection::vec(any::<u8>(), 0..2000)) {
        let c = NullCommittee::new(5);
        let mut host = genesis_host(&c);
        host.init_relay(c.root(&[1, 2, 3, 4]).as_bytes()).unwrap();
        host.relay_state(&c.address_batch(&[1, 2, 3, 4])).unwrap();
        host.finish_state().unwrap();

        match host.relay_signatures(&bytes) {
            Ok(report) => {
                prop_assert_eq!(bytes.len() % 96, 0);
                prop_assert_eq!(report.accepted, 0);
            }
            Err(NodeError::Decode(_)) => prop_assert_ne!(bytes.len() % 96, 0),
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
        prop_assert!(host.finish_signatures().is_err());
        prop_assert_eq!(host.epoch(), 0);
    }

    #[test]
    fn random_address_batches_never_seal_wrong_root(bytes in prop::collection::vec(any::<u8>(), 0..400)) {
        let c = NullCommittee::new(5);
        let mut host = genesis_host(&c);
        host.init_relay(c.root(&[1, 2, 3, 4]).as_bytes()).unwrap();
        if host.relay_state(&bytes).is_ok() {
            prop_assert!(host.finish_state().is_err());
        }
        prop_assert_eq!(host.root(), c.root(&[0, 1, 2, 3]));
    }

    #[test]
    fn random_snapshot_bytes_are_rejected(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        if let Ok(snapshot) = LedgerSnapshot::from_bytes(&bytes) {
            prop_assert!(!snapshot.verify());
        }
    }
}
