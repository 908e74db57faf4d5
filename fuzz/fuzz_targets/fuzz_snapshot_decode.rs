#![no_main]

use libfuzzer_sys::fuzz_target;
use relay_ledger::{EpochLedger, LedgerSnapshot};

// Arbitrary snapshot bytes must never panic, and a snapshot that restores
// must report exactly the members it carried.
fuzz_target!(|data: &[u8]| {
    let Ok(snapshot) = LedgerSnapshot::from_bytes(data) else {
        return;
    };
    let verified = snapshot.verify();
    if let Ok(ledger) = EpochLedger::from_snapshot(snapshot.clone()) {
        assert!(verified);
        assert_eq!(ledger.epoch(), snapshot.epoch);
        for member in snapshot.members.iter().filter(|m| !m.is_zero()) {
            assert!(ledger.is_identity(snapshot.epoch, member));
        }
    }
});
