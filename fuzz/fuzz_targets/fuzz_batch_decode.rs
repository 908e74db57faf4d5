#![no_main]

use libfuzzer_sys::fuzz_target;
use relay_types::{decode_batch, encode_batch, Address, Hash256, RecoverableSignature};

// Decoding arbitrary bytes as any batch kind never panics, rejects exactly
// the misaligned lengths, and re-encodes to the same bytes when it succeeds.
fuzz_target!(|data: &[u8]| {
    match decode_batch::<Address>(data) {
        Ok(items) => assert_eq!(encode_batch(&items), data),
        Err(_) => assert_ne!(data.len() % Address::LEN, 0),
    }

    match decode_batch::<Hash256>(data) {
        Ok(items) => {
            assert_eq!(encode_batch(&items), data);
            // Treat the input as an invitation proof: folding must not panic.
            let _ = relay_crypto::merkle::verify(&Hash256::ZERO, &Hash256::ZERO, &items);
        }
        Err(_) => assert_ne!(data.len() % Hash256::LEN, 0),
    }

    if let Ok(signatures) = decode_batch::<RecoverableSignature>(data) {
        for signature in &signatures {
            let _ = relay_crypto::recover_signer(b"fuzz", signature);
        }
    }
});
