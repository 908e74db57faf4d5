use criterion::{black_box, criterion_group, criterion_main, Criterion};
use relay_types::Address;

fn addresses(n: usize) -> Vec<Address> {
    (0..n)
        .map(|i| {
            let mut bytes = [0u8; 20];
            bytes[..8].copy_from_slice(&(i as u64).to_le_bytes());
            bytes[19] = 1;
            Address::new(bytes)
        })
        .collect()
}

fn merkle_root_1k_bench(c: &mut Criterion) {
    let set = addresses(1_000);

    c.bench_function("merkle_root_1k", |b| {
        b.iter(|| relay_crypto::merkle::root(black_box(&set)))
    });
}

fn merkle_proof_verify_bench(c: &mut Criterion) {
    let set = addresses(1_000);
    let root = relay_crypto::merkle::root(&set);
    let leaf = relay_crypto::merkle::leaf_hash(&set[500]);
    let proof = relay_crypto::merkle::proof(&set, &set[500]).unwrap_or_default();

    c.bench_function("merkle_verify_1k", |b| {
        b.iter(|| relay_crypto::merkle::verify(&root, black_box(&leaf), &proof))
    });
}

fn recover_signer_bench(c: &mut Criterion) {
    let kp = relay_crypto::keypair_from_seed(&[42u8; 32]);
    let digest = [7u8; 32];
    let sig = relay_crypto::sign_recoverable(&digest, &kp);

    c.bench_function("recover_signer", |b| {
        b.iter(|| relay_crypto::recover_signer(black_box(&digest), &sig))
    });
}

fn blake2b_256_bench(c: &mut Criterion) {
    let data = [0xABu8; 256];

    c.bench_function("blake2b_256_256B", |b| {
        b.iter(|| relay_crypto::blake2b_256(black_box(&data)))
    });
}

criterion_group!(
    benches,
    merkle_root_1k_bench,
    merkle_proof_verify_bench,
    recover_signer_bench,
    blake2b_256_bench,
);
criterion_main!(benches);
