//! Sorted-pair Merkle commitment over address sets.
//!
//! - leaf hash = `Blake2b-256(address)`
//! - edge leaf = `Blake2b-256(inviter || invitee)`
//! - node hash = `Blake2b-256(min(a, b) || max(a, b))`
//!
//! Because pairs are sorted before hashing, a proof is just the list of
//! sibling hashes; no left/right positions are needed. Leaf hashes are also
//! sorted before the tree is built, so the root only depends on the multiset
//! of leaves, not on their order. An unpaired node at the end of a level is
//! promoted unchanged, and the root of an empty set is [`Hash256::ZERO`].
//!
//! The zero address hashes like any other leaf. Callers that pad with it must
//! never treat it as a real address.

use relay_types::{Address, Hash256};

use crate::blake2b_256_multi;

/// Hash an address into a leaf.
pub fn leaf_hash(address: &Address) -> Hash256 {
    Hash256::new(crate::blake2b_256(address.as_bytes()))
}

/// Hash an `(inviter, invitee)` edge into a leaf.
pub fn edge_hash(inviter: &Address, invitee: &Address) -> Hash256 {
    Hash256::new(blake2b_256_multi(&[inviter.as_bytes(), invitee.as_bytes()]))
}

/// Order-independent parent hash of two nodes.
pub fn hash_pair(a: &Hash256, b: &Hash256) -> Hash256 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Hash256::new(blake2b_256_multi(&[lo.as_bytes(), hi.as_bytes()]))
}

fn next_level(level: &[Hash256]) -> Vec<Hash256> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [a, b] => hash_pair(a, b),
            _ => pair[0],
        })
        .collect()
}

/// Root over pre-hashed leaves.
pub fn root_from_hashes(mut leaves: Vec<Hash256>) -> Hash256 {
    if leaves.is_empty() {
        return Hash256::ZERO;
    }
    leaves.sort_unstable();
    let mut level = leaves;
    while level.len() > 1 {
        level = next_level(&level);
    }
    level[0]
}

/// Root over a list of addresses.
pub fn root(addresses: &[Address]) -> Hash256 {
    root_from_hashes(addresses.iter().map(leaf_hash).collect())
}

/// Inclusion proof for `leaf` among pre-hashed leaves.
///
/// Returns `None` if the leaf is not in the set.
pub fn proof_from_hashes(mut leaves: Vec<Hash256>, leaf: &Hash256) -> Option<Vec<Hash256>> {
    leaves.sort_unstable();
    let mut index = leaves.binary_search(leaf).ok()?;
    let mut level = leaves;
    let mut proof = Vec::new();
    while level.len() > 1 {
        if let Some(sibling) = level.get(index ^ 1) {
            proof.push(*sibling);
        }
        level = next_level(&level);
        index /= 2;
    }
    Some(proof)
}

/// Inclusion proof for `address` in `addresses`.
pub fn proof(addresses: &[Address], address: &Address) -> Option<Vec<Hash256>> {
    proof_from_hashes(addresses.iter().map(leaf_hash).collect(), &leaf_hash(address))
}

/// Root over a list of `(inviter, invitee)` edges.
pub fn edge_root(edges: &[(Address, Address)]) -> Hash256 {
    root_from_hashes(edges.iter().map(|(a, b)| edge_hash(a, b)).collect())
}

/// Inclusion proof for the `(inviter, invitee)` edge.
pub fn edge_proof(
    edges: &[(Address, Address)],
    inviter: &Address,
    invitee: &Address,
) -> Option<Vec<Hash256>> {
    proof_from_hashes(
        edges.iter().map(|(a, b)| edge_hash(a, b)).collect(),
        &edge_hash(inviter, invitee),
    )
}

/// Check that `leaf` is committed under `root` by folding `proof`.
pub fn verify(root: &Hash256, leaf: &Hash256, proof: &[Hash256]) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |node, sibling| hash_pair(&node, sibling));
    computed == *root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    #[test]
    fn empty_root_is_zero() {
        assert_eq!(root(&[]), Hash256::ZERO);
    }

    #[test]
    fn single_leaf_root_is_leaf_hash() {
        let a = addr(1);
        assert_eq!(root(&[a]), leaf_hash(&a));
        assert!(verify(&root(&[a]), &leaf_hash(&a), &[]));
    }

    #[test]
    fn two_leaf_root_is_sorted_pair() {
        let (a, b) = (addr(1), addr(2));
        let expected = hash_pair(&leaf_hash(&a), &leaf_hash(&b));
        assert_eq!(root(&[a, b]), expected);
        assert_eq!(root(&[b, a]), expected);
    }

    #[test]
    fn hash_pair_is_symmetric() {
        let x = Hash256::new([1u8; 32]);
        let y = Hash256::new([2u8; 32]);
        assert_eq!(hash_pair(&x, &y), hash_pair(&y, &x));
    }

    #[test]
    fn every_member_has_a_valid_proof() {
        let set: Vec<Address> = (1..=7).map(addr).collect();
        let r = root(&set);
        for a in &set {
            let p = proof(&set, a).expect("member");
            assert!(verify(&r, &leaf_hash(a), &p), "proof failed for {a}");
        }
    }

    #[test]
    fn non_member_has_no_proof() {
        let set: Vec<Address> = (1..=4).map(addr).collect();
        assert!(proof(&set, &addr(9)).is_none());
    }

    #[test]
    fn proof_does_not_transfer_to_other_leaf() {
        let set: Vec<Address> = (1..=4).map(addr).collect();
        let r = root(&set);
        let p = proof(&set, &addr(1)).unwrap();
        assert!(!verify(&r, &leaf_hash(&addr(9)), &p));
    }

    #[test]
    fn duplicates_still_prove() {
        let set = vec![addr(1), addr(2), addr(2), addr(3)];
        let r = root(&set);
        let p = proof(&set, &addr(2)).unwrap();
        assert!(verify(&r, &leaf_hash(&addr(2)), &p));
        assert_ne!(r, root(&[addr(1), addr(2), addr(3)]));
    }

    #[test]
    fn sentinel_hashes_like_a_real_address() {
        let with_zero = root(&[addr(1), Address::ZERO]);
        let without = root(&[addr(1)]);
        assert_ne!(with_zero, without);
        assert_eq!(with_zero, root(&[Address::ZERO, addr(1)]));
    }

    #[test]
    fn edge_proofs_verify() {
        let edges = vec![(addr(1), addr(2)), (addr(1), addr(3)), (addr(4), addr(5))];
        let r = edge_root(&edges);
        let p = edge_proof(&edges, &addr(1), &addr(3)).unwrap();
        assert!(verify(&r, &edge_hash(&addr(1), &addr(3)), &p));
        // Direction matters: the reversed edge is a different leaf.
        assert!(!verify(&r, &edge_hash(&addr(3), &addr(1)), &p));
        assert!(edge_proof(&edges, &addr(2), &addr(5)).is_none());
    }
}
