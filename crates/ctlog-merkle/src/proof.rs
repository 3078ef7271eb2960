//! Proof verification (RFC 6962-bis §2.1.3.2 and §2.1.4.2)
//!
//! Verification never sees the leaves, only hashes: a verifier replays
//! the combination steps a proof dictates and compares the result with
//! the tree head it trusts. A proof that merely fails to check out is a
//! `false`, not an error, so a monitor can sweep a batch of entries and
//! tally the failures.

use crate::error::{Error, Result};
use crate::hasher::TreeHasher;
use ctlog_types::Sha256Hash;

/// Recompute a tree head from a leaf hash and its audit path
///
/// Walks `index` and `last_node` up the tree one proof element at a
/// time; a left-position node consumes its sibling on the right, anything
/// else consumes it on the left. Returns the computed root together with
/// the final `last_node` value; the proof only spans the whole tree if
/// that value reached zero.
pub fn root_hash_from_proof<H: TreeHasher>(
    hasher: &H,
    leaf_hash: &Sha256Hash,
    leaf_index: u64,
    tree_size: u64,
    proof_hashes: &[Sha256Hash],
) -> Result<(Sha256Hash, u64)> {
    if leaf_index >= tree_size {
        return Err(Error::InvalidLeafIndex(format!(
            "leaf index {} >= tree size {}",
            leaf_index, tree_size
        )));
    }

    let mut index = leaf_index;
    let mut last_node = tree_size - 1;
    let mut root = *leaf_hash;

    for proof_hash in proof_hashes {
        if last_node == 0 {
            return Err(Error::InvalidProof(
                "proof continues past the root".to_string(),
            ));
        }

        if index & 1 == 1 || index == last_node {
            root = hasher.children(proof_hash, &root);
            if index & 1 == 0 {
                // right-edge node: climb until it has a left sibling again
                loop {
                    index >>= 1;
                    last_node >>= 1;
                    if index & 1 == 1 || index == 0 {
                        break;
                    }
                }
            }
        } else {
            root = hasher.children(&root, proof_hash);
        }

        index >>= 1;
        last_node >>= 1;
    }

    Ok((root, last_node))
}

/// Verify an inclusion proof for the leaf at `leaf_index`
///
/// True iff the proof consumes the whole tree and lands exactly on
/// `expected_root`. Out-of-range indices and mis-sized proofs verify
/// false, they never panic.
pub fn verify_inclusion_proof<H: TreeHasher>(
    hasher: &H,
    leaf_hash: &Sha256Hash,
    leaf_index: u64,
    tree_size: u64,
    proof_hashes: &[Sha256Hash],
    expected_root: &Sha256Hash,
) -> bool {
    match root_hash_from_proof(hasher, leaf_hash, leaf_index, tree_size, proof_hashes) {
        Ok((root, remaining)) => remaining == 0 && &root == expected_root,
        Err(_) => false,
    }
}

/// Verify a consistency proof between two tree heads
///
/// Recomputes both the old and the new root from the proof in one pass.
/// When the old size is a power of two its root is itself the first
/// committed subtree hash, so it seeds the walk instead of a proof
/// element.
pub fn verify_consistency_proof<H: TreeHasher>(
    hasher: &H,
    old_size: u64,
    new_size: u64,
    proof_hashes: &[Sha256Hash],
    old_root: &Sha256Hash,
    new_root: &Sha256Hash,
) -> bool {
    if old_size > new_size {
        return false;
    }
    if old_size == new_size {
        return old_root == new_root;
    }
    if old_size == 0 {
        // nothing was committed to yet, so nothing can be proven
        return false;
    }

    let mut working: Vec<Sha256Hash> = Vec::with_capacity(proof_hashes.len() + 1);
    if old_size & (old_size - 1) == 0 {
        working.push(*old_root);
    }
    working.extend_from_slice(proof_hashes);

    let seed = match working.first() {
        Some(seed) => *seed,
        None => return false,
    };

    let mut first_node = old_size - 1;
    let mut last_node = new_size - 1;
    while first_node & 1 == 1 {
        first_node >>= 1;
        last_node >>= 1;
    }

    let mut first_root = seed;
    let mut second_root = seed;

    for hash in &working[1..] {
        if last_node == 0 {
            return false;
        }

        if first_node & 1 == 1 || first_node == last_node {
            first_root = hasher.children(hash, &first_root);
            second_root = hasher.children(hash, &second_root);
            if first_node & 1 == 0 {
                loop {
                    first_node >>= 1;
                    last_node >>= 1;
                    if first_node & 1 == 1 || first_node == 0 {
                        break;
                    }
                }
            }
        } else {
            second_root = hasher.children(&second_root, hash);
        }

        first_node >>= 1;
        last_node >>= 1;
    }

    &first_root == old_root && &second_root == new_root && last_node == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Sha256TreeHasher;

    #[test]
    fn single_leaf_tree_verifies_with_empty_proof() {
        let h = Sha256TreeHasher;
        let leaf = h.leaf(b"single leaf");
        assert!(verify_inclusion_proof(&h, &leaf, 0, 1, &[], &leaf));
    }

    #[test]
    fn two_leaf_tree_verifies_both_sides() {
        let h = Sha256TreeHasher;
        let hash0 = h.leaf(b"leaf 0");
        let hash1 = h.leaf(b"leaf 1");
        let root = h.children(&hash0, &hash1);
        assert!(verify_inclusion_proof(&h, &hash0, 0, 2, &[hash1], &root));
        assert!(verify_inclusion_proof(&h, &hash1, 1, 2, &[hash0], &root));
    }

    #[test]
    fn four_leaf_tree_verifies_every_position() {
        let h = Sha256TreeHasher;
        let leaf: Vec<_> = (0..4).map(|i| h.leaf(format!("leaf {i}").as_bytes())).collect();
        let h01 = h.children(&leaf[0], &leaf[1]);
        let h23 = h.children(&leaf[2], &leaf[3]);
        let root = h.children(&h01, &h23);

        assert!(verify_inclusion_proof(&h, &leaf[0], 0, 4, &[leaf[1], h23], &root));
        assert!(verify_inclusion_proof(&h, &leaf[1], 1, 4, &[leaf[0], h23], &root));
        assert!(verify_inclusion_proof(&h, &leaf[2], 2, 4, &[leaf[3], h01], &root));
        assert!(verify_inclusion_proof(&h, &leaf[3], 3, 4, &[leaf[2], h01], &root));
    }

    #[test]
    fn out_of_range_index_verifies_false() {
        let h = Sha256TreeHasher;
        let leaf = h.leaf(b"test");
        assert!(!verify_inclusion_proof(&h, &leaf, 1, 1, &[], &leaf));
        assert!(!verify_inclusion_proof(&h, &leaf, 0, 0, &[], &leaf));
    }

    #[test]
    fn wrong_root_verifies_false() {
        let h = Sha256TreeHasher;
        let leaf = h.leaf(b"test");
        let wrong = Sha256Hash::from_bytes([0u8; 32]);
        assert!(!verify_inclusion_proof(&h, &leaf, 0, 1, &[], &wrong));
    }

    #[test]
    fn short_proof_verifies_false() {
        let h = Sha256TreeHasher;
        let hash0 = h.leaf(b"leaf 0");
        let hash1 = h.leaf(b"leaf 1");
        let root = h.children(&hash0, &hash1);
        assert!(!verify_inclusion_proof(&h, &hash0, 0, 2, &[], &root));
    }

    #[test]
    fn over_long_proof_is_an_error_from_root_computation() {
        let h = Sha256TreeHasher;
        let leaf = h.leaf(b"leaf");
        let extra = h.leaf(b"extra");
        assert!(matches!(
            root_hash_from_proof(&h, &leaf, 0, 1, &[extra]),
            Err(Error::InvalidProof(_))
        ));
    }

    #[test]
    fn consistency_of_identical_heads_is_trivial() {
        let h = Sha256TreeHasher;
        let root = h.leaf(b"root");
        let other = h.leaf(b"other");
        assert!(verify_consistency_proof(&h, 7, 7, &[], &root, &root));
        assert!(!verify_consistency_proof(&h, 7, 7, &[], &root, &other));
    }

    #[test]
    fn shrinking_tree_verifies_false() {
        let h = Sha256TreeHasher;
        let root = h.leaf(b"root");
        assert!(!verify_consistency_proof(&h, 2, 1, &[], &root, &root));
    }

    #[test]
    fn empty_old_tree_verifies_false() {
        let h = Sha256TreeHasher;
        let root = h.leaf(b"root");
        assert!(!verify_consistency_proof(&h, 0, 1, &[], &h.empty_root(), &root));
    }
}
