//! Stateful Merkle tree over a sequence of leaf hashes
//!
//! `MerkleTree` caches the interior node levels so they can be inspected
//! (and so repeated proof generation does not re-derive the pyramid).
//! The cache is never patched in place: any change to the leaf sequence
//! rebuilds it into fresh storage and swaps, so a reader observes either
//! the old tree or the new one, never a half-built level.

use crate::error::{Error, Result};
use crate::hasher::{Sha256TreeHasher, TreeHasher};
use crate::path::{audit_path, consistency_proof, merkle_tree_hash};
use crate::proof::{root_hash_from_proof, verify_inclusion_proof};
use ctlog_types::Sha256Hash;

/// A Merkle tree with cached node levels
///
/// Level 0 holds the first round of pairwise merges over the leaf
/// hashes; each following level halves again. A dangling node at an odd
/// level end is promoted into the next level unmerged, mirroring how the
/// recursive tree head splits at the largest power of two.
#[derive(Debug, Clone)]
pub struct MerkleTree<H: TreeHasher = Sha256TreeHasher> {
    hasher: H,
    leaf_hashes: Vec<Sha256Hash>,
    levels: Vec<Vec<Sha256Hash>>,
}

fn merge_level<H: TreeHasher>(hasher: &H, level: &[Sha256Hash]) -> Vec<Sha256Hash> {
    level
        .chunks_exact(2)
        .map(|pair| hasher.children(&pair[0], &pair[1]))
        .collect()
}

fn build_levels<H: TreeHasher>(hasher: &H, leaf_hashes: &[Sha256Hash]) -> Vec<Vec<Sha256Hash>> {
    let mut current = merge_level(hasher, leaf_hashes);
    if leaf_hashes.len() % 2 == 1 {
        current.push(leaf_hashes[leaf_hashes.len() - 1]);
    }

    let mut levels: Vec<Vec<Sha256Hash>> = Vec::new();
    loop {
        if current.len() <= 1 {
            levels.push(current);
            return levels;
        }
        let mut next = merge_level(hasher, &current);
        if current.len() % 2 == 1 {
            if let Some(promoted) = current.pop() {
                next.push(promoted);
            }
        }
        levels.push(current);
        current = next;
    }
}

impl MerkleTree<Sha256TreeHasher> {
    /// Build a tree over hashes that were already leaf-hashed
    pub fn from_leaf_hashes(leaf_hashes: Vec<Sha256Hash>) -> Self {
        Self::with_hasher(Sha256TreeHasher, leaf_hashes)
    }

    /// Build a tree over raw leaf encodings, hashing each with the
    /// 0x00 leaf prefix
    pub fn from_entries<I, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let hasher = Sha256TreeHasher;
        let leaf_hashes = entries
            .into_iter()
            .map(|entry| hasher.leaf(entry.as_ref()))
            .collect();
        Self::with_hasher(hasher, leaf_hashes)
    }
}

impl<H: TreeHasher> MerkleTree<H> {
    pub fn with_hasher(hasher: H, leaf_hashes: Vec<Sha256Hash>) -> Self {
        let levels = build_levels(&hasher, &leaf_hashes);
        MerkleTree {
            hasher,
            leaf_hashes,
            levels,
        }
    }

    /// Number of leaves
    pub fn len(&self) -> usize {
        self.leaf_hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaf_hashes.is_empty()
    }

    pub fn leaf_hashes(&self) -> &[Sha256Hash] {
        &self.leaf_hashes
    }

    /// The cached interior levels, bottom-up; the last level holds the
    /// root for any non-empty tree
    pub fn node_levels(&self) -> &[Vec<Sha256Hash>] {
        &self.levels
    }

    /// The tree head over the current leaf sequence
    pub fn root_hash(&self) -> Sha256Hash {
        match self.levels.last().and_then(|level| level.first()) {
            Some(root) => *root,
            None => self.hasher.empty_root(),
        }
    }

    /// Append leaves; the node cache is rebuilt from scratch and swapped
    /// in whole
    pub fn append(&mut self, new_leaf_hashes: &[Sha256Hash]) {
        let mut all = Vec::with_capacity(self.leaf_hashes.len() + new_leaf_hashes.len());
        all.extend_from_slice(&self.leaf_hashes);
        all.extend_from_slice(new_leaf_hashes);
        let levels = build_levels(&self.hasher, &all);
        self.leaf_hashes = all;
        self.levels = levels;
    }

    /// Audit path for the leaf at `index`
    pub fn proof_by_index(&self, index: usize) -> Result<Vec<Sha256Hash>> {
        audit_path(&self.hasher, index, &self.leaf_hashes)
    }

    /// Audit path for a leaf hash, if it is in this tree
    pub fn proof_by_hash(&self, hash: &Sha256Hash) -> Result<Vec<Sha256Hash>> {
        let index = self
            .leaf_hashes
            .iter()
            .position(|leaf| leaf == hash)
            .ok_or_else(|| Error::UnknownLeaf(format!("no leaf with hash {}", hash.to_hex())))?;
        self.proof_by_index(index)
    }

    pub fn verify_proof_by_index(
        &self,
        index: usize,
        tree_size: u64,
        root_hash: &Sha256Hash,
        proof: &[Sha256Hash],
    ) -> bool {
        match self.leaf_hashes.get(index) {
            Some(leaf_hash) => verify_inclusion_proof(
                &self.hasher,
                leaf_hash,
                index as u64,
                tree_size,
                proof,
                root_hash,
            ),
            None => false,
        }
    }

    pub fn verify_proof_by_hash(
        &self,
        hash: &Sha256Hash,
        tree_size: u64,
        root_hash: &Sha256Hash,
        proof: &[Sha256Hash],
    ) -> bool {
        match self.leaf_hashes.iter().position(|leaf| leaf == hash) {
            Some(index) => self.verify_proof_by_index(index, tree_size, root_hash, proof),
            None => false,
        }
    }

    /// Consistency proof against this tree's earlier state of `size`
    /// leaves
    pub fn consistency(&self, size: usize) -> Vec<Sha256Hash> {
        consistency_proof(&self.hasher, size, &self.leaf_hashes)
    }

    /// Recompute a tree head from one of this tree's leaves and an
    /// externally supplied audit path
    pub fn root_hash_by_proof(
        &self,
        index: usize,
        tree_size: u64,
        proof: &[Sha256Hash],
    ) -> Result<(Sha256Hash, u64)> {
        let leaf_hash = self.leaf_hashes.get(index).ok_or_else(|| {
            Error::InvalidLeafIndex(format!(
                "leaf index {} >= tree size {}",
                index,
                self.leaf_hashes.len()
            ))
        })?;
        root_hash_from_proof(&self.hasher, leaf_hash, index as u64, tree_size, proof)
    }

    /// Recompute the root without the cache; used to cross-check the
    /// cached pyramid in tests
    pub fn computed_root_hash(&self) -> Sha256Hash {
        merkle_tree_hash(&self.hasher, &self.leaf_hashes)
    }
}
