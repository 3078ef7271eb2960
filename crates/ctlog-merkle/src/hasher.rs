//! Merkle tree hashing
//!
//! RFC 6962 domain separation: leaf hashes are computed over
//! `0x00 || data`, interior nodes over `0x01 || left || right`, so a leaf
//! can never be confused with a node. The hasher is passed explicitly to
//! every tree operation; nothing in this crate reaches for a global
//! crypto engine.

use ctlog_types::Sha256Hash;
use sha2::{Digest, Sha256};

/// Prefix for leaf nodes in RFC 6962 Merkle tree
pub const LEAF_HASH_PREFIX: u8 = 0x00;

/// Prefix for internal nodes in RFC 6962 Merkle tree
pub const NODE_HASH_PREFIX: u8 = 0x01;

/// Hash size in bytes (SHA-256)
pub const HASH_SIZE: usize = 32;

/// The digest capability a Merkle tree needs
pub trait TreeHasher {
    /// Root of the empty tree: the digest of the empty string
    fn empty_root(&self) -> Sha256Hash;

    /// Hash a leaf: digest(0x00 || data)
    fn leaf(&self, data: &[u8]) -> Sha256Hash;

    /// Hash two children: digest(0x01 || left || right)
    fn children(&self, left: &Sha256Hash, right: &Sha256Hash) -> Sha256Hash;
}

/// SHA-256 tree hasher, the algorithm every production CT log runs
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256TreeHasher;

impl TreeHasher for Sha256TreeHasher {
    fn empty_root(&self) -> Sha256Hash {
        Sha256Hash::from_bytes(Sha256::digest([]).into())
    }

    fn leaf(&self, data: &[u8]) -> Sha256Hash {
        let mut hasher = Sha256::new();
        hasher.update([LEAF_HASH_PREFIX]);
        hasher.update(data);
        Sha256Hash::from_bytes(hasher.finalize().into())
    }

    fn children(&self, left: &Sha256Hash, right: &Sha256Hash) -> Sha256Hash {
        let mut hasher = Sha256::new();
        hasher.update([NODE_HASH_PREFIX]);
        hasher.update(left.as_slice());
        hasher.update(right.as_slice());
        Sha256Hash::from_bytes(hasher.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_root_is_sha256_of_nothing() {
        let expected = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
        assert_eq!(Sha256TreeHasher.empty_root().to_hex(), expected);
    }

    #[test]
    fn leaf_uses_zero_prefix() {
        let data = b"test";
        let hash = Sha256TreeHasher.leaf(data);

        let mut prefixed = vec![LEAF_HASH_PREFIX];
        prefixed.extend_from_slice(data);
        let expected: [u8; 32] = Sha256::digest(&prefixed).into();
        assert_eq!(hash.as_bytes(), &expected);

        // and differs from the raw digest
        let raw: [u8; 32] = Sha256::digest(data).into();
        assert_ne!(hash.as_bytes(), &raw);
    }

    #[test]
    fn children_order_matters() {
        let left = Sha256TreeHasher.leaf(b"left");
        let right = Sha256TreeHasher.leaf(b"right");
        assert_ne!(
            Sha256TreeHasher.children(&left, &right),
            Sha256TreeHasher.children(&right, &left)
        );
    }
}
