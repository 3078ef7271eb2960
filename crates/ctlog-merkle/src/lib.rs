//! RFC 6962 Merkle tree proof engine for Certificate Transparency
//!
//! Tree heads, audit paths, and consistency proofs over an ordered
//! sequence of leaf hashes, plus a stateful `MerkleTree` wrapper with a
//! cached node pyramid. All proof arithmetic follows RFC 6962-bis; the
//! digest is supplied through the `TreeHasher` trait, with SHA-256 as
//! the stock implementation.

pub mod error;
pub mod hasher;
pub mod path;
pub mod proof;
pub mod tree;

pub use error::{Error, Result};
pub use hasher::{Sha256TreeHasher, TreeHasher, HASH_SIZE, LEAF_HASH_PREFIX, NODE_HASH_PREFIX};
pub use path::{audit_path, consistency_proof, merkle_tree_hash, root_hash_from_entries};
pub use proof::{root_hash_from_proof, verify_consistency_proof, verify_inclusion_proof};
pub use tree::MerkleTree;
