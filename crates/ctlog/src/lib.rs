//! Certificate Transparency client verification core
//!
//! One crate pulling together the pieces a monitor, auditor, or TLS
//! client needs to check what a CT log claims:
//!
//! - [`types`]: the RFC 6962 / 6962-bis wire codec and record types
//! - [`merkle`]: tree heads, audit paths, and proof verification
//! - [`crypto`]: the digest/signature engine backing verification
//! - [`verify`]: SCT and STH signature checks
//!
//! ```
//! use ctlog::merkle::{verify_inclusion_proof, MerkleTree, Sha256TreeHasher};
//!
//! let tree = MerkleTree::from_entries((0..7).map(|i| format!("entry {i}")));
//! let root = tree.root_hash();
//! let proof = tree.proof_by_index(2).unwrap();
//! let leaf_hash = tree.leaf_hashes()[2];
//!
//! assert!(verify_inclusion_proof(
//!     &Sha256TreeHasher,
//!     &leaf_hash,
//!     2,
//!     7,
//!     &proof,
//!     &root,
//! ));
//! ```

pub use ctlog_crypto as crypto;
pub use ctlog_merkle as merkle;
pub use ctlog_types as types;
pub use ctlog_verify as verify;

pub use ctlog_crypto::{AwsLcEngine, CryptoEngine, DigestAlgorithm, LogKeyring};
pub use ctlog_merkle::{MerkleTree, Sha256TreeHasher, TreeHasher};
pub use ctlog_types::{
    MerkleTreeLeaf, Sha256Hash, SignedCertificateTimestamp, SignedTreeHead, TimestampedEntry,
    TransItem,
};
pub use ctlog_verify::{verify_sct, verify_sct_with_keyring, verify_sth};
