//! Error types for ctlog-merkle

use thiserror::Error;

/// Errors that can occur in Merkle tree operations
///
/// Proof *falsity* is not an error: the `verify_*` functions return
/// `bool` so a batch run can keep going past individual failures. These
/// variants cover inputs a proof could never be computed for.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid proof shape (too long for the claimed tree)
    #[error("Invalid proof: {0}")]
    InvalidProof(String),

    /// Leaf index outside the tree
    #[error("Invalid leaf index: {0}")]
    InvalidLeafIndex(String),

    /// A leaf hash that is not part of this tree
    #[error("Unknown leaf: {0}")]
    UnknownLeaf(String),

    /// Incremental root computation resumed at an unusable size
    #[error("Invalid resume point: {0}")]
    InvalidResumePoint(String),
}

/// Result type for Merkle tree operations
pub type Result<T> = std::result::Result<T, Error>;
