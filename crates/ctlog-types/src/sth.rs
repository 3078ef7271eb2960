//! Signed Tree Heads
//!
//! A v1 STH arrives as individual get-sth response fields rather than as
//! one wire blob; only its `tree_head_signature` field carries a binary
//! structure. The byte string the log actually signed is reconstructed by
//! the verification layer.

use crate::encoding::Sha256Hash;
use crate::error::Result;
use crate::sct::DigitallySigned;
use base64::Engine;

/// SignedTreeHead (v1): a log's signed snapshot of its current tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTreeHead {
    pub tree_size: u64,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub root_hash: Sha256Hash,
    pub signature: DigitallySigned,
}

impl SignedTreeHead {
    pub fn new(
        tree_size: u64,
        timestamp: u64,
        root_hash: Sha256Hash,
        signature: DigitallySigned,
    ) -> Self {
        SignedTreeHead {
            tree_size,
            timestamp,
            root_hash,
            signature,
        }
    }

    /// Build an STH from the get-sth response fields, after the caller
    /// has pulled them out of the JSON envelope
    pub fn from_api_fields(
        tree_size: u64,
        timestamp: u64,
        sha256_root_hash: &str,
        tree_head_signature: &str,
    ) -> Result<Self> {
        let root_hash = Sha256Hash::from_base64(sha256_root_hash)?;
        let signature_bytes = base64::engine::general_purpose::STANDARD
            .decode(tree_head_signature)
            .map_err(|e| {
                crate::error::Error::InvalidEncoding(format!(
                    "invalid base64 tree_head_signature: {}",
                    e
                ))
            })?;
        let signature = DigitallySigned::from_wire(&signature_bytes)?;
        Ok(SignedTreeHead {
            tree_size,
            timestamp,
            root_hash,
            signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sct::{HashAlgorithm, SignatureAlgorithm};

    #[test]
    fn from_api_fields_decodes_signature_blob() {
        use base64::Engine as _;
        let engine = base64::engine::general_purpose::STANDARD;
        let signature = DigitallySigned {
            hash_algorithm: HashAlgorithm::Sha256,
            signature_algorithm: SignatureAlgorithm::Ecdsa,
            signature: vec![0x30, 0x03, 0x02, 0x01, 0x00],
        };
        let root = Sha256Hash::from_bytes([0x42; 32]);

        let sth = SignedTreeHead::from_api_fields(
            1024,
            1_600_000_000_000,
            &root.to_base64(),
            &engine.encode(signature.to_wire().unwrap()),
        )
        .unwrap();

        assert_eq!(sth.tree_size, 1024);
        assert_eq!(sth.root_hash, root);
        assert_eq!(sth.signature, signature);
    }

    #[test]
    fn bad_root_hash_is_rejected() {
        assert!(SignedTreeHead::from_api_fields(1, 1, "not base64!!", "AAAA").is_err());
    }
}
