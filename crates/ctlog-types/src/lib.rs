//! Record types and binary codec for Certificate Transparency
//!
//! This crate turns the raw bytes exchanged with CT logs into typed,
//! immutable records and back: RFC 6962 v1 leaves, SCTs and tree heads,
//! and the RFC 6962-bis v2 `TransItem` family. Everything on the wire is
//! big-endian with explicit length prefixes; any structural violation
//! aborts the whole decode with an error naming the record and field.
//!
//! Cryptography lives elsewhere: hashing and signature checks are the
//! `ctlog-merkle` and `ctlog-verify` crates' business, and X.509
//! certificate bodies pass through this codec as opaque DER.

pub mod encoding;
pub mod error;
pub mod leaf;
pub mod sct;
pub mod sth;
pub mod v2;
pub mod wire;

pub use encoding::Sha256Hash;
pub use error::{Error, Result};
pub use leaf::{LogEntryType, MerkleTreeLeaf, PreCert, SignedEntry, TimestampedEntry};
pub use sct::{DigitallySigned, HashAlgorithm, SignatureAlgorithm, SignedCertificateTimestamp};
pub use sth::SignedTreeHead;
pub use v2::{
    ConsistencyProofDataV2, Extension, InclusionProofDataV2, SignedCertificateTimestampDataV2,
    SignedTreeHeadDataV2, TimestampedCertificateEntryDataV2, TransItem, TreeHeadDataV2,
};

// The OID type used for v2 log ids, re-exported so callers do not need a
// direct `der` dependency.
pub use der::asn1::ObjectIdentifier;
