//! Error types for ctlog-types

use thiserror::Error;

/// Errors that can occur while decoding or encoding CT wire structures
///
/// Decode errors always identify the record and the field at which the
/// input stopped making sense; a failed decode never yields a partially
/// populated record.
#[derive(Error, Debug)]
pub enum Error {
    /// Input ended before the field could be read in full
    #[error("{record}: truncated stream while reading {field}")]
    Truncated {
        record: &'static str,
        field: &'static str,
    },

    /// A type or enum tag with no defined meaning
    #[error("{record}: unknown {field} value {value}")]
    UnknownTag {
        record: &'static str,
        field: &'static str,
        value: u64,
    },

    /// An algorithm byte outside the registered set
    #[error("{record}: unsupported algorithm byte {value} for {field}")]
    UnsupportedAlgorithm {
        record: &'static str,
        field: &'static str,
        value: u8,
    },

    /// A declared length that disagrees with the content it frames
    #[error("{record}: length mismatch for {field}: {detail}")]
    LengthMismatch {
        record: &'static str,
        field: &'static str,
        detail: String,
    },

    /// A field too large for its wire length prefix
    #[error("{record}: {field} does not fit its length prefix: {detail}")]
    LengthOverflow {
        record: &'static str,
        field: &'static str,
        detail: String,
    },

    /// An embedded DER structure (OBJECT IDENTIFIER) that failed to parse
    #[error("{record}: invalid DER in {field}: {detail}")]
    Der {
        record: &'static str,
        field: &'static str,
        detail: String,
    },

    /// Bytes left over after the final field of a record
    #[error("{record}: {count} trailing bytes after end of structure")]
    TrailingBytes { record: &'static str, count: usize },

    /// Invalid hex/base64 input or a hash of the wrong size
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, Error>;
