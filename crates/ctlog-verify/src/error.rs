//! Error types for ctlog-verify

use thiserror::Error;

/// Errors that can occur while verifying CT signatures
///
/// An invalid signature is NOT an error: `verify_*` return `Ok(false)`
/// for it. These variants cover inputs that could not be checked at all.
#[derive(Error, Debug)]
pub enum Error {
    /// The signed payload could not be serialized
    #[error("failed to serialize signed payload: {0}")]
    Payload(String),

    /// A signature algorithm verification cannot handle
    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The keyring has no key for the SCT's log id
    #[error("no key for log id {0}")]
    UnknownLog(String),

    /// Engine failure (malformed key, unsupported key type)
    #[error(transparent)]
    Crypto(#[from] ctlog_crypto::Error),
}

/// Result type for verification operations
pub type Result<T> = std::result::Result<T, Error>;
