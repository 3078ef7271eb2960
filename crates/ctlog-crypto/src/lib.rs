//! Cryptographic backend for CT verification
//!
//! This crate implements the hash/sign delegate the rest of the
//! workspace is parameterized over: digests and asymmetric signature
//! verification via aws-lc-rs, a log keyring, and a small ECDSA P-256
//! signer for driving the verification path in tests.

pub mod engine;
pub mod error;
pub mod hash;
pub mod keyring;
pub mod signing;

pub use engine::{AwsLcEngine, CryptoEngine, DigestAlgorithm};
pub use error::{Error, Result};
pub use hash::{sha256, sha384, sha512};
pub use keyring::LogKeyring;
pub use signing::{KeyPair, Signature};
