//! Signature verification protocol for Certificate Transparency
//!
//! Reconstructs the canonical byte payloads CT logs sign — the
//! certificate_timestamp payload behind an SCT and the tree_hash payload
//! behind an STH — and delegates the cryptographic check to a
//! `CryptoEngine`. Signature falsity is returned as data (`Ok(false)`)
//! so batch verification can continue past individual failures.

pub mod error;
pub mod sct;
pub mod sth;

pub use error::{Error, Result};
pub use sct::{sct_signed_payload, verify_sct, verify_sct_with_keyring};
pub use sth::{sth_signed_payload, verify_sth};
