//! Keyring mapping CT log ids to log public keys
//!
//! A v1 log id is the SHA-256 of the log's DER SubjectPublicKeyInfo, so
//! the keyring derives ids itself when keys are added and an SCT's
//! `log_id` field can be resolved directly.

use crate::hash::sha256;
use std::collections::HashMap;

/// Public keys of the logs a client trusts, indexed by log id
#[derive(Default)]
pub struct LogKeyring {
    keys: HashMap<[u8; 32], Vec<u8>>,
}

impl LogKeyring {
    /// Create a new empty keyring
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
        }
    }

    /// Add a log's DER SubjectPublicKeyInfo; returns the derived log id
    pub fn add_log(&mut self, spki_der: &[u8]) -> [u8; 32] {
        let log_id = sha256(spki_der);
        self.keys.insert(log_id, spki_der.to_vec());
        log_id
    }

    /// Look up a log's public key by id
    pub fn public_key(&self, log_id: &[u8; 32]) -> Option<&[u8]> {
        self.keys.get(log_id).map(Vec::as_slice)
    }

    /// Number of known logs
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
