//! STH (Signed Tree Head) verification
//!
//! The TreeHeadSignature payload of RFC 6962 §3.5: a fixed 50-byte
//! structure over the tree snapshot a log vouches for.

use crate::error::{Error, Result};
use crate::sct::{check_signature_algorithm, SignatureType, Version};
use ctlog_crypto::{CryptoEngine, DigestAlgorithm};
use ctlog_types::SignedTreeHead;
use tls_codec::{SerializeBytes, TlsSerializeBytes, TlsSize};

/// The digitally-signed struct behind a tree head signature
#[derive(PartialEq, Debug, TlsSerializeBytes, TlsSize)]
struct TreeHashPayload {
    version: Version,
    signature_type: SignatureType,
    timestamp: u64,
    tree_size: u64,
    root_hash: [u8; 32],
}

/// Reconstruct the exact byte string the log signed for this STH
pub fn sth_signed_payload(sth: &SignedTreeHead) -> Result<Vec<u8>> {
    let payload = TreeHashPayload {
        version: Version::V1,
        signature_type: SignatureType::TreeHash,
        timestamp: sth.timestamp,
        tree_size: sth.tree_size,
        root_hash: *sth.root_hash.as_bytes(),
    };
    payload
        .tls_serialize()
        .map_err(|e| Error::Payload(e.to_string()))
}

/// Verify a tree head signature against a log public key
///
/// `public_key_spki` is the log key as DER SubjectPublicKeyInfo. As with
/// SCTs, the payload digest is fixed to SHA-256. Returns `Ok(false)` for
/// a signature that simply does not verify.
pub fn verify_sth<E: CryptoEngine>(
    sth: &SignedTreeHead,
    public_key_spki: &[u8],
    engine: &E,
) -> Result<bool> {
    check_signature_algorithm(&sth.signature)?;
    let payload = sth_signed_payload(sth)?;
    let verified = engine.verify_signature(
        public_key_spki,
        &payload,
        &sth.signature.signature,
        DigestAlgorithm::Sha256,
    )?;
    Ok(verified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctlog_types::{DigitallySigned, HashAlgorithm, Sha256Hash, SignatureAlgorithm};

    #[test]
    fn payload_is_fifty_bytes_in_the_documented_order() {
        let sth = SignedTreeHead {
            tree_size: 0x0102030405060708,
            timestamp: 0x1112131415161718,
            root_hash: Sha256Hash::from_bytes([0x99; 32]),
            signature: DigitallySigned {
                hash_algorithm: HashAlgorithm::Sha256,
                signature_algorithm: SignatureAlgorithm::Ecdsa,
                signature: Vec::new(),
            },
        };
        let payload = sth_signed_payload(&sth).unwrap();

        assert_eq!(payload.len(), 50);
        assert_eq!(&payload[..2], &[0x00, 0x01]); // version, tree_hash
        assert_eq!(&payload[2..10], &sth.timestamp.to_be_bytes());
        assert_eq!(&payload[10..18], &sth.tree_size.to_be_bytes());
        assert_eq!(&payload[18..], &[0x99; 32]);
    }
}
