//! The hash/sign delegate CT verification runs against
//!
//! Every verification entry point takes an engine argument; there is no
//! process-wide crypto singleton. The stock implementation wraps
//! aws-lc-rs and understands the key types production CT logs use:
//! ECDSA on P-256/P-384 and RSA PKCS#1 v1.5.

use crate::error::{Error, Result};
use crate::hash::{sha256, sha384, sha512};
use aws_lc_rs::signature::{
    UnparsedPublicKey, VerificationAlgorithm, ECDSA_P256_SHA256_ASN1, ECDSA_P384_SHA384_ASN1,
    RSA_PKCS1_2048_8192_SHA256, RSA_PKCS1_2048_8192_SHA384, RSA_PKCS1_2048_8192_SHA512,
};
use const_oid::db::rfc5912::{ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_256_R_1, SECP_384_R_1};
use const_oid::ObjectIdentifier;
use der::Decode;
use spki::SubjectPublicKeyInfoRef;

/// Digest algorithms the delegate can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

/// The capability object CT verification is parameterized over
pub trait CryptoEngine {
    /// Digest `data` with the named algorithm
    fn digest(&self, algorithm: DigestAlgorithm, data: &[u8]) -> Vec<u8>;

    /// Verify `signature` over `payload` with a DER SubjectPublicKeyInfo
    ///
    /// A mathematically invalid signature is `Ok(false)`; a key or
    /// algorithm the engine cannot work with is an error.
    fn verify_signature(
        &self,
        public_key_spki: &[u8],
        payload: &[u8],
        signature: &[u8],
        digest: DigestAlgorithm,
    ) -> Result<bool>;
}

/// aws-lc-rs backed engine
#[derive(Debug, Default, Clone, Copy)]
pub struct AwsLcEngine;

/// Pick the aws-lc-rs verification algorithm for a key/digest pair
fn verification_algorithm(
    spki: &SubjectPublicKeyInfoRef<'_>,
    digest: DigestAlgorithm,
) -> Result<&'static dyn VerificationAlgorithm> {
    let alg_oid = spki.algorithm.oid;

    if alg_oid == ID_EC_PUBLIC_KEY {
        let params = spki.algorithm.parameters.as_ref().ok_or_else(|| {
            Error::InvalidKeyFormat("EC key is missing its curve parameters".to_string())
        })?;
        let curve_oid = ObjectIdentifier::from_bytes(params.value())
            .map_err(|e| Error::InvalidKeyFormat(format!("failed to parse EC curve OID: {e}")))?;

        if curve_oid == SECP_256_R_1 && digest == DigestAlgorithm::Sha256 {
            return Ok(&ECDSA_P256_SHA256_ASN1);
        }
        if curve_oid == SECP_384_R_1 && digest == DigestAlgorithm::Sha384 {
            return Ok(&ECDSA_P384_SHA384_ASN1);
        }
        return Err(Error::UnsupportedAlgorithm(format!(
            "EC curve {curve_oid} with digest {digest:?}"
        )));
    }

    if alg_oid == RSA_ENCRYPTION {
        return Ok(match digest {
            DigestAlgorithm::Sha256 => &RSA_PKCS1_2048_8192_SHA256,
            DigestAlgorithm::Sha384 => &RSA_PKCS1_2048_8192_SHA384,
            DigestAlgorithm::Sha512 => &RSA_PKCS1_2048_8192_SHA512,
        });
    }

    Err(Error::UnsupportedAlgorithm(format!(
        "public key algorithm {alg_oid}"
    )))
}

impl CryptoEngine for AwsLcEngine {
    fn digest(&self, algorithm: DigestAlgorithm, data: &[u8]) -> Vec<u8> {
        match algorithm {
            DigestAlgorithm::Sha256 => sha256(data).to_vec(),
            DigestAlgorithm::Sha384 => sha384(data).to_vec(),
            DigestAlgorithm::Sha512 => sha512(data).to_vec(),
        }
    }

    fn verify_signature(
        &self,
        public_key_spki: &[u8],
        payload: &[u8],
        signature: &[u8],
        digest: DigestAlgorithm,
    ) -> Result<bool> {
        let spki = SubjectPublicKeyInfoRef::from_der(public_key_spki)
            .map_err(|e| Error::InvalidKeyFormat(format!("failed to parse SPKI: {e}")))?;

        let algorithm = verification_algorithm(&spki, digest)?;
        let key_bytes = spki.subject_public_key.raw_bytes();

        let key = UnparsedPublicKey::new(algorithm, key_bytes);
        match key.verify(payload, signature) {
            Ok(()) => Ok(true),
            Err(_) => {
                tracing::debug!(payload_len = payload.len(), "signature did not verify");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::KeyPair;

    #[test]
    fn verifies_a_fresh_signature() {
        let kp = KeyPair::generate_ecdsa_p256().unwrap();
        let spki = kp.public_key_to_der().unwrap();
        let payload = b"payload bytes";
        let sig = kp.sign(payload).unwrap();

        let ok = AwsLcEngine
            .verify_signature(&spki, payload, sig.as_bytes(), DigestAlgorithm::Sha256)
            .unwrap();
        assert!(ok);
    }

    #[test]
    fn wrong_payload_is_false_not_an_error() {
        let kp = KeyPair::generate_ecdsa_p256().unwrap();
        let spki = kp.public_key_to_der().unwrap();
        let sig = kp.sign(b"payload bytes").unwrap();

        let ok = AwsLcEngine
            .verify_signature(&spki, b"other bytes", sig.as_bytes(), DigestAlgorithm::Sha256)
            .unwrap();
        assert!(!ok);
    }

    #[test]
    fn p256_key_with_sha384_is_unsupported() {
        let kp = KeyPair::generate_ecdsa_p256().unwrap();
        let spki = kp.public_key_to_der().unwrap();
        let result =
            AwsLcEngine.verify_signature(&spki, b"payload", &[0u8; 64], DigestAlgorithm::Sha384);
        assert!(matches!(result, Err(Error::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn garbage_key_is_an_error() {
        let result = AwsLcEngine.verify_signature(
            &[0xde, 0xad, 0xbe, 0xef],
            b"payload",
            &[0u8; 64],
            DigestAlgorithm::Sha256,
        );
        assert!(matches!(result, Err(Error::InvalidKeyFormat(_))));
    }

    #[test]
    fn digest_dispatch() {
        let engine = AwsLcEngine;
        assert_eq!(engine.digest(DigestAlgorithm::Sha256, b"x").len(), 32);
        assert_eq!(engine.digest(DigestAlgorithm::Sha384, b"x").len(), 48);
        assert_eq!(engine.digest(DigestAlgorithm::Sha512, b"x").len(), 64);
    }
}
