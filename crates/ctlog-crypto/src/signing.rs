//! Key generation and signing using aws-lc-rs
//!
//! CT clients only verify, but an ephemeral key pair is the cheapest way
//! to exercise the verification path end to end, so a minimal ECDSA
//! P-256 signer ships here alongside the engine.

use crate::error::{Error, Result};
use aws_lc_rs::{
    rand::SystemRandom,
    signature::{EcdsaKeyPair, KeyPair as AwsKeyPair, ECDSA_P256_SHA256_ASN1_SIGNING},
};
use const_oid::db::rfc5912::{ID_EC_PUBLIC_KEY, SECP_256_R_1};
use der::asn1::BitString;
use der::Encode;
use spki::{AlgorithmIdentifier, SubjectPublicKeyInfo};

/// A cryptographic signature (ASN.1 DER for ECDSA)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// An ECDSA P-256 key pair, the signature scheme of most production logs
pub struct KeyPair {
    inner: EcdsaKeyPair,
}

impl KeyPair {
    /// Generate a new ECDSA P-256 key pair
    pub fn generate_ecdsa_p256() -> Result<Self> {
        let rng = SystemRandom::new();
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &rng)
            .map_err(|_| Error::KeyGeneration("failed to generate ECDSA P-256 key".to_string()))?;
        let inner = EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, pkcs8.as_ref())?;
        Ok(KeyPair { inner })
    }

    /// Sign data; the digest is SHA-256 and the output a DER
    /// ECDSA-Sig-Value, matching the signature bytes logs emit
    pub fn sign(&self, data: &[u8]) -> Result<Signature> {
        let rng = SystemRandom::new();
        let sig = self
            .inner
            .sign(&rng, data)
            .map_err(|_| Error::Signing("ECDSA signing failed".to_string()))?;
        Ok(Signature::new(sig.as_ref().to_vec()))
    }

    /// The uncompressed EC point
    pub fn public_key_bytes(&self) -> &[u8] {
        self.inner.public_key().as_ref()
    }

    /// The public key as DER SubjectPublicKeyInfo, the form log key
    /// distribution uses (and the input a log id is hashed from)
    pub fn public_key_to_der(&self) -> Result<Vec<u8>> {
        let alg_id = AlgorithmIdentifier {
            oid: ID_EC_PUBLIC_KEY,
            parameters: Some(
                der::Any::encode_from(&SECP_256_R_1).map_err(|e| Error::Der(e.to_string()))?,
            ),
        };

        let spki = SubjectPublicKeyInfo {
            algorithm: alg_id,
            subject_public_key: BitString::from_bytes(self.public_key_bytes())
                .map_err(|e| Error::Der(e.to_string()))?,
        };

        spki.to_der().map_err(|e| Error::Der(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AwsLcEngine, CryptoEngine, DigestAlgorithm};

    #[test]
    fn sign_then_verify() {
        let kp = KeyPair::generate_ecdsa_p256().unwrap();
        let data = b"test data";
        let sig = kp.sign(data).unwrap();

        let spki = kp.public_key_to_der().unwrap();
        assert!(AwsLcEngine
            .verify_signature(&spki, data, sig.as_bytes(), DigestAlgorithm::Sha256)
            .unwrap());
    }

    #[test]
    fn tampered_signature_fails() {
        let kp = KeyPair::generate_ecdsa_p256().unwrap();
        let data = b"test data";
        let mut sig = kp.sign(data).unwrap().into_bytes();
        let last = sig.len() - 1;
        sig[last] ^= 0x01;

        let spki = kp.public_key_to_der().unwrap();
        assert!(!AwsLcEngine
            .verify_signature(&spki, data, &sig, DigestAlgorithm::Sha256)
            .unwrap());
    }

    #[test]
    fn spki_starts_with_a_der_sequence() {
        let kp = KeyPair::generate_ecdsa_p256().unwrap();
        let spki = kp.public_key_to_der().unwrap();
        assert_eq!(spki[0], 0x30);
    }
}
