//! SCT (Signed Certificate Timestamp) verification
//!
//! A log never signs the SCT structure itself; it signs a reconstructed
//! `digitally-signed` payload covering the timestamped entry. The
//! payload layout here must match the log byte for byte or every
//! signature check fails, so it is built with `tls_codec` structs that
//! mirror the RFC 6962 §3.2 definition exactly.

use crate::error::{Error, Result};
use ctlog_crypto::{CryptoEngine, DigestAlgorithm, LogKeyring};
use ctlog_types::{DigitallySigned, SignatureAlgorithm, SignedCertificateTimestamp, SignedEntry};
use tls_codec::{SerializeBytes, TlsByteVecU16, TlsByteVecU24, TlsSerializeBytes, TlsSize};

/// Version as defined in RFC 6962
#[derive(PartialEq, Debug, TlsSerializeBytes, TlsSize)]
#[repr(u8)]
pub(crate) enum Version {
    V1 = 0,
}

/// SignatureType as defined in RFC 6962
#[derive(PartialEq, Debug, TlsSerializeBytes, TlsSize)]
#[repr(u8)]
pub(crate) enum SignatureType {
    CertificateTimestamp = 0,
    TreeHash = 1,
}

/// PreCert body inside the signed payload
#[derive(PartialEq, Debug, TlsSerializeBytes, TlsSize)]
struct PreCertPayload {
    issuer_key_hash: [u8; 32],
    tbs_certificate: TlsByteVecU24,
}

/// The type-selected `signed_entry` field: a u16 entry type followed by
/// a u24-length certificate for X.509 entries or a raw PreCert body for
/// precert entries
#[derive(PartialEq, Debug, TlsSerializeBytes, TlsSize)]
#[repr(u16)]
enum SignedEntryPayload {
    #[tls_codec(discriminant = 0)]
    X509(TlsByteVecU24),
    #[tls_codec(discriminant = 1)]
    Precert(PreCertPayload),
}

/// The digitally-signed struct behind an SCT signature
#[derive(PartialEq, Debug, TlsSerializeBytes, TlsSize)]
struct CertificateTimestampPayload {
    version: Version,
    signature_type: SignatureType,
    timestamp: u64,
    entry: SignedEntryPayload,
    extensions: TlsByteVecU16,
}

/// Reconstruct the exact byte string the log signed for this SCT over
/// the given entry
pub fn sct_signed_payload(
    sct: &SignedCertificateTimestamp,
    entry: &SignedEntry,
) -> Result<Vec<u8>> {
    let entry = match entry {
        SignedEntry::X509(cert) => SignedEntryPayload::X509(cert.as_slice().into()),
        SignedEntry::Precert(precert) => SignedEntryPayload::Precert(PreCertPayload {
            issuer_key_hash: precert.issuer_key_hash,
            tbs_certificate: precert.tbs_certificate.as_slice().into(),
        }),
    };

    let payload = CertificateTimestampPayload {
        version: Version::V1,
        signature_type: SignatureType::CertificateTimestamp,
        timestamp: sct.timestamp,
        entry,
        extensions: sct.extensions.as_slice().into(),
    };

    payload
        .tls_serialize()
        .map_err(|e| Error::Payload(e.to_string()))
}

pub(crate) fn check_signature_algorithm(signature: &DigitallySigned) -> Result<()> {
    match signature.signature_algorithm {
        SignatureAlgorithm::Ecdsa | SignatureAlgorithm::Rsa => Ok(()),
        other => Err(Error::UnsupportedAlgorithm(format!(
            "{other:?} signatures cannot be verified"
        ))),
    }
}

/// Verify an SCT over `entry` against a log public key
///
/// `public_key_spki` is the log key as DER SubjectPublicKeyInfo. The
/// payload digest is always SHA-256: CT v1 fixes it, independent of the
/// `hash_algorithm` byte recorded inside `DigitallySigned`. Returns
/// `Ok(false)` for a signature that simply does not verify.
pub fn verify_sct<E: CryptoEngine>(
    sct: &SignedCertificateTimestamp,
    entry: &SignedEntry,
    public_key_spki: &[u8],
    engine: &E,
) -> Result<bool> {
    check_signature_algorithm(&sct.signature)?;
    let payload = sct_signed_payload(sct, entry)?;
    let verified = engine.verify_signature(
        public_key_spki,
        &payload,
        &sct.signature.signature,
        DigestAlgorithm::Sha256,
    )?;
    Ok(verified)
}

/// Verify an SCT, resolving the log key from a keyring by the SCT's
/// `log_id`
pub fn verify_sct_with_keyring<E: CryptoEngine>(
    sct: &SignedCertificateTimestamp,
    entry: &SignedEntry,
    keyring: &LogKeyring,
    engine: &E,
) -> Result<bool> {
    let public_key = keyring.public_key(&sct.log_id).ok_or_else(|| {
        tracing::debug!(log_id = %hex::encode(sct.log_id), "SCT from an unknown log");
        Error::UnknownLog(hex::encode(sct.log_id))
    })?;
    verify_sct(sct, entry, public_key, engine)
}
