//! End-to-end SCT/STH verification against freshly generated log keys

use ctlog_crypto::{AwsLcEngine, KeyPair, LogKeyring};
use ctlog_types::{
    DigitallySigned, HashAlgorithm, PreCert, Sha256Hash, SignatureAlgorithm,
    SignedCertificateTimestamp, SignedEntry, SignedTreeHead,
};
use ctlog_verify::{
    sct_signed_payload, sth_signed_payload, verify_sct, verify_sct_with_keyring, verify_sth,
    Error,
};

/// A throwaway "log": a P-256 key plus its SPKI encoding and log id
struct TestLog {
    key_pair: KeyPair,
    spki: Vec<u8>,
    log_id: [u8; 32],
}

fn test_log() -> TestLog {
    let key_pair = KeyPair::generate_ecdsa_p256().unwrap();
    let spki = key_pair.public_key_to_der().unwrap();
    let log_id = ctlog_crypto::sha256(&spki);
    TestLog {
        key_pair,
        spki,
        log_id,
    }
}

/// Have the test log issue an SCT over `entry`, signing the canonical
/// payload exactly as a real log would
fn issue_sct(log: &TestLog, entry: &SignedEntry, timestamp: u64) -> SignedCertificateTimestamp {
    let mut sct = SignedCertificateTimestamp {
        version: 0,
        log_id: log.log_id,
        timestamp,
        extensions: Vec::new(),
        signature: DigitallySigned {
            hash_algorithm: HashAlgorithm::Sha256,
            signature_algorithm: SignatureAlgorithm::Ecdsa,
            signature: Vec::new(),
        },
    };
    let payload = sct_signed_payload(&sct, entry).unwrap();
    sct.signature.signature = log.key_pair.sign(&payload).unwrap().into_bytes();
    sct
}

fn issue_sth(log: &TestLog, tree_size: u64, timestamp: u64, root: Sha256Hash) -> SignedTreeHead {
    let mut sth = SignedTreeHead {
        tree_size,
        timestamp,
        root_hash: root,
        signature: DigitallySigned {
            hash_algorithm: HashAlgorithm::Sha256,
            signature_algorithm: SignatureAlgorithm::Ecdsa,
            signature: Vec::new(),
        },
    };
    let payload = sth_signed_payload(&sth).unwrap();
    sth.signature.signature = log.key_pair.sign(&payload).unwrap().into_bytes();
    sth
}

#[test]
fn x509_sct_verifies() {
    let log = test_log();
    let entry = SignedEntry::X509(vec![0x30, 0x82, 0x01, 0x0a, 0x02]);
    let sct = issue_sct(&log, &entry, 1_700_000_000_000);

    assert!(verify_sct(&sct, &entry, &log.spki, &AwsLcEngine).unwrap());
}

#[test]
fn precert_sct_verifies() {
    let log = test_log();
    let entry = SignedEntry::Precert(PreCert {
        issuer_key_hash: [0x42; 32],
        tbs_certificate: vec![0x30, 0x03, 0x02, 0x01, 0x07],
    });
    let sct = issue_sct(&log, &entry, 1_700_000_000_001);

    assert!(verify_sct(&sct, &entry, &log.spki, &AwsLcEngine).unwrap());
}

#[test]
fn flipped_signature_bit_fails_verification() {
    let log = test_log();
    let entry = SignedEntry::X509(vec![0x01, 0x02, 0x03]);
    let mut sct = issue_sct(&log, &entry, 1);

    let last = sct.signature.signature.len() - 1;
    sct.signature.signature[last] ^= 0x01;

    assert!(!verify_sct(&sct, &entry, &log.spki, &AwsLcEngine).unwrap());
}

#[test]
fn tampered_timestamp_fails_verification() {
    let log = test_log();
    let entry = SignedEntry::X509(vec![0x01, 0x02, 0x03]);
    let mut sct = issue_sct(&log, &entry, 1_000);
    sct.timestamp += 1;

    assert!(!verify_sct(&sct, &entry, &log.spki, &AwsLcEngine).unwrap());
}

#[test]
fn entry_substitution_fails_verification() {
    let log = test_log();
    let entry = SignedEntry::X509(vec![0x01, 0x02, 0x03]);
    let sct = issue_sct(&log, &entry, 1_000);

    let other = SignedEntry::X509(vec![0x01, 0x02, 0x04]);
    assert!(!verify_sct(&sct, &other, &log.spki, &AwsLcEngine).unwrap());
}

#[test]
fn wrong_log_key_fails_verification() {
    let log = test_log();
    let impostor = test_log();
    let entry = SignedEntry::X509(vec![0xff]);
    let sct = issue_sct(&log, &entry, 7);

    assert!(!verify_sct(&sct, &entry, &impostor.spki, &AwsLcEngine).unwrap());
}

#[test]
fn keyring_resolves_the_issuing_log() {
    let log = test_log();
    let entry = SignedEntry::X509(vec![0x0a, 0x0b]);
    let sct = issue_sct(&log, &entry, 99);

    let mut keyring = LogKeyring::new();
    let derived_id = keyring.add_log(&log.spki);
    assert_eq!(derived_id, log.log_id);

    assert!(verify_sct_with_keyring(&sct, &entry, &keyring, &AwsLcEngine).unwrap());
}

#[test]
fn unknown_log_id_is_an_error_not_a_false() {
    let log = test_log();
    let entry = SignedEntry::X509(vec![0x0a]);
    let sct = issue_sct(&log, &entry, 99);

    let keyring = LogKeyring::new();
    assert!(matches!(
        verify_sct_with_keyring(&sct, &entry, &keyring, &AwsLcEngine),
        Err(Error::UnknownLog(_))
    ));
}

#[test]
fn sth_verifies_and_detects_tampering() {
    let log = test_log();
    let sth = issue_sth(&log, 42, 1_700_000_000_000, Sha256Hash::from_bytes([0x13; 32]));

    assert!(verify_sth(&sth, &log.spki, &AwsLcEngine).unwrap());

    let mut tampered = sth.clone();
    tampered.tree_size += 1;
    assert!(!verify_sth(&tampered, &log.spki, &AwsLcEngine).unwrap());

    let mut tampered = sth;
    let last = tampered.signature.signature.len() - 1;
    tampered.signature.signature[last] ^= 0x80;
    assert!(!verify_sth(&tampered, &log.spki, &AwsLcEngine).unwrap());
}

#[test]
fn sct_round_trips_through_the_codec_and_still_verifies() {
    let log = test_log();
    let entry = SignedEntry::X509(vec![0x55; 100]);
    let sct = issue_sct(&log, &entry, 1_699_999_999_999);

    let wire = sct.to_wire().unwrap();
    let decoded = SignedCertificateTimestamp::from_wire(&wire).unwrap();
    assert_eq!(decoded, sct);
    assert!(verify_sct(&decoded, &entry, &log.spki, &AwsLcEngine).unwrap());
}
