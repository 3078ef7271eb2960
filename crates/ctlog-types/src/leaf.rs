//! RFC 6962 v1 Merkle tree leaf structures
//!
//! A `MerkleTreeLeaf` is the exact byte string a CT log hashes into its
//! tree (with the 0x00 leaf prefix applied by the proof engine, not by
//! the codec).

use crate::error::{Error, Result};
use crate::wire::{WireReader, WireWriter};

/// LogEntryType as defined in RFC 6962 (u16 on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum LogEntryType {
    X509Entry = 0,
    PrecertEntry = 1,
}

impl LogEntryType {
    pub(crate) fn from_wire_value(record: &'static str, value: u16) -> Result<Self> {
        match value {
            0 => Ok(LogEntryType::X509Entry),
            1 => Ok(LogEntryType::PrecertEntry),
            other => Err(Error::UnknownTag {
                record,
                field: "entry_type",
                value: other as u64,
            }),
        }
    }

    pub fn wire_value(self) -> u16 {
        self as u16
    }
}

/// PreCert structure for precertificate entries
///
/// The TBS bytes arrive with the SCT extension already stripped and the
/// issuer key hash substituted; producing them from a certificate is the
/// job of an X.509 collaborator, not of this codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreCert {
    /// SHA-256 hash of the issuer's SubjectPublicKeyInfo
    pub issuer_key_hash: [u8; 32],
    /// DER TBSCertificate, kept opaque
    pub tbs_certificate: Vec<u8>,
}

impl PreCert {
    const RECORD: &'static str = "PreCert";

    pub(crate) fn read(r: &mut WireReader<'_>) -> Result<Self> {
        let issuer_key_hash = r.read_array::<32>(Self::RECORD, "issuer_key_hash")?;
        let tbs_certificate = r.read_u24_len_bytes(Self::RECORD, "tbs_certificate")?;
        Ok(PreCert {
            issuer_key_hash,
            tbs_certificate,
        })
    }

    pub(crate) fn write(&self, w: &mut WireWriter) -> Result<()> {
        w.put_bytes(&self.issuer_key_hash);
        w.put_u24_len_bytes(&self.tbs_certificate, Self::RECORD, "tbs_certificate")
    }

    pub fn from_wire(bytes: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(bytes);
        let out = Self::read(&mut r)?;
        r.finish(Self::RECORD)?;
        Ok(out)
    }

    pub fn to_wire(&self) -> Result<Vec<u8>> {
        let mut w = WireWriter::new();
        self.write(&mut w)?;
        Ok(w.into_bytes())
    }
}

/// The type-selected payload of a `TimestampedEntry`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignedEntry {
    /// DER certificate, opaque to the codec
    X509(Vec<u8>),
    Precert(PreCert),
}

impl SignedEntry {
    pub fn entry_type(&self) -> LogEntryType {
        match self {
            SignedEntry::X509(_) => LogEntryType::X509Entry,
            SignedEntry::Precert(_) => LogEntryType::PrecertEntry,
        }
    }
}

/// TimestampedEntry as defined in RFC 6962 §3.4
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampedEntry {
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub entry: SignedEntry,
    /// Opaque CtExtensions bytes
    pub extensions: Vec<u8>,
}

impl TimestampedEntry {
    const RECORD: &'static str = "TimestampedEntry";

    pub(crate) fn read(r: &mut WireReader<'_>) -> Result<Self> {
        let timestamp = r.read_u64(Self::RECORD, "timestamp")?;
        let entry_type = r.read_u16(Self::RECORD, "entry_type")?;
        let entry = match LogEntryType::from_wire_value(Self::RECORD, entry_type)? {
            LogEntryType::X509Entry => {
                SignedEntry::X509(r.read_u24_len_bytes(Self::RECORD, "certificate")?)
            }
            LogEntryType::PrecertEntry => SignedEntry::Precert(PreCert::read(r)?),
        };
        let extensions = r.read_u16_len_bytes(Self::RECORD, "extensions")?;
        Ok(TimestampedEntry {
            timestamp,
            entry,
            extensions,
        })
    }

    pub(crate) fn write(&self, w: &mut WireWriter) -> Result<()> {
        w.put_u64(self.timestamp);
        w.put_u16(self.entry.entry_type().wire_value());
        match &self.entry {
            SignedEntry::X509(cert) => {
                w.put_u24_len_bytes(cert, Self::RECORD, "certificate")?;
            }
            SignedEntry::Precert(precert) => precert.write(w)?,
        }
        w.put_u16_len_bytes(&self.extensions, Self::RECORD, "extensions")
    }

    pub fn from_wire(bytes: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(bytes);
        let out = Self::read(&mut r)?;
        r.finish(Self::RECORD)?;
        Ok(out)
    }

    pub fn to_wire(&self) -> Result<Vec<u8>> {
        let mut w = WireWriter::new();
        self.write(&mut w)?;
        Ok(w.into_bytes())
    }
}

/// MerkleTreeLeaf as defined in RFC 6962 §3.4
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTreeLeaf {
    /// v1 = 0
    pub version: u8,
    /// timestamped_entry = 0, the only defined leaf type
    pub leaf_type: u8,
    pub entry: TimestampedEntry,
}

impl MerkleTreeLeaf {
    const RECORD: &'static str = "MerkleTreeLeaf";

    /// The only leaf type RFC 6962 defines
    pub const TIMESTAMPED_ENTRY: u8 = 0;

    pub fn new(entry: TimestampedEntry) -> Self {
        MerkleTreeLeaf {
            version: 0,
            leaf_type: Self::TIMESTAMPED_ENTRY,
            entry,
        }
    }

    pub fn from_wire(bytes: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(bytes);
        let version = r.read_u8(Self::RECORD, "version")?;
        let leaf_type = r.read_u8(Self::RECORD, "leaf_type")?;
        if leaf_type != Self::TIMESTAMPED_ENTRY {
            return Err(Error::UnknownTag {
                record: Self::RECORD,
                field: "leaf_type",
                value: leaf_type as u64,
            });
        }
        let entry = TimestampedEntry::read(&mut r)?;
        r.finish(Self::RECORD)?;
        Ok(MerkleTreeLeaf {
            version,
            leaf_type,
            entry,
        })
    }

    pub fn to_wire(&self) -> Result<Vec<u8>> {
        let mut w = WireWriter::new();
        w.put_u8(self.version);
        w.put_u8(self.leaf_type);
        self.entry.write(&mut w)?;
        Ok(w.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_x509_entry() -> TimestampedEntry {
        TimestampedEntry {
            timestamp: 1_500_000_000_000,
            entry: SignedEntry::X509(vec![0x30, 0x82, 0x01, 0x00]),
            extensions: Vec::new(),
        }
    }

    #[test]
    fn x509_entry_roundtrip() {
        let entry = sample_x509_entry();
        let bytes = entry.to_wire().unwrap();
        assert_eq!(TimestampedEntry::from_wire(&bytes).unwrap(), entry);
    }

    #[test]
    fn precert_entry_roundtrip() {
        let entry = TimestampedEntry {
            timestamp: 42,
            entry: SignedEntry::Precert(PreCert {
                issuer_key_hash: [7u8; 32],
                tbs_certificate: vec![0x30, 0x03, 0x02, 0x01, 0x01],
            }),
            extensions: vec![0xde, 0xad],
        };
        let bytes = entry.to_wire().unwrap();
        assert_eq!(TimestampedEntry::from_wire(&bytes).unwrap(), entry);
    }

    #[test]
    fn leaf_roundtrip() {
        let leaf = MerkleTreeLeaf::new(sample_x509_entry());
        let bytes = leaf.to_wire().unwrap();
        assert_eq!(MerkleTreeLeaf::from_wire(&bytes).unwrap(), leaf);
    }

    #[test]
    fn entry_type_two_is_rejected() {
        let entry = sample_x509_entry();
        let mut bytes = entry.to_wire().unwrap();
        // entry_type sits at offset 8..10
        bytes[9] = 2;
        assert!(matches!(
            TimestampedEntry::from_wire(&bytes),
            Err(Error::UnknownTag {
                field: "entry_type",
                ..
            })
        ));
    }

    #[test]
    fn truncated_leaf_is_rejected() {
        let leaf = MerkleTreeLeaf::new(sample_x509_entry());
        let bytes = leaf.to_wire().unwrap();
        assert!(MerkleTreeLeaf::from_wire(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn unknown_leaf_type_is_rejected() {
        let leaf = MerkleTreeLeaf::new(sample_x509_entry());
        let mut bytes = leaf.to_wire().unwrap();
        bytes[1] = 1;
        assert!(matches!(
            MerkleTreeLeaf::from_wire(&bytes),
            Err(Error::UnknownTag {
                field: "leaf_type",
                ..
            })
        ));
    }
}
