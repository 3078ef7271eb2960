//! RFC 6962-bis (v2) TransItem structures
//!
//! v2 wraps every log artifact in a tagged `TransItem` container. Log ids
//! become OBJECT IDENTIFIERs, extensions become typed lists, and proof
//! paths carry per-element hash lengths. This codec pins hashes to
//! SHA-256, so a path element of any other length is a framing error.

use crate::encoding::Sha256Hash;
use crate::error::{Error, Result};
use crate::wire::{WireReader, WireWriter};
use der::asn1::ObjectIdentifier;

/// A single v2 extension: u16 type, u16-length opaque data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub extension_type: u16,
    pub data: Vec<u8>,
}

impl Extension {
    const RECORD: &'static str = "Extension";

    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        let extension_type = r.read_u16(Self::RECORD, "extension_type")?;
        let data = r.read_u16_len_bytes(Self::RECORD, "data")?;
        Ok(Extension {
            extension_type,
            data,
        })
    }

    fn write(&self, w: &mut WireWriter) -> Result<()> {
        w.put_u16(self.extension_type);
        w.put_u16_len_bytes(&self.data, Self::RECORD, "data")
    }
}

/// u16-count-prefixed extension list
fn read_extensions(r: &mut WireReader<'_>, record: &'static str) -> Result<Vec<Extension>> {
    let count = r.read_u16(record, "extensions count")?;
    let mut extensions = Vec::with_capacity(count as usize);
    for _ in 0..count {
        extensions.push(Extension::read(r)?);
    }
    Ok(extensions)
}

fn write_extensions(
    w: &mut WireWriter,
    extensions: &[Extension],
    record: &'static str,
) -> Result<()> {
    w.put_u16_count(extensions.len(), record, "extensions count")?;
    for extension in extensions {
        extension.write(w)?;
    }
    Ok(())
}

/// Proof path: u16 count, then per element a 1-byte hash length and the
/// hash bytes. Only 32-byte SHA-256 elements are accepted.
fn read_hash_path(
    r: &mut WireReader<'_>,
    record: &'static str,
    field: &'static str,
) -> Result<Vec<Sha256Hash>> {
    let count = r.read_u16(record, field)?;
    let mut path = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let hash_len = r.read_u8(record, field)? as usize;
        if hash_len != 32 {
            return Err(Error::LengthMismatch {
                record,
                field,
                detail: format!("hash element is {hash_len} bytes, expected 32"),
            });
        }
        path.push(Sha256Hash::from_bytes(r.read_array::<32>(record, field)?));
    }
    Ok(path)
}

fn write_hash_path(
    w: &mut WireWriter,
    path: &[Sha256Hash],
    record: &'static str,
    field: &'static str,
) -> Result<()> {
    w.put_u16_count(path.len(), record, field)?;
    for hash in path {
        w.put_u8(32);
        w.put_bytes(hash.as_slice());
    }
    Ok(())
}

/// TimestampedCertificateEntryDataV2: the hashable v2 log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampedCertificateEntryDataV2 {
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    /// SHA-256 hash of the issuer's SubjectPublicKeyInfo
    pub issuer_key_hash: [u8; 32],
    /// DER TBSCertificate, kept opaque
    pub tbs_certificate: Vec<u8>,
    pub extensions: Vec<Extension>,
}

impl TimestampedCertificateEntryDataV2 {
    const RECORD: &'static str = "TimestampedCertificateEntryDataV2";

    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        let timestamp = r.read_u64(Self::RECORD, "timestamp")?;
        let hash_len = r.read_u8(Self::RECORD, "issuer_key_hash")? as usize;
        if hash_len != 32 {
            return Err(Error::LengthMismatch {
                record: Self::RECORD,
                field: "issuer_key_hash",
                detail: format!("{hash_len} bytes, expected 32"),
            });
        }
        let issuer_key_hash = r.read_array::<32>(Self::RECORD, "issuer_key_hash")?;
        let tbs_certificate = r.read_u24_len_bytes(Self::RECORD, "tbs_certificate")?;
        let extensions = read_extensions(r, Self::RECORD)?;
        Ok(TimestampedCertificateEntryDataV2 {
            timestamp,
            issuer_key_hash,
            tbs_certificate,
            extensions,
        })
    }

    fn write(&self, w: &mut WireWriter) -> Result<()> {
        w.put_u64(self.timestamp);
        w.put_u8(32);
        w.put_bytes(&self.issuer_key_hash);
        w.put_u24_len_bytes(&self.tbs_certificate, Self::RECORD, "tbs_certificate")?;
        write_extensions(w, &self.extensions, Self::RECORD)
    }
}

/// SignedCertificateTimestampDataV2: a v2 SCT body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedCertificateTimestampDataV2 {
    /// OID naming the log
    pub log_id: ObjectIdentifier,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub extensions: Vec<Extension>,
    /// Opaque signature bytes
    pub signature: Vec<u8>,
}

impl SignedCertificateTimestampDataV2 {
    const RECORD: &'static str = "SignedCertificateTimestampDataV2";

    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        let log_id = r.read_oid(Self::RECORD, "log_id")?;
        let timestamp = r.read_u64(Self::RECORD, "timestamp")?;
        let extensions = read_extensions(r, Self::RECORD)?;
        let signature = r.read_u16_len_bytes(Self::RECORD, "signature")?;
        Ok(SignedCertificateTimestampDataV2 {
            log_id,
            timestamp,
            extensions,
            signature,
        })
    }

    fn write(&self, w: &mut WireWriter) -> Result<()> {
        w.put_oid(&self.log_id, Self::RECORD, "log_id")?;
        w.put_u64(self.timestamp);
        write_extensions(w, &self.extensions, Self::RECORD)?;
        w.put_u16_len_bytes(&self.signature, Self::RECORD, "signature")
    }
}

/// TreeHeadDataV2: the signed portion of a v2 tree head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeHeadDataV2 {
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub tree_size: u64,
    pub root_hash: Sha256Hash,
    pub extensions: Vec<Extension>,
}

impl TreeHeadDataV2 {
    const RECORD: &'static str = "TreeHeadDataV2";

    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        let timestamp = r.read_u64(Self::RECORD, "timestamp")?;
        let tree_size = r.read_u64(Self::RECORD, "tree_size")?;
        let hash_len = r.read_u8(Self::RECORD, "root_hash")? as usize;
        if hash_len != 32 {
            return Err(Error::LengthMismatch {
                record: Self::RECORD,
                field: "root_hash",
                detail: format!("{hash_len} bytes, expected 32"),
            });
        }
        let root_hash = Sha256Hash::from_bytes(r.read_array::<32>(Self::RECORD, "root_hash")?);
        let extensions = read_extensions(r, Self::RECORD)?;
        Ok(TreeHeadDataV2 {
            timestamp,
            tree_size,
            root_hash,
            extensions,
        })
    }

    fn write(&self, w: &mut WireWriter) -> Result<()> {
        w.put_u64(self.timestamp);
        w.put_u64(self.tree_size);
        w.put_u8(32);
        w.put_bytes(self.root_hash.as_slice());
        write_extensions(w, &self.extensions, Self::RECORD)
    }
}

/// SignedTreeHeadDataV2: a v2 tree head with its log id and signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTreeHeadDataV2 {
    pub log_id: ObjectIdentifier,
    pub tree_head: TreeHeadDataV2,
    /// Opaque signature bytes
    pub signature: Vec<u8>,
}

impl SignedTreeHeadDataV2 {
    const RECORD: &'static str = "SignedTreeHeadDataV2";

    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        let log_id = r.read_oid(Self::RECORD, "log_id")?;
        let tree_head = TreeHeadDataV2::read(r)?;
        let signature = r.read_u16_len_bytes(Self::RECORD, "signature")?;
        Ok(SignedTreeHeadDataV2 {
            log_id,
            tree_head,
            signature,
        })
    }

    fn write(&self, w: &mut WireWriter) -> Result<()> {
        w.put_oid(&self.log_id, Self::RECORD, "log_id")?;
        self.tree_head.write(w)?;
        w.put_u16_len_bytes(&self.signature, Self::RECORD, "signature")
    }
}

/// ConsistencyProofDataV2: proof that one tree extends an earlier one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyProofDataV2 {
    pub log_id: ObjectIdentifier,
    /// Size of the older tree
    pub tree_size_1: u64,
    /// Size of the newer tree
    pub tree_size_2: u64,
    pub consistency_path: Vec<Sha256Hash>,
}

impl ConsistencyProofDataV2 {
    const RECORD: &'static str = "ConsistencyProofDataV2";

    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        let log_id = r.read_oid(Self::RECORD, "log_id")?;
        let tree_size_1 = r.read_u64(Self::RECORD, "tree_size_1")?;
        let tree_size_2 = r.read_u64(Self::RECORD, "tree_size_2")?;
        let consistency_path = read_hash_path(r, Self::RECORD, "consistency_path")?;
        Ok(ConsistencyProofDataV2 {
            log_id,
            tree_size_1,
            tree_size_2,
            consistency_path,
        })
    }

    fn write(&self, w: &mut WireWriter) -> Result<()> {
        w.put_oid(&self.log_id, Self::RECORD, "log_id")?;
        w.put_u64(self.tree_size_1);
        w.put_u64(self.tree_size_2);
        write_hash_path(w, &self.consistency_path, Self::RECORD, "consistency_path")
    }
}

/// InclusionProofDataV2: proof that a leaf is present at a tree size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionProofDataV2 {
    pub log_id: ObjectIdentifier,
    pub tree_size: u64,
    /// 0-based index of the log entry this proof covers
    pub leaf_index: u64,
    pub inclusion_path: Vec<Sha256Hash>,
}

impl InclusionProofDataV2 {
    const RECORD: &'static str = "InclusionProofDataV2";

    fn read(r: &mut WireReader<'_>) -> Result<Self> {
        let log_id = r.read_oid(Self::RECORD, "log_id")?;
        let tree_size = r.read_u64(Self::RECORD, "tree_size")?;
        let leaf_index = r.read_u64(Self::RECORD, "leaf_index")?;
        let inclusion_path = read_hash_path(r, Self::RECORD, "inclusion_path")?;
        Ok(InclusionProofDataV2 {
            log_id,
            tree_size,
            leaf_index,
            inclusion_path,
        })
    }

    fn write(&self, w: &mut WireWriter) -> Result<()> {
        w.put_oid(&self.log_id, Self::RECORD, "log_id")?;
        w.put_u64(self.tree_size);
        w.put_u64(self.leaf_index);
        write_hash_path(w, &self.inclusion_path, Self::RECORD, "inclusion_path")
    }
}

/// The tagged v2 container. An unrecognized tag is a decode error; there
/// is no pass-through variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransItem {
    X509EntryV2(TimestampedCertificateEntryDataV2),
    PrecertEntryV2(TimestampedCertificateEntryDataV2),
    X509SctV2(SignedCertificateTimestampDataV2),
    PrecertSctV2(SignedCertificateTimestampDataV2),
    SignedTreeHeadV2(SignedTreeHeadDataV2),
    ConsistencyProofV2(ConsistencyProofDataV2),
    InclusionProofV2(InclusionProofDataV2),
}

impl TransItem {
    const RECORD: &'static str = "TransItem";

    /// The u16 wire tag for this variant
    pub fn type_tag(&self) -> u16 {
        match self {
            TransItem::X509EntryV2(_) => 1,
            TransItem::PrecertEntryV2(_) => 2,
            TransItem::X509SctV2(_) => 3,
            TransItem::PrecertSctV2(_) => 4,
            TransItem::SignedTreeHeadV2(_) => 5,
            TransItem::ConsistencyProofV2(_) => 6,
            TransItem::InclusionProofV2(_) => 7,
        }
    }

    pub fn from_wire(bytes: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(bytes);
        let tag = r.read_u16(Self::RECORD, "type")?;
        let item = match tag {
            1 => TransItem::X509EntryV2(TimestampedCertificateEntryDataV2::read(&mut r)?),
            2 => TransItem::PrecertEntryV2(TimestampedCertificateEntryDataV2::read(&mut r)?),
            3 => TransItem::X509SctV2(SignedCertificateTimestampDataV2::read(&mut r)?),
            4 => TransItem::PrecertSctV2(SignedCertificateTimestampDataV2::read(&mut r)?),
            5 => TransItem::SignedTreeHeadV2(SignedTreeHeadDataV2::read(&mut r)?),
            6 => TransItem::ConsistencyProofV2(ConsistencyProofDataV2::read(&mut r)?),
            7 => TransItem::InclusionProofV2(InclusionProofDataV2::read(&mut r)?),
            other => {
                return Err(Error::UnknownTag {
                    record: Self::RECORD,
                    field: "type",
                    value: other as u64,
                })
            }
        };
        r.finish(Self::RECORD)?;
        Ok(item)
    }

    pub fn to_wire(&self) -> Result<Vec<u8>> {
        let mut w = WireWriter::new();
        w.put_u16(self.type_tag());
        match self {
            TransItem::X509EntryV2(data) | TransItem::PrecertEntryV2(data) => data.write(&mut w)?,
            TransItem::X509SctV2(data) | TransItem::PrecertSctV2(data) => data.write(&mut w)?,
            TransItem::SignedTreeHeadV2(data) => data.write(&mut w)?,
            TransItem::ConsistencyProofV2(data) => data.write(&mut w)?,
            TransItem::InclusionProofV2(data) => data.write(&mut w)?,
        }
        Ok(w.into_bytes())
    }
}
