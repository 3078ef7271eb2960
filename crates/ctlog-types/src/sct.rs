//! Signed Certificate Timestamps and the DigitallySigned container

use crate::error::{Error, Result};
use crate::wire::{WireReader, WireWriter};
use base64::Engine;

/// TLS HashAlgorithm registry values (RFC 5246 §7.4.1.4.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HashAlgorithm {
    None = 0,
    Md5 = 1,
    Sha1 = 2,
    Sha224 = 3,
    Sha256 = 4,
    Sha384 = 5,
    Sha512 = 6,
}

impl HashAlgorithm {
    fn from_wire_value(record: &'static str, value: u8) -> Result<Self> {
        Ok(match value {
            0 => HashAlgorithm::None,
            1 => HashAlgorithm::Md5,
            2 => HashAlgorithm::Sha1,
            3 => HashAlgorithm::Sha224,
            4 => HashAlgorithm::Sha256,
            5 => HashAlgorithm::Sha384,
            6 => HashAlgorithm::Sha512,
            other => {
                return Err(Error::UnsupportedAlgorithm {
                    record,
                    field: "hash_algorithm",
                    value: other,
                })
            }
        })
    }

    pub fn wire_value(self) -> u8 {
        self as u8
    }
}

/// TLS SignatureAlgorithm registry values (RFC 5246 §7.4.1.4.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SignatureAlgorithm {
    Anonymous = 0,
    Rsa = 1,
    Dsa = 2,
    Ecdsa = 3,
}

impl SignatureAlgorithm {
    fn from_wire_value(record: &'static str, value: u8) -> Result<Self> {
        Ok(match value {
            0 => SignatureAlgorithm::Anonymous,
            1 => SignatureAlgorithm::Rsa,
            2 => SignatureAlgorithm::Dsa,
            3 => SignatureAlgorithm::Ecdsa,
            other => {
                return Err(Error::UnsupportedAlgorithm {
                    record,
                    field: "signature_algorithm",
                    value: other,
                })
            }
        })
    }

    pub fn wire_value(self) -> u8 {
        self as u8
    }
}

/// The TLS `digitally-signed` container: two algorithm bytes and a
/// u16-length-prefixed signature
///
/// The signature bytes are a DER structure (ECDSA-Sig-Value or a PKCS#1
/// block); the codec carries them opaquely and leaves interpretation to
/// the verification layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitallySigned {
    pub hash_algorithm: HashAlgorithm,
    pub signature_algorithm: SignatureAlgorithm,
    pub signature: Vec<u8>,
}

impl DigitallySigned {
    const RECORD: &'static str = "DigitallySigned";

    pub(crate) fn read(r: &mut WireReader<'_>) -> Result<Self> {
        let hash_algorithm =
            HashAlgorithm::from_wire_value(Self::RECORD, r.read_u8(Self::RECORD, "hash_algorithm")?)?;
        let signature_algorithm = SignatureAlgorithm::from_wire_value(
            Self::RECORD,
            r.read_u8(Self::RECORD, "signature_algorithm")?,
        )?;
        let signature = r.read_u16_len_bytes(Self::RECORD, "signature")?;
        Ok(DigitallySigned {
            hash_algorithm,
            signature_algorithm,
            signature,
        })
    }

    pub(crate) fn write(&self, w: &mut WireWriter) -> Result<()> {
        w.put_u8(self.hash_algorithm.wire_value());
        w.put_u8(self.signature_algorithm.wire_value());
        w.put_u16_len_bytes(&self.signature, Self::RECORD, "signature")
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

/// SignedCertificateTimestamp (v1) as returned by add-chain/add-pre-chain
///
/// The leading u16 length must equal `47 + extensions + signature` bytes;
/// anything else is a framing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedCertificateTimestamp {
    /// v1 = 0
    pub version: u8,
    /// SHA-256 of the log's public key SPKI
    pub log_id: [u8; 32],
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub extensions: Vec<u8>,
    pub signature: DigitallySigned,
}

impl SignedCertificateTimestamp {
    const RECORD: &'static str = "SignedCertificateTimestamp";

    /// Fixed bytes after the length field: version(1) + log_id(32) +
    /// timestamp(8) + extensions length(2) + two algorithm bytes(2) +
    /// signature length(2)
    const FIXED_LEN: usize = 47;

    pub fn from_wire(bytes: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(bytes);
        let declared = r.read_u16(Self::RECORD, "total_length")? as usize;
        let version = r.read_u8(Self::RECORD, "version")?;
        let log_id = r.read_array::<32>(Self::RECORD, "log_id")?;
        let timestamp = r.read_u64(Self::RECORD, "timestamp")?;
        let extensions = r.read_u16_len_bytes(Self::RECORD, "extensions")?;
        let signature = DigitallySigned::read(&mut r)?;
        r.finish(Self::RECORD)?;

        let computed = Self::FIXED_LEN + extensions.len() + signature.signature.len();
        if declared != computed {
            return Err(Error::LengthMismatch {
                record: Self::RECORD,
                field: "total_length",
                detail: format!("declared {declared}, structure occupies {computed}"),
            });
        }

        Ok(SignedCertificateTimestamp {
            version,
            log_id,
            timestamp,
            extensions,
            signature,
        })
    }

    pub fn to_wire(&self) -> Result<Vec<u8>> {
        let total = Self::FIXED_LEN + self.extensions.len() + self.signature.signature.len();
        let total = u16::try_from(total).map_err(|_| Error::LengthOverflow {
            record: Self::RECORD,
            field: "total_length",
            detail: format!("{total} bytes exceeds u16 prefix"),
        })?;

        let mut w = WireWriter::new();
        w.put_u16(total);
        w.put_u8(self.version);
        w.put_bytes(&self.log_id);
        w.put_u64(self.timestamp);
        w.put_u16_len_bytes(&self.extensions, Self::RECORD, "extensions")?;
        self.signature.write(&mut w)?;
        Ok(w.into_bytes())
    }

    /// Build an SCT from the add-chain response fields, after the caller
    /// has pulled them out of the JSON envelope
    pub fn from_api_fields(
        version: u8,
        id: &str,
        timestamp: u64,
        extensions: &str,
        signature: &str,
    ) -> Result<Self> {
        let engine = base64::engine::general_purpose::STANDARD;
        let id_bytes = engine
            .decode(id)
            .map_err(|e| Error::InvalidEncoding(format!("invalid base64 log id: {}", e)))?;
        let log_id: [u8; 32] = id_bytes.as_slice().try_into().map_err(|_| {
            Error::InvalidEncoding(format!("log id must be 32 bytes, got {}", id_bytes.len()))
        })?;
        let extensions = engine
            .decode(extensions)
            .map_err(|e| Error::InvalidEncoding(format!("invalid base64 extensions: {}", e)))?;
        let signature_bytes = engine
            .decode(signature)
            .map_err(|e| Error::InvalidEncoding(format!("invalid base64 signature: {}", e)))?;
        let signature = DigitallySigned::from_wire(&signature_bytes)?;
        Ok(SignedCertificateTimestamp {
            version,
            log_id,
            timestamp,
            extensions,
            signature,
        })
    }
}
