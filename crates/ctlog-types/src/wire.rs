//! Byte cursor for the CT wire grammar
//!
//! All CT structures are big-endian with explicit length prefixes and no
//! delimiters. Reads take the record and field name so every failure is
//! reported against the structure being decoded.

use crate::error::{Error, Result};
use der::asn1::ObjectIdentifier;
use der::{Decode, Encode};

/// Sequential reader over an immutable byte buffer
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        WireReader { buf, pos: 0 }
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Read exactly `len` bytes
    pub fn take(
        &mut self,
        len: usize,
        record: &'static str,
        field: &'static str,
    ) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::Truncated { record, field });
        }
        let out = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    pub fn read_u8(&mut self, record: &'static str, field: &'static str) -> Result<u8> {
        Ok(self.take(1, record, field)?[0])
    }

    pub fn read_u16(&mut self, record: &'static str, field: &'static str) -> Result<u16> {
        let b = self.take(2, record, field)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    /// 3-byte big-endian integer, used for certificate and TBS lengths
    pub fn read_u24(&mut self, record: &'static str, field: &'static str) -> Result<u32> {
        let b = self.take(3, record, field)?;
        Ok(u32::from_be_bytes([0, b[0], b[1], b[2]]))
    }

    pub fn read_u64(&mut self, record: &'static str, field: &'static str) -> Result<u64> {
        let b = self.take(8, record, field)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(b);
        Ok(u64::from_be_bytes(arr))
    }

    pub fn read_array<const N: usize>(
        &mut self,
        record: &'static str,
        field: &'static str,
    ) -> Result<[u8; N]> {
        let b = self.take(N, record, field)?;
        let mut arr = [0u8; N];
        arr.copy_from_slice(b);
        Ok(arr)
    }

    /// Opaque blob with a u16 length prefix
    pub fn read_u16_len_bytes(
        &mut self,
        record: &'static str,
        field: &'static str,
    ) -> Result<Vec<u8>> {
        let len = self.read_u16(record, field)? as usize;
        Ok(self.take(len, record, field)?.to_vec())
    }

    /// Opaque blob with a u24 length prefix
    pub fn read_u24_len_bytes(
        &mut self,
        record: &'static str,
        field: &'static str,
    ) -> Result<Vec<u8>> {
        let len = self.read_u24(record, field)? as usize;
        Ok(self.take(len, record, field)?.to_vec())
    }

    /// OBJECT IDENTIFIER framed as a 1-byte length plus its DER encoding
    ///
    /// DER parsing itself is the `der` crate's business; a parse failure
    /// surfaces as a codec error for this record.
    pub fn read_oid(
        &mut self,
        record: &'static str,
        field: &'static str,
    ) -> Result<ObjectIdentifier> {
        let len = self.read_u8(record, field)? as usize;
        let der_bytes = self.take(len, record, field)?;
        ObjectIdentifier::from_der(der_bytes).map_err(|e| Error::Der {
            record,
            field,
            detail: e.to_string(),
        })
    }

    /// Assert the whole input was consumed
    pub fn finish(self, record: &'static str) -> Result<()> {
        if self.pos != self.buf.len() {
            return Err(Error::TrailingBytes {
                record,
                count: self.buf.len() - self.pos,
            });
        }
        Ok(())
    }
}

/// Append-only writer producing the canonical encoding
#[derive(Default)]
pub struct WireWriter {
    out: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        WireWriter { out: Vec::new() }
    }

    pub fn put_u8(&mut self, v: u8) {
        self.out.push(v);
    }

    pub fn put_u16(&mut self, v: u16) {
        self.out.extend_from_slice(&v.to_be_bytes());
    }

    pub fn put_u64(&mut self, v: u64) {
        self.out.extend_from_slice(&v.to_be_bytes());
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }

    pub fn put_u16_len_bytes(
        &mut self,
        bytes: &[u8],
        record: &'static str,
        field: &'static str,
    ) -> Result<()> {
        let len = u16::try_from(bytes.len()).map_err(|_| Error::LengthOverflow {
            record,
            field,
            detail: format!("{} bytes exceeds u16 prefix", bytes.len()),
        })?;
        self.put_u16(len);
        self.put_bytes(bytes);
        Ok(())
    }

    pub fn put_u24_len_bytes(
        &mut self,
        bytes: &[u8],
        record: &'static str,
        field: &'static str,
    ) -> Result<()> {
        if bytes.len() > 0xFF_FFFF {
            return Err(Error::LengthOverflow {
                record,
                field,
                detail: format!("{} bytes exceeds u24 prefix", bytes.len()),
            });
        }
        let be = (bytes.len() as u32).to_be_bytes();
        self.out.extend_from_slice(&be[1..]);
        self.put_bytes(bytes);
        Ok(())
    }

    /// Count prefix for repeated sub-structures
    pub fn put_u16_count(
        &mut self,
        count: usize,
        record: &'static str,
        field: &'static str,
    ) -> Result<()> {
        let count = u16::try_from(count).map_err(|_| Error::LengthOverflow {
            record,
            field,
            detail: format!("{} elements exceeds u16 count", count),
        })?;
        self.put_u16(count);
        Ok(())
    }

    pub fn put_oid(
        &mut self,
        oid: &ObjectIdentifier,
        record: &'static str,
        field: &'static str,
    ) -> Result<()> {
        let der_bytes = oid.to_der().map_err(|e| Error::Der {
            record,
            field,
            detail: e.to_string(),
        })?;
        let len = u8::try_from(der_bytes.len()).map_err(|_| Error::LengthOverflow {
            record,
            field,
            detail: format!("{} byte OID exceeds u8 prefix", der_bytes.len()),
        })?;
        self.put_u8(len);
        self.put_bytes(&der_bytes);
        Ok(())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }
}
