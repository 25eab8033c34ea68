//! Archive header: a 12-byte v1 layout or a 32-byte v3/v4 layout, unified
//! behind one logical [`Header`] so the rest of the crate never has to
//! match on version outside this module and [`super::metadata`].

use crate::error::{ArkError, Result};
use crate::util::le::{read_exact_vec, read_u32, write_u32};
use std::io::{Read, Write};

/// Byte size of the v1 on-disk header.
pub const V1_SIZE: usize = 12;
/// Byte size of the v3/v4 on-disk header.
pub const V3V4_SIZE: usize = 32;
const V3V4_RESERVED_LEN: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub version: u32,
    pub file_count: u32,
    pub metadata_offset: u32,
    /// Only meaningful for v3/v4 on disk; for v1 it is derived from EOF on
    /// read and recomputed from the serialized metadata block on write.
    pub metadata_length: u32,
    /// v3/v4's 16 reserved bytes, preserved bit-for-bit. Empty for v1.
    pub reserved: Vec<u8>,
}

impl Header {
    pub fn struct_size(&self) -> usize {
        match self.version {
            1 => V1_SIZE,
            3 | 4 => V3V4_SIZE,
            v => unreachable!("invalid version {v} should have been rejected on read"),
        }
    }

    /// Peek the version field (byte offset 8) without consuming the
    /// reader's position in a way the caller can't recover from — callers
    /// must seek back to 0 before calling [`Header::read_from`].
    pub fn peek_version<R: Read>(r: &mut R) -> Result<u32> {
        let first12 = read_exact_vec(r, V1_SIZE)?;
        Ok(u32::from_le_bytes([
            first12[8],
            first12[9],
            first12[10],
            first12[11],
        ]))
    }

    /// Read the full header for a version already known to be valid.
    /// `file_size` is used to derive `metadata_length` for v1 archives,
    /// which don't store it on disk.
    pub fn read_from<R: Read>(r: &mut R, version: u32, file_size: u64) -> Result<Self> {
        match version {
            1 => {
                let file_count = read_u32(r)?;
                let metadata_offset = read_u32(r)?;
                let version = read_u32(r)?;
                let metadata_length = (file_size.saturating_sub(metadata_offset as u64)) as u32;
                Ok(Header {
                    version,
                    file_count,
                    metadata_offset,
                    metadata_length,
                    reserved: Vec::new(),
                })
            }
            3 | 4 => {
                let file_count = read_u32(r)?;
                let metadata_offset = read_u32(r)?;
                let version = read_u32(r)?;
                let metadata_length = read_u32(r)?;
                let reserved = read_exact_vec(r, V3V4_RESERVED_LEN)?;
                Ok(Header {
                    version,
                    file_count,
                    metadata_offset,
                    metadata_length,
                    reserved,
                })
            }
            v => Err(ArkError::UnsupportedVersion(v)),
        }
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        match self.version {
            1 => {
                write_u32(w, self.file_count)?;
                write_u32(w, self.metadata_offset)?;
                write_u32(w, self.version)?;
                Ok(())
            }
            3 | 4 => {
                write_u32(w, self.file_count)?;
                write_u32(w, self.metadata_offset)?;
                write_u32(w, self.version)?;
                write_u32(w, self.metadata_length)?;
                let mut reserved = self.reserved.clone();
                reserved.resize(V3V4_RESERVED_LEN, 0);
                w.write_all(&reserved)?;
                Ok(())
            }
            v => Err(ArkError::UnsupportedVersion(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn v1_round_trip() {
        let h = Header {
            version: 1,
            file_count: 3,
            metadata_offset: 100,
            metadata_length: 0,
            reserved: Vec::new(),
        };
        let mut buf = Vec::new();
        h.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), V1_SIZE);

        let mut c = Cursor::new(buf);
        let version = Header::peek_version(&mut c.clone()).unwrap();
        assert_eq!(version, 1);
        c.set_position(0);
        let read = Header::read_from(&mut c, 1, 100 + 50).unwrap();
        assert_eq!(read.file_count, 3);
        assert_eq!(read.metadata_offset, 100);
        assert_eq!(read.metadata_length, 50);
    }

    #[test]
    fn v4_round_trip_preserves_reserved() {
        let h = Header {
            version: 4,
            file_count: 7,
            metadata_offset: 256,
            metadata_length: 64,
            reserved: (0..16).collect(),
        };
        let mut buf = Vec::new();
        h.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), V3V4_SIZE);

        let mut c = Cursor::new(buf);
        let read = Header::read_from(&mut c, 4, 0).unwrap();
        assert_eq!(read, h);
    }

    #[test]
    fn rejects_unknown_version() {
        let mut c = Cursor::new(vec![0u8; 12]);
        assert!(Header::read_from(&mut c, 2, 12).is_err());
    }
}
