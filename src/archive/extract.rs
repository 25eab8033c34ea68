//! Single-entry extraction (spec C4): decrypt, decompress, MD5-verify.

use crate::codec;
use crate::container::metadata::FileMetadata;
use crate::error::{ArkError, Result};
use crate::options::ArchiveOptions;
use std::io::Cursor;

/// A decoded archive entry, ready to hand to a caller.
#[derive(Clone, Debug)]
pub struct LogicalFile {
    pub path: String,
    pub bytes: Vec<u8>,
    pub was_compressed: bool,
    pub was_encrypted: bool,
    pub priority: u32,
    pub timestamp: u32,
    /// Set when the recomputed MD5 didn't match `meta.md5sum`. Fatal only
    /// if [`ArchiveOptions::strict_integrity`] is set, in which case
    /// `extract` returns `Err` instead of a value with this set.
    pub md5_mismatch: bool,
}

pub fn extract(
    meta: &FileMetadata,
    payload: &[u8],
    header_size: u32,
    version: u32,
    options: &ArchiveOptions,
) -> Result<LogicalFile> {
    let offset = (meta.file_location - header_size) as usize;
    let len = meta.on_disk_size() as usize;
    let end = offset
        .checked_add(len)
        .filter(|&e| e <= payload.len())
        .ok_or_else(|| {
            ArkError::InvariantViolation(format!(
                "entry {:?} at [{offset}, {offset}+{len}) exceeds payload region of {} bytes",
                meta.full_path(),
                payload.len()
            ))
        })?;
    let mut bytes = payload[offset..end].to_vec();

    let was_encrypted = meta.encrypted_size != 0;
    if was_encrypted {
        bytes = crate::xxtea::decrypt(&bytes, options.key)?;
    }

    let was_compressed = meta.compressed_size != meta.original_size;
    if was_compressed {
        let mut out = Vec::with_capacity(meta.original_size as usize);
        codec::for_version(version)?.decompress(&mut Cursor::new(&bytes), &mut out)?;
        bytes = out;
    }
    bytes.truncate(meta.original_size as usize);

    let digest = md5::compute(&bytes);
    let md5_mismatch = digest.0 != meta.md5sum;
    if md5_mismatch {
        let msg = format!(
            "file {:?} hash {} does not match recorded {}",
            meta.full_path(),
            hex::encode(digest.0),
            hex::encode(meta.md5sum)
        );
        if options.strict_integrity {
            return Err(ArkError::CorruptPayload(msg));
        }
        log::warn!("{msg}");
    }

    Ok(LogicalFile {
        path: meta.full_path(),
        bytes,
        was_compressed,
        was_encrypted,
        priority: meta.priority,
        timestamp: meta.timestamp,
        md5_mismatch,
    })
}
