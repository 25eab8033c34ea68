//! Persisting an archive (spec C6): header + payload region + metadata
//! block, written in that order after truncating the destination.

use crate::codec;
use crate::container::header::Header;
use crate::container::metadata::ArchiveDirectory;
use crate::error::Result;
use crate::options::ArchiveOptions;
use crate::util::truncate::Truncate;
use crate::xxtea;
use std::io::{Cursor, Seek, SeekFrom, Write};

const METADATA_ZSTD_LEVEL: i32 = 9;

pub fn write_archive<S: Write + Seek + Truncate>(
    sink: &mut S,
    header: &Header,
    directory: &ArchiveDirectory,
    payload: &[u8],
    options: &ArchiveOptions,
) -> Result<()> {
    let sorted = directory.sorted_by_file_location();

    let mut raw_metadata = Vec::new();
    for entry in &sorted {
        entry.write_to(&mut raw_metadata)?;
    }

    let metadata_block = if header.version == 1 {
        raw_metadata
    } else {
        let mut out = Vec::new();
        codec::for_version(header.version)?.compress(
            &mut Cursor::new(&raw_metadata),
            &mut out,
            METADATA_ZSTD_LEVEL,
        )?;
        out
    };
    let encrypted_metadata = xxtea::encrypt(&metadata_block, options.key)?;

    let mut header = header.clone();
    header.file_count = sorted.len() as u32;
    header.metadata_offset = header.struct_size() as u32 + payload.len() as u32;
    header.metadata_length = encrypted_metadata.len() as u32;

    sink.seek(SeekFrom::Start(0))?;
    sink.truncate_to(0)?;
    header.write_to(sink)?;
    sink.write_all(payload)?;
    sink.write_all(&encrypted_metadata)?;
    Ok(())
}
