//! Header + directory parsing (spec C3): version sniff, header read,
//! metadata blob decrypt/decompress/deserialize, payload region slurp.

use crate::codec;
use crate::container::header::Header;
use crate::container::metadata::{ArchiveDirectory, FileMetadata};
use crate::error::{ArkError, Result};
use crate::options::ArchiveOptions;
use crate::util::le::read_exact_vec;
use crate::xxtea;
use std::io::{Cursor, Read, Seek, SeekFrom};

pub fn read_archive<S: Read + Seek>(
    source: &mut S,
    options: &ArchiveOptions,
) -> Result<(Header, ArchiveDirectory, Vec<u8>)> {
    source.seek(SeekFrom::Start(0))?;
    let version = Header::peek_version(source)?;

    let file_size = source.seek(SeekFrom::End(0))?;
    source.seek(SeekFrom::Start(0))?;
    let header = Header::read_from(source, version, file_size)?;

    let directory = read_directory(source, &header, options)?;
    let payload = read_payload(source, &header)?;

    Ok((header, directory, payload))
}

fn read_directory<S: Read + Seek>(
    source: &mut S,
    header: &Header,
    options: &ArchiveOptions,
) -> Result<ArchiveDirectory> {
    if header.file_count == 0 {
        return Ok(ArchiveDirectory::new());
    }

    let blob_len = xxtea::aligned_size(header.metadata_length as usize);
    source.seek(SeekFrom::Start(header.metadata_offset as u64))?;
    let blob = read_exact_vec(source, blob_len)?;
    let decrypted = xxtea::decrypt(&blob, options.key)?;

    let record_size = FileMetadata::record_size(header.version)?;
    let expected_raw_len = header.file_count as usize * record_size;

    let raw = if header.version == 1 {
        decrypted
    } else {
        let mut out = Vec::with_capacity(expected_raw_len);
        codec::for_version(header.version)?
            .decompress(&mut Cursor::new(&decrypted), &mut out)?;
        out
    };

    if raw.len() < expected_raw_len {
        return Err(ArkError::CorruptMetadata(format!(
            "expected {expected_raw_len} bytes of directory records, got {}",
            raw.len()
        )));
    }

    let mut cursor = Cursor::new(raw);
    let mut entries = Vec::with_capacity(header.file_count as usize);
    for _ in 0..header.file_count {
        entries.push(FileMetadata::read_from(&mut cursor, header.version)?);
    }

    Ok(ArchiveDirectory::from_entries(entries))
}

fn read_payload<S: Read + Seek>(source: &mut S, header: &Header) -> Result<Vec<u8>> {
    let header_size = header.struct_size() as u64;
    let payload_len = header.metadata_offset as u64 - header_size;
    source.seek(SeekFrom::Start(header_size))?;
    Ok(read_exact_vec(source, payload_len as usize)?)
}
