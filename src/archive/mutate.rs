//! Upsert (spec C5): compress+encrypt the new bytes, then either append
//! after the last entry or splice into an existing entry's slot, shifting
//! every later entry's `file_location` by the size delta.

use crate::codec;
use crate::container::header::Header;
use crate::container::metadata::{ArchiveDirectory, FileMetadata, V4Opaque};
use crate::error::Result;
use crate::options::{ArchiveOptions, UpsertFlags};
use crate::xxtea;
use std::io::Cursor;

const PAYLOAD_COMPRESS_LEVEL: i32 = 9;

pub fn upsert(
    header: &mut Header,
    directory: &mut ArchiveDirectory,
    payload: &mut Vec<u8>,
    path: &str,
    data: &[u8],
    flags: UpsertFlags,
    options: &ArchiveOptions,
) -> Result<()> {
    let (on_disk, original_size, compressed_size, encrypted_size, md5sum) =
        package(data, &flags, header.version, options)?;

    let header_size = header.struct_size() as u32;

    match directory.find_index(path) {
        None => {
            let file_location = directory
                .as_slice()
                .last()
                .map(|e| e.file_location + e.on_disk_size())
                .unwrap_or(header_size);

            payload.extend_from_slice(&on_disk);
            directory.push(FileMetadata {
                filename: String::new(),
                pathname: String::new(),
                file_location,
                original_size,
                compressed_size,
                encrypted_size,
                timestamp: flags.timestamp,
                md5sum,
                priority: flags.priority,
                version: header.version,
                v4: (header.version == 4).then(V4Opaque::default),
            }
            .with_full_path(path));
        }
        Some(index) => {
            let old_size = directory.as_slice()[index].on_disk_size() as usize;
            let rel_offset = (directory.as_slice()[index].file_location - header_size) as usize;

            payload.splice(rel_offset..rel_offset + old_size, on_disk.iter().copied());
            let shift = on_disk.len() as i64 - old_size as i64;

            {
                let entry = directory.get_mut(index).expect("index just looked up");
                entry.original_size = original_size;
                entry.compressed_size = compressed_size;
                entry.encrypted_size = encrypted_size;
                entry.md5sum = md5sum;
                entry.priority = flags.priority;
                entry.timestamp = flags.timestamp;
            }

            for entry in directory_entries_after_mut(directory, index) {
                entry.file_location = (entry.file_location as i64 + shift) as u32;
            }
        }
    }

    header.metadata_offset = header_size + payload.len() as u32;
    header.file_count = directory.len() as u32;
    Ok(())
}

fn directory_entries_after_mut(
    directory: &mut ArchiveDirectory,
    index: usize,
) -> impl Iterator<Item = &mut FileMetadata> {
    directory
        .as_mut_slice()
        .iter_mut()
        .enumerate()
        .filter(move |(i, _)| *i > index)
        .map(|(_, e)| e)
}

/// Compress then encrypt `data` per `flags`, returning the final on-disk
/// bytes plus the metadata fields that describe them.
fn package(
    data: &[u8],
    flags: &UpsertFlags,
    version: u32,
    options: &ArchiveOptions,
) -> Result<(Vec<u8>, u32, u32, u32, [u8; 16])> {
    let original_size = data.len() as u32;
    let md5sum = md5::compute(data).0;

    let compressed = if flags.compress {
        let mut out = Vec::new();
        codec::for_version(version)?.compress(&mut Cursor::new(data), &mut out, PAYLOAD_COMPRESS_LEVEL)?;
        out
    } else {
        data.to_vec()
    };
    let compressed_size = compressed.len() as u32;

    let (on_disk, encrypted_size) = if flags.encrypt {
        let encrypted = xxtea::encrypt(&compressed, options.key)?;
        let len = encrypted.len() as u32;
        (encrypted, len)
    } else {
        (compressed, 0)
    };

    Ok((on_disk, original_size, compressed_size, encrypted_size, md5sum))
}
