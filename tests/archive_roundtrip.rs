//! Whole-archive round-trip scenarios (spec.md §8). Unit tests inside each
//! module cover the module-local properties; these exercise the public
//! `Archive` surface end to end the way a host actually would.

use ark_archive::archive::Archive;
use ark_archive::container::header::Header;
use ark_archive::container::metadata::{ArchiveDirectory, FileMetadata, V4Opaque};
use ark_archive::{codec, xxtea, ArchiveOptions, UpsertFlags};
use std::io::Cursor;

/// Hand-assemble a well-formed `.ark` archive byte-for-byte using the same
/// public building blocks the crate's own writer uses, without going
/// through `Archive::add_file` — this is how a test gets an archive to
/// `Archive::open` in the first place, since the public API has no
/// from-scratch constructor (spec.md §4.9 lists only `open`, not `new`).
struct RawEntry {
    path: &'static str,
    data: Vec<u8>,
    compress: bool,
    encrypt: bool,
    priority: u32,
    timestamp: u32,
    v4: Option<V4Opaque>,
}

fn entry(path: &'static str, data: &[u8], compress: bool, encrypt: bool) -> RawEntry {
    RawEntry {
        path,
        data: data.to_vec(),
        compress,
        encrypt,
        priority: 0,
        timestamp: 1_700_000_000,
        v4: None,
    }
}

fn build_archive(version: u32, entries: Vec<RawEntry>, key: [u32; 4]) -> Vec<u8> {
    let header_size = if version == 1 {
        ark_archive::container::header::V1_SIZE
    } else {
        ark_archive::container::header::V3V4_SIZE
    } as u32;

    let mut payload = Vec::new();
    let mut directory = ArchiveDirectory::new();

    for e in entries {
        let file_location = header_size + payload.len() as u32;
        let original_size = e.data.len() as u32;
        let md5sum = md5::compute(&e.data).0;

        let compressed = if e.compress {
            let mut out = Vec::new();
            codec::for_version(version)
                .unwrap()
                .compress(&mut Cursor::new(&e.data), &mut out, 9)
                .unwrap();
            out
        } else {
            e.data.clone()
        };
        let compressed_size = compressed.len() as u32;

        let (on_disk, encrypted_size) = if e.encrypt {
            let enc = xxtea::encrypt(&compressed, key).unwrap();
            let len = enc.len() as u32;
            (enc, len)
        } else {
            (compressed, 0)
        };

        payload.extend_from_slice(&on_disk);

        directory.push(
            FileMetadata {
                filename: String::new(),
                pathname: String::new(),
                file_location,
                original_size,
                compressed_size,
                encrypted_size,
                timestamp: e.timestamp,
                md5sum,
                priority: e.priority,
                version,
                v4: if version == 4 {
                    Some(e.v4.unwrap_or_default())
                } else {
                    None
                },
            }
            .with_full_path(e.path),
        );
    }

    let mut raw_metadata = Vec::new();
    for m in directory.as_slice() {
        m.write_to(&mut raw_metadata).unwrap();
    }
    let metadata_block = if version == 1 {
        raw_metadata
    } else {
        let mut out = Vec::new();
        codec::for_version(version)
            .unwrap()
            .compress(&mut Cursor::new(&raw_metadata), &mut out, 9)
            .unwrap();
        out
    };
    let encrypted_metadata = xxtea::encrypt(&metadata_block, key).unwrap();

    let header = Header {
        version,
        file_count: directory.len() as u32,
        metadata_offset: header_size + payload.len() as u32,
        metadata_length: encrypted_metadata.len() as u32,
        reserved: Vec::new(),
    };

    let mut out = Vec::new();
    header.write_to(&mut out).unwrap();
    out.extend_from_slice(&payload);
    out.extend_from_slice(&encrypted_metadata);
    out
}

#[test]
fn v1_extraction_of_compressed_entry() {
    let bytes = build_archive(
        1,
        vec![entry("a.txt", b"hello", true, false)],
        xxtea::DEFAULT_KEY,
    );
    let mut archive = Archive::open(Cursor::new(bytes)).unwrap();
    let file = archive.read_file("a.txt").unwrap();
    assert_eq!(file.bytes, b"hello");
    assert!(!file.md5_mismatch);
}

#[test]
fn v3_extraction_of_compressed_and_encrypted_entry() {
    let payload: Vec<u8> = (0..1024 * 1024).map(|i| (i % 251) as u8).collect();
    let bytes = build_archive(
        3,
        vec![entry("dir/b.bin", &payload, true, true)],
        xxtea::DEFAULT_KEY,
    );
    let mut archive = Archive::open(Cursor::new(bytes)).unwrap();
    let file = archive.read_file("dir/b.bin").unwrap();
    assert_eq!(file.bytes, payload);
    assert!(!file.md5_mismatch);
}

#[test]
fn upsert_append_into_empty_v4_archive() {
    let bytes = build_archive(4, vec![], xxtea::DEFAULT_KEY);
    let mut archive = Archive::open(Cursor::new(bytes)).unwrap();

    let data = vec![b'X'; 100];
    archive
        .add_file(
            "x",
            &data,
            UpsertFlags {
                compress: true,
                encrypt: false,
                priority: 0,
                timestamp: 0,
            },
        )
        .unwrap();
    archive.write().unwrap();

    let raw = archive.close().into_inner();
    let mut reopened = Archive::open(Cursor::new(raw)).unwrap();
    let files = reopened.files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].original_size, 100);

    let out = reopened.read_file("x").unwrap();
    assert_eq!(out.bytes, data);
}

#[test]
fn upsert_replace_larger_shifts_later_entries() {
    let bytes = build_archive(
        4,
        vec![
            entry("a", &vec![1u8; 1000], false, false),
            entry("b", &vec![2u8; 2000], false, false),
            entry("c", &vec![3u8; 3000], false, false),
        ],
        xxtea::DEFAULT_KEY,
    );
    let mut archive = Archive::open(Cursor::new(bytes)).unwrap();

    let c_location_before = archive.files()[2].file_location;
    let b_on_disk_before = archive.files()[1].on_disk_size();

    let new_b = vec![9u8; 5000];
    archive
        .add_file(
            "b",
            &new_b,
            UpsertFlags {
                compress: false,
                encrypt: false,
                priority: 0,
                timestamp: 0,
            },
        )
        .unwrap();

    let shift = new_b.len() as i64 - b_on_disk_before as i64;
    let c_location_after = archive.files()[2].file_location;
    assert_eq!(
        c_location_after as i64,
        c_location_before as i64 + shift
    );

    archive.write().unwrap();
    let raw = archive.close().into_inner();
    let mut reopened = Archive::open(Cursor::new(raw)).unwrap();
    assert_eq!(reopened.read_file("a").unwrap().bytes, vec![1u8; 1000]);
    assert_eq!(reopened.read_file("b").unwrap().bytes, new_b);
    assert_eq!(reopened.read_file("c").unwrap().bytes, vec![3u8; 3000]);
}

#[test]
fn v4_opaque_bytes_round_trip() {
    let mut e = entry("a", b"hello world", false, false);
    e.v4 = Some(V4Opaque {
        unknown1: 0xDEAD_BEEF,
        unknown2: [0xAB; 40],
    });
    let bytes = build_archive(4, vec![e], xxtea::DEFAULT_KEY);

    let mut archive = Archive::open(Cursor::new(bytes)).unwrap();
    let before = archive.files()[0].v4.clone().unwrap();
    assert_eq!(before.unknown1, 0xDEAD_BEEF);
    assert_eq!(before.unknown2, [0xAB; 40]);

    archive.write().unwrap();
    let raw = archive.close().into_inner();
    let mut reopened = Archive::open(Cursor::new(raw)).unwrap();
    let after = reopened.files()[0].v4.clone().unwrap();
    assert_eq!(after, before);
}

#[test]
fn open_write_reopen_preserves_directory_and_bytes() {
    let bytes = build_archive(
        3,
        vec![
            entry("a.txt", b"alpha", true, false),
            entry("dir/b.bin", b"beta-beta-beta", false, true),
        ],
        xxtea::DEFAULT_KEY,
    );
    let mut a = Archive::open(Cursor::new(bytes.clone())).unwrap();
    let files_before = a.files();
    a.write().unwrap();
    let rewritten = a.close().into_inner();

    let mut b = Archive::open(Cursor::new(rewritten)).unwrap();
    let files_after = b.files();
    assert_eq!(files_before.len(), files_after.len());
    for (x, y) in files_before.iter().zip(files_after.iter()) {
        assert_eq!(x.full_path(), y.full_path());
        assert_eq!(x.md5sum, y.md5sum);
        assert_eq!(x.original_size, y.original_size);
    }
    assert_eq!(
        b.read_file("a.txt").unwrap().bytes,
        a_reopen_bytes(&bytes, "a.txt")
    );
    assert_eq!(
        b.read_file("dir/b.bin").unwrap().bytes,
        a_reopen_bytes(&bytes, "dir/b.bin")
    );
}

fn a_reopen_bytes(raw: &[u8], path: &str) -> Vec<u8> {
    Archive::open(Cursor::new(raw.to_vec()))
        .unwrap()
        .read_file(path)
        .unwrap()
        .bytes
}

#[test]
fn upsert_idempotence() {
    let bytes = build_archive(4, vec![entry("a", b"seed", false, false)], xxtea::DEFAULT_KEY);

    let flags = UpsertFlags {
        compress: true,
        encrypt: true,
        priority: 7,
        timestamp: 123,
    };

    let mut twice = Archive::open(Cursor::new(bytes.clone())).unwrap();
    twice.add_file("p", b"payload", flags).unwrap();
    twice.add_file("p", b"payload", flags).unwrap();
    twice.write().unwrap();
    let twice_bytes = twice.close().into_inner();

    let mut once = Archive::open(Cursor::new(bytes)).unwrap();
    once.add_file("p", b"payload", flags).unwrap();
    once.write().unwrap();
    let once_bytes = once.close().into_inner();

    assert_eq!(twice_bytes, once_bytes);
}

#[test]
fn strict_integrity_rejects_corrupted_md5() {
    let mut bytes = build_archive(1, vec![entry("a.txt", b"hello", false, false)], xxtea::DEFAULT_KEY);
    // Flip a payload byte without updating the recorded md5sum.
    let header_size = ark_archive::container::header::V1_SIZE;
    bytes[header_size] ^= 0xFF;

    let mut lenient = Archive::open(Cursor::new(bytes.clone())).unwrap();
    let file = lenient.read_file("a.txt").unwrap();
    assert!(file.md5_mismatch);

    let mut strict = Archive::open_with_options(
        Cursor::new(bytes),
        ArchiveOptions {
            strict_integrity: true,
            ..ArchiveOptions::default()
        },
    )
    .unwrap();
    assert!(strict.read_file("a.txt").is_err());
}
