//! Payload compression. Archive format version picks the codec: v1 uses
//! zlib, v3/v4 use zstd (spec.md §4.3).

use crate::error::Result;
use std::io::{Read, Write};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CodecId {
    Zlib,
    Zstd,
}

pub trait Compressor {
    fn id(&self) -> CodecId;
    fn compress(&self, src: &mut dyn Read, dst: &mut dyn Write, level: i32) -> Result<u64>;
    fn decompress(&self, src: &mut dyn Read, dst: &mut dyn Write) -> Result<u64>;
}

pub mod zlib;
pub mod zstd_codec;

/// Pick the codec mandated by an archive format version.
pub fn for_version(version: u32) -> Result<&'static dyn Compressor> {
    match version {
        1 => Ok(&zlib::ZlibCompressor),
        3 | 4 => Ok(&zstd_codec::ZstdCompressor),
        v => Err(crate::error::ArkError::UnsupportedVersion(v)),
    }
}
