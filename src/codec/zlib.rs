use super::{CodecId, Compressor};
use crate::error::Result;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

pub struct ZlibCompressor;

impl Compressor for ZlibCompressor {
    fn id(&self) -> CodecId {
        CodecId::Zlib
    }

    fn compress(&self, src: &mut dyn Read, dst: &mut dyn Write, level: i32) -> Result<u64> {
        let level = Compression::new(level.clamp(0, 9) as u32);
        let mut enc = ZlibEncoder::new(dst, level);
        let written = std::io::copy(src, &mut enc)?;
        enc.finish()?;
        Ok(written)
    }

    fn decompress(&self, src: &mut dyn Read, dst: &mut dyn Write) -> Result<u64> {
        let mut dec = ZlibDecoder::new(src);
        let written = std::io::copy(&mut dec, dst)?;
        Ok(written)
    }
}
