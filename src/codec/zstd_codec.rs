use super::{CodecId, Compressor};
use crate::error::Result;
use std::io::{Read, Write};

pub struct ZstdCompressor;

impl Compressor for ZstdCompressor {
    fn id(&self) -> CodecId {
        CodecId::Zstd
    }

    fn compress(&self, src: &mut dyn Read, dst: &mut dyn Write, level: i32) -> Result<u64> {
        let mut enc = zstd::stream::Encoder::new(dst, level)?;
        let written = std::io::copy(src, &mut enc)?;
        enc.finish()?;
        Ok(written)
    }

    fn decompress(&self, src: &mut dyn Read, dst: &mut dyn Write) -> Result<u64> {
        let mut dec = zstd::stream::Decoder::new(src)?;
        let written = std::io::copy(&mut dec, dst)?;
        Ok(written)
    }
}
