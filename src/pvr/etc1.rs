//! ETC1 (Ericsson Texture Compression, original variant) to RGBA8.
//!
//! `luna_kit/pvr.py` decodes this format via `texture2ddecoder.decode_etc1`
//! rather than a hand-rolled block decoder; this module routes through the
//! same library's Rust port to match.

use super::bgra_pixels_to_rgba_bytes;
use crate::error::{ArkError, Result};

const BLOCK_SIZE: usize = 4;
const BLOCK_BYTES: usize = 8;

pub fn decode(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let blocks_x = width.div_ceil(BLOCK_SIZE as u32) as usize;
    let blocks_y = height.div_ceil(BLOCK_SIZE as u32) as usize;
    let expected = blocks_x * blocks_y * BLOCK_BYTES;
    if data.len() < expected {
        return Err(ArkError::CorruptPayload(format!(
            "etc1 payload too short: need {expected} bytes for {width}x{height}, got {}",
            data.len()
        )));
    }

    let pixels = texture2ddecoder::decode_etc1(data, width as usize, height as usize)
        .map_err(|e| ArkError::CorruptPayload(format!("etc1 decode failed: {e}")))?;

    // Same BGRA-ordered packing as the original tool's PIL `"BGRA"` rawmode
    // read; reorder to true RGBA8.
    Ok(bgra_pixels_to_rgba_bytes(&pixels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_buffer() {
        assert!(decode(&[0u8; 4], 4, 4).is_err());
    }

    #[test]
    fn decodes_single_block_image_to_tightly_packed_rgba8() {
        // Individual mode (diff=0), flip=0, all intensity table indices and
        // pixel index bits zero: a well-formed, if unremarkable, block.
        let block = [0x84, 0x00, 0x00, 0x00, 0, 0, 0, 0];
        let out = decode(&block, 4, 4).unwrap();
        assert_eq!(out.len(), 4 * 4 * 4);
    }
}
