//! ASTC 8x8 (LDR profile) to RGBA8.
//!
//! Block-mode dispatch, trit/quint integer-sequence coding for endpoints and
//! weights, and multi-partition pattern tables are a lot of surface to get
//! bit-exact by hand. The original tool doesn't hand-roll them either:
//! `luna_kit/pvr.py` calls `texture2ddecoder.decode_astc(data, width,
//! height, 8, 8)`, so this module routes through the same library's Rust
//! port instead of re-deriving those tables from scratch.

use super::bgra_pixels_to_rgba_bytes;
use super::image::Image;
use crate::error::{ArkError, Result};

const BLOCK_WIDTH: usize = 8;
const BLOCK_HEIGHT: usize = 8;
const BLOCK_BYTES: usize = 16;

pub fn decode(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let blocks_x = (width as usize).div_ceil(BLOCK_WIDTH);
    let blocks_y = (height as usize).div_ceil(BLOCK_HEIGHT);
    let expected = blocks_x * blocks_y * BLOCK_BYTES;
    if data.len() < expected {
        return Err(ArkError::CorruptPayload(format!(
            "astc payload too short: need {expected} bytes for {width}x{height}, got {}",
            data.len()
        )));
    }

    let pixels = texture2ddecoder::decode_astc(
        data,
        width as usize,
        height as usize,
        BLOCK_WIDTH,
        BLOCK_HEIGHT,
    )
    .map_err(|e| ArkError::CorruptPayload(format!("astc decode failed: {e}")))?;

    // `decode_astc` hands back packed texels the same way PIL's "BGRA"
    // rawmode reads them in the original tool; reorder to true RGBA8.
    Ok(bgra_pixels_to_rgba_bytes(&pixels))
}

pub fn decode_to_image(data: &[u8], width: u32, height: u32) -> Result<Image> {
    let pixels = decode(data, width, height)?;
    Ok(Image::new(width, height, pixels))
}
