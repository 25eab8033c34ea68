//! A decoded RGBA8 image: the universal output type every PVR pixel format
//! dispatches to.

use crate::error::{ArkError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8, row-major, top-to-bottom. Always
    /// `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl Image {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Image {
            width,
            height,
            pixels,
        }
    }

    /// True if any pixel's alpha byte is not fully opaque. A primary image
    /// that already "has alpha" in this sense skips external-alpha
    /// splicing (spec §4.7 step 4).
    pub fn has_alpha_content(&self) -> bool {
        self.pixels.chunks_exact(4).any(|p| p[3] != 0xFF)
    }

    /// Replace this image's alpha channel with `alpha`'s luminance. `alpha`
    /// must match this image's dimensions.
    pub fn with_alpha_from(&self, alpha: &Image) -> Result<Image> {
        if alpha.width != self.width || alpha.height != self.height {
            return Err(ArkError::MismatchedAlphaDimensions {
                w: self.width,
                h: self.height,
                alpha_w: alpha.width,
                alpha_h: alpha.height,
            });
        }

        let mut pixels = self.pixels.clone();
        for (dst, src) in pixels.chunks_exact_mut(4).zip(alpha.pixels.chunks_exact(4)) {
            dst[3] = luminance(src[0], src[1], src[2]);
        }

        Ok(Image::new(self.width, self.height, pixels))
    }
}

fn luminance(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32).round() as u8
}
