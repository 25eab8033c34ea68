//! PVR3 texture container decoding (spec C7): header, optional metadata
//! block, pixel-format dispatch, and external-alpha splicing.

pub mod astc;
pub mod etc1;
pub mod image;

pub use image::Image;

use crate::error::{ArkError, Result};
use crate::util::le::{read_exact_vec, read_u32};
use std::io::{Cursor, Read};

pub const MAGIC: &[u8; 4] = b"PVR\x03";
pub const HEADER_SIZE: usize = 52;

/// Well-known metadata key (within the `"PVR\x03"` fourCC namespace)
/// carrying a 3-bool orientation triple.
const ORIENTATION_KEY: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub flags: u32,
    pub pixel_format: [u8; 8],
    pub color_space: u32,
    pub channel_type: u32,
    pub height: u32,
    pub width: u32,
    pub depth: u32,
    pub num_surfaces: u32,
    pub num_faces: u32,
    pub mip_map_count: u32,
    pub metadata_size: u32,
}

impl Header {
    /// `flags == 2` marks premultiplied alpha. The reference exposes this
    /// flag without transforming pixels (spec §9 open questions); callers
    /// that need straight alpha must un-premultiply themselves.
    pub fn premultiplied(&self) -> bool {
        self.flags == 2
    }

    fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let magic = read_exact_vec(r, 4)?;
        if magic.as_slice() != MAGIC {
            return Err(ArkError::BadMagic {
                expected: b"PVR\x03",
                found: magic,
            });
        }
        let flags = read_u32(r)?;
        let pixel_format_vec = read_exact_vec(r, 8)?;
        let mut pixel_format = [0u8; 8];
        pixel_format.copy_from_slice(&pixel_format_vec);
        Ok(Header {
            flags,
            pixel_format,
            color_space: read_u32(r)?,
            channel_type: read_u32(r)?,
            height: read_u32(r)?,
            width: read_u32(r)?,
            depth: read_u32(r)?,
            num_surfaces: read_u32(r)?,
            num_faces: read_u32(r)?,
            mip_map_count: read_u32(r)?,
            metadata_size: read_u32(r)?,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Orientation {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

enum PixelFormat {
    RawRgba8888,
    Astc8x8,
    Etc1,
}

fn dispatch_pixel_format(pixel_format: &[u8; 8]) -> Result<PixelFormat> {
    let channel_bit_rates = &pixel_format[4..8];
    if channel_bit_rates.iter().any(|&b| b != 0) {
        let channels = &pixel_format[0..4];
        if channels.eq_ignore_ascii_case(b"rgba") && channel_bit_rates == [8, 8, 8, 8] {
            return Ok(PixelFormat::RawRgba8888);
        }
        return Err(ArkError::UnsupportedPixelFormat(format!(
            "channel layout {:?} with bit rates {:?}",
            String::from_utf8_lossy(channels),
            channel_bit_rates
        )));
    }

    let enum_value = u32::from_le_bytes(pixel_format[0..4].try_into().unwrap());
    match enum_value {
        34 => Ok(PixelFormat::Astc8x8),
        6 => Ok(PixelFormat::Etc1),
        other => Err(ArkError::UnsupportedPixelFormat(format!(
            "compressed format enum {other}"
        ))),
    }
}

/// Parsed header, orientation metadata (if present) and the decoded image.
/// `Pvr::decode` is the entry point most callers want; this is exposed for
/// callers that need the header without paying for a full pixel decode.
pub struct Pvr {
    pub header: Header,
    pub orientation: Orientation,
    pub image: Image,
}

impl Pvr {
    /// Parse and fully decode a PVR3 file to RGBA8, optionally splicing in
    /// an external alpha sibling (same format and dimensions, itself
    /// decoded as luminance).
    pub fn decode(bytes: &[u8], external_alpha: Option<&[u8]>) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);
        let header = Header::read_from(&mut cursor)?;
        let orientation = read_metadata(&mut cursor, &header)?;

        let payload_offset = HEADER_SIZE + header.metadata_size as usize;
        let payload = bytes
            .get(payload_offset..)
            .ok_or_else(|| ArkError::InvalidLength("pvr payload offset past EOF".to_string()))?;

        let mut image = decode_pixels(payload, &header)?;

        if let Some(alpha_bytes) = external_alpha {
            if !image.has_alpha_content() {
                let alpha_pvr = Pvr::decode(alpha_bytes, None)?;
                image = image.with_alpha_from(&alpha_pvr.image)?;
            }
        }

        Ok(Pvr {
            header,
            orientation,
            image,
        })
    }
}

fn read_metadata<R: Read>(r: &mut R, header: &Header) -> Result<Orientation> {
    if header.metadata_size == 0 {
        return Ok(Orientation::default());
    }

    let four_cc = read_exact_vec(r, 4)?;
    let key = read_u32(r)?;
    let data_size = read_u32(r)?;
    let data = read_exact_vec(r, data_size as usize)?;

    if four_cc.as_slice() != MAGIC {
        log::warn!(
            "pvr metadata identifier {:?} not recognized",
            String::from_utf8_lossy(&four_cc)
        );
        return Ok(Orientation::default());
    }

    match key {
        ORIENTATION_KEY if data.len() >= 3 => Ok(Orientation {
            x: data[0] != 0,
            y: data[1] != 0,
            z: data[2] != 0,
        }),
        _ => {
            log::warn!("pvr metadata key {key} not recognized");
            Ok(Orientation::default())
        }
    }
}

/// `texture2ddecoder`'s block decoders hand back packed `u32` texels in the
/// same byte order the original tool reads off as PIL's `"BGRA"` rawmode
/// (`Image.frombytes(..., "raw", "BGRA")`); reorder to true RGBA8 bytes.
pub(crate) fn bgra_pixels_to_rgba_bytes(pixels: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len() * 4);
    for p in pixels {
        let [b, g, r, a] = p.to_le_bytes();
        out.extend_from_slice(&[r, g, b, a]);
    }
    out
}

fn decode_pixels(payload: &[u8], header: &Header) -> Result<Image> {
    let (width, height) = (header.width, header.height);
    let pixels = match dispatch_pixel_format(&header.pixel_format)? {
        PixelFormat::RawRgba8888 => {
            let expected = width as usize * height as usize * 4;
            if payload.len() < expected {
                return Err(ArkError::CorruptPayload(format!(
                    "raw rgba8888 payload too short: need {expected}, got {}",
                    payload.len()
                )));
            }
            payload[..expected].to_vec()
        }
        PixelFormat::Astc8x8 => astc::decode(payload, width, height)?,
        PixelFormat::Etc1 => etc1::decode(payload, width, height)?,
    };
    Ok(Image::new(width, height, pixels))
}
