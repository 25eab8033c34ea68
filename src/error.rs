use thiserror::Error;

/// Crate-wide error type. `IntegrityWarning` from the spec is deliberately
/// not a variant here: an MD5 mismatch is recoverable and rides back with
/// the extracted bytes instead of aborting the read (see
/// [`crate::archive::LogicalFile::md5_mismatch`]).
#[derive(Error, Debug)]
pub enum ArkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported archive version {0} (expected 1, 3 or 4)")]
    UnsupportedVersion(u32),

    #[error("bad magic bytes: expected {expected:?}, found {found:?}")]
    BadMagic {
        expected: &'static [u8],
        found: Vec<u8>,
    },

    #[error("invalid length: {0}")]
    InvalidLength(String),

    #[error("corrupt metadata: {0}")]
    CorruptMetadata(String),

    #[error("unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    #[error("external alpha image dimensions ({alpha_w}x{alpha_h}) do not match primary ({w}x{h})")]
    MismatchedAlphaDimensions {
        w: u32,
        h: u32,
        alpha_w: u32,
        alpha_h: u32,
    },

    #[error("corrupt payload: {0}")]
    CorruptPayload(String),

    #[error("path not found in archive: {0}")]
    NotFound(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, ArkError>;
