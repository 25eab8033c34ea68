/// In-process configuration for an [`crate::archive::Archive`].
///
/// There is no environment-variable or network configuration surface for
/// this format; everything a caller can tune lives here or on the
/// per-call `UpsertFlags` passed to `add_file`.
#[derive(Clone, Debug)]
pub struct ArchiveOptions {
    /// The 128-bit XXTEA key used for the metadata directory and any
    /// per-file encrypted payloads. Archives in the wild all use
    /// [`crate::xxtea::DEFAULT_KEY`]; this is only overridable for testing
    /// and for archives produced by other keys.
    pub key: [u32; 4],

    /// Upgrade a per-file MD5 mismatch from a logged warning to a hard
    /// [`crate::error::ArkError::CorruptPayload`]. Off by default, matching
    /// the reference behavior of returning the bytes anyway.
    pub strict_integrity: bool,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            key: crate::xxtea::DEFAULT_KEY,
            strict_integrity: false,
        }
    }
}

/// Per-file flags for [`crate::archive::Archive::add_file`].
#[derive(Clone, Copy, Debug)]
pub struct UpsertFlags {
    pub compress: bool,
    pub encrypt: bool,
    pub priority: u32,
    pub timestamp: u32,
}

impl Default for UpsertFlags {
    fn default() -> Self {
        Self {
            compress: true,
            encrypt: false,
            priority: 0,
            timestamp: 0,
        }
    }
}
