//! Fixed-width, zero-padded ASCII string fields, as used throughout the
//! `.ark` metadata records.

/// Pack `s` into a fixed-width, NUL-padded ASCII byte array. Non-ASCII
/// bytes are dropped (mirrors the reference's `encode('ascii', errors =
/// 'ignore')`). Truncates silently if `s` is longer than `width`.
pub fn pack_fixed(s: &str, width: usize) -> Vec<u8> {
    let mut out = vec![0u8; width];
    let ascii: Vec<u8> = s.bytes().filter(|b| b.is_ascii()).collect();
    let n = ascii.len().min(width);
    out[..n].copy_from_slice(&ascii[..n]);
    out
}

/// Read a NUL-padded ASCII field back out, truncating at the first NUL.
pub fn unpack_fixed(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}
