//! Bit-exact little-endian primitives for the fixed-layout records in the
//! archive header and metadata directory. Every record in this format is
//! unsigned-LE integers and zero-padded ASCII byte arrays, so a handful of
//! small helpers on top of `Read`/`Write` cover every struct without
//! needing a derive-macro layer.

use std::io::{self, Read, Write};

pub fn read_u32<R: Read>(r: &mut R) -> io::Result<u32> {
    let mut b = [0u8; 4];
    r.read_exact(&mut b)?;
    Ok(u32::from_le_bytes(b))
}

pub fn write_u32<W: Write>(w: &mut W, v: u32) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

pub fn read_exact_vec<R: Read>(r: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn u32_round_trip() {
        let mut buf = Vec::new();
        write_u32(&mut buf, 0xdead_beef).unwrap();
        let mut c = Cursor::new(buf);
        assert_eq!(read_u32(&mut c).unwrap(), 0xdead_beef);
    }
}
