//! Truncation is part of "rewrite the whole archive" (the writer always
//! seeks to 0 and overwrites from scratch) but `std::io::Write` has no
//! portable notion of it — `File` has `set_len`, `Cursor<Vec<u8>>` needs its
//! backing vector truncated directly.

use std::fs::File;
use std::io::{self, Cursor};

pub trait Truncate {
    fn truncate_to(&mut self, len: u64) -> io::Result<()>;
}

impl Truncate for File {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

impl Truncate for Cursor<Vec<u8>> {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.get_mut().truncate(len as usize);
        Ok(())
    }
}
