//! The public archive engine (spec C9): open a source, enumerate and
//! extract entries, upsert new ones, and persist the result.
//!
//! An `Archive` owns its backing source exclusively for its whole
//! lifetime — see the crate-level concurrency notes. Mutation
//! (`add_file`) only touches in-memory state; nothing is written to the
//! source until `write` succeeds, so a failed or abandoned mutation never
//! corrupts the on-disk archive.

mod extract;
mod mutate;
mod reader;
mod writer;

pub use extract::LogicalFile;

use crate::container::header::Header;
use crate::container::metadata::{ArchiveDirectory, FileMetadata};
use crate::error::{ArkError, Result};
use crate::options::{ArchiveOptions, UpsertFlags};
use crate::util::truncate::Truncate;
use std::io::{Read, Seek, Write};

pub struct Archive<S: Read + Write + Seek> {
    source: S,
    header: Header,
    directory: ArchiveDirectory,
    /// Every entry's on-disk bytes, concatenated in `file_location` order,
    /// covering `[header_size, metadata_offset)`. Kept in memory so
    /// `add_file` never has to shuffle bytes on the source in place.
    payload: Vec<u8>,
    options: ArchiveOptions,
}

impl<S: Read + Write + Seek> Archive<S> {
    pub fn open(source: S) -> Result<Self> {
        Self::open_with_options(source, ArchiveOptions::default())
    }

    pub fn open_with_options(mut source: S, options: ArchiveOptions) -> Result<Self> {
        let (header, directory, payload) = reader::read_archive(&mut source, &options)?;
        Ok(Self {
            source,
            header,
            directory,
            payload,
            options,
        })
    }

    /// Snapshot of the directory, in serialization order.
    pub fn files(&self) -> Vec<FileMetadata> {
        self.directory.as_slice().to_vec()
    }

    pub fn read_file(&mut self, path: &str) -> Result<LogicalFile> {
        let meta = self
            .directory
            .find(path)
            .ok_or_else(|| ArkError::NotFound(path.to_string()))?
            .clone();
        extract::extract(
            &meta,
            &self.payload,
            self.header.struct_size() as u32,
            self.header.version,
            &self.options,
        )
    }

    pub fn add_file(&mut self, path: &str, data: &[u8], flags: UpsertFlags) -> Result<()> {
        mutate::upsert(
            &mut self.header,
            &mut self.directory,
            &mut self.payload,
            path,
            data,
            flags,
            &self.options,
        )
    }

    /// Parsed from `data_ver.xml`'s `Value` attribute, if the archive
    /// carries one. The rest of the XML data-object layer this file
    /// belongs to is out of scope for this crate; callers needing more
    /// than this one value should read the file themselves via
    /// `read_file` and hand it to their own XML layer.
    pub fn data_version(&mut self) -> Option<String> {
        let file = self.read_file("data_ver.xml").ok()?;
        let text = String::from_utf8_lossy(&file.bytes);
        first_attribute_value(&text, "Value")
    }

    pub fn close(self) -> S {
        self.source
    }
}

impl<S: Read + Write + Seek + Truncate> Archive<S> {
    pub fn write(&mut self) -> Result<()> {
        writer::write_archive(
            &mut self.source,
            &self.header,
            &self.directory,
            &self.payload,
            &self.options,
        )
    }
}

fn first_attribute_value(xml: &str, attr: &str) -> Option<String> {
    let needle = format!("{attr}=\"");
    let start = xml.find(&needle)? + needle.len();
    let end = xml[start..].find('"')? + start;
    Some(xml[start..end].to_string())
}
