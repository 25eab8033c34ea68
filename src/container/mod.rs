//! On-disk layout types: the archive [`header::Header`] and the
//! [`metadata::FileMetadata`] directory it points at.

pub mod header;
pub mod metadata;
