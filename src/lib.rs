//! Reader, mutator and writer for the `.ark` asset container, plus the
//! PVR3 texture decoder that consumes its extracted bytes.
//!
//! Three pieces, specified together because the hard part of each leans
//! on the others: [`xxtea`] (the block cipher guarding the metadata
//! directory and optionally each payload), [`archive`] (the container
//! format itself — open, extract, upsert, persist), and [`pvr`] (the
//! texture format most payloads decode to).

#![forbid(unsafe_code)]

pub mod archive;
pub mod codec;
pub mod container;
pub mod error;
pub mod name;
pub mod options;
pub mod pvr;
pub mod util;
pub mod xxtea;

pub use archive::{Archive, LogicalFile};
pub use error::{ArkError, Result};
pub use name::ArkFilename;
pub use options::{ArchiveOptions, UpsertFlags};
pub use pvr::{Image, Pvr};

pub mod prelude {
    pub use crate::{Archive, ArchiveOptions, ArkError, ArkFilename, LogicalFile, Result, UpsertFlags};
    pub use crate::pvr::{Image, Pvr};
}
