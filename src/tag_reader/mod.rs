//! Access to tag containers embedded in audio files.
//!
//! The resolver only needs a narrow view of a tag: its reported version, the
//! handful of fields every container version carries, lookups of named frames,
//! and the comment list. [`TagReader`] opens a file and hands back such a view.

mod id3_reader;

pub use id3_reader::Id3TagReader;

use std::path::Path;
use thiserror::Error;

/// Fields present in every tag container version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagField {
    Artist,
    Album,
    Title,
    Genre,
    Year,
}

#[derive(Debug, Error)]
pub enum TagError {
    #[error("no tag container found")]
    NoTag,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ID3 error: {0}")]
    Id3(id3::Error),
}

impl From<id3::Error> for TagError {
    fn from(err: id3::Error) -> Self {
        match err.kind {
            id3::ErrorKind::NoTag => TagError::NoTag,
            _ => TagError::Id3(err),
        }
    }
}

/// An opened tag container. Dropping the handle releases it.
pub trait TagHandle {
    /// Version of the container, e.g. `"1.1"` or `"2.3.0"`.
    fn version(&self) -> String;

    fn field(&self, field: TagField) -> Option<String>;

    /// Text of the frame with the given identifier, if present.
    fn frame(&self, frame_id: &str) -> Option<String>;

    fn comments(&self) -> Vec<String>;
}

pub trait TagReader: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn TagHandle>, TagError>;
}
