//! Song Indexer Library
//!
//! Walks a music library, resolves per-file metadata from directory
//! conventions and ID3 tags, and persists the result into a SQLite catalog.

pub mod catalog;
pub mod config;
pub mod indexer;
pub mod metadata;
pub mod sqlite_persistence;
pub mod tag_reader;
pub mod walker;

pub use catalog::{Catalog, CatalogError};
pub use indexer::{index_library, IndexError, ScanSummary};
pub use metadata::Song;
pub use tag_reader::{Id3TagReader, TagReader};
pub use walker::{SongStream, WalkError, Walker};
