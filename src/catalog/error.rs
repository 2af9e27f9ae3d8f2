use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open catalog database {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("Migration to schema version {version} failed: {message}")]
    Migration { version: usize, message: String },

    #[error("Catalog schema version {found} is newer than the supported version {supported}")]
    SchemaTooNew { found: usize, supported: usize },

    #[error("Catalog schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Catalog is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, CatalogError>;
