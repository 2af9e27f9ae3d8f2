//! Glue between a spawned walk and the catalog.

use crate::catalog::{Catalog, CatalogError};
use crate::tag_reader::TagReader;
use crate::walker::{WalkError, Walker};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum IndexError {
    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Songs produced by the walk.
    pub emitted: usize,
    /// Songs written by flushes during this scan.
    pub persisted: usize,
}

/// Drains `walker` into `catalog`, flushing every `flush_every` songs (never,
/// when 0) and once more after a complete walk.
///
/// An aborted walk is not followed by a flush: whatever was queued since the
/// last flush stays in [`Catalog::pending`] for the caller to inspect.
pub fn index_library<R: TagReader + 'static>(
    walker: Walker<R>,
    catalog: &mut Catalog,
    flush_every: usize,
) -> Result<ScanSummary, IndexError> {
    let mut summary = ScanSummary::default();
    let mut stream = walker.spawn();

    while let Some(song) = stream.next() {
        catalog.enqueue(song);
        if flush_every == 0 || catalog.pending().len() < flush_every {
            continue;
        }
        match catalog.flush() {
            Ok(written) => summary.persisted += written,
            Err(err) => {
                // Hang up so the walker thread stops before we report.
                let _ = stream.finish();
                return Err(err.into());
            }
        }
    }

    summary.emitted = match stream.finish() {
        Ok(emitted) => emitted,
        Err(err) => {
            warn!(
                "Walk aborted, {} songs left unpersisted: {}",
                catalog.pending().len(),
                err
            );
            return Err(err.into());
        }
    };

    summary.persisted += catalog.flush()?;
    info!(
        "Scan finished: {} songs emitted, {} persisted",
        summary.emitted, summary.persisted
    );
    Ok(summary)
}
