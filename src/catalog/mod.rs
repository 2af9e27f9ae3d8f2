mod error;
mod schema;
mod store;

pub use error::{CatalogError, Result};
pub use schema::{latest_version, CATALOG_VERSIONED_SCHEMAS};
pub use store::Catalog;
