mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_CATALOG_PATH: &str = "songs.db";

/// CLI arguments that can be overridden by the TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub root: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub flush_every: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub root: PathBuf,
    pub catalog_path: PathBuf,
    /// Flush after this many queued songs. 0 flushes only on close.
    pub flush_every: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let root = cli.root.clone();
        if !root.exists() {
            bail!("Library root does not exist: {:?}", root);
        }
        if !root.is_dir() {
            bail!("Library root is not a directory: {:?}", root);
        }

        let catalog_path = file
            .catalog_path
            .map(PathBuf::from)
            .or_else(|| cli.catalog_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));

        if catalog_path.is_dir() {
            bail!("Catalog path is a directory: {:?}", catalog_path);
        }

        let flush_every = file.flush_every.unwrap_or(cli.flush_every);

        Ok(AppConfig {
            root,
            catalog_path,
            flush_every,
        })
    }
}
