use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use song_indexer::config::{AppConfig, CliConfig, FileConfig};
use song_indexer::{index_library, Catalog, Id3TagReader, Walker};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Root directory of the music library to index. The walker resolves it
    /// to an absolute path.
    pub root: PathBuf,

    /// Path to the SQLite catalog database file. Defaults to songs.db.
    #[clap(long, value_parser = parse_path)]
    pub catalog: Option<PathBuf>,

    /// Path to a TOML config file. Values in it override the CLI.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Flush queued songs every N songs. 0 flushes only once the walk is done.
    #[clap(long, default_value_t = 0)]
    pub flush_every: usize,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let cli_config = CliConfig {
        root: cli_args.root,
        catalog_path: cli_args.catalog,
        flush_every: cli_args.flush_every,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Opening catalog at {:?}...", config.catalog_path);
    let mut catalog = Catalog::open(&config.catalog_path)
        .with_context(|| format!("Failed to open catalog {:?}", config.catalog_path))?;

    let walker = Walker::new(config.root.clone(), Id3TagReader::new());
    let summary = index_library(walker, &mut catalog, config.flush_every)
        .with_context(|| format!("Failed to index {:?}", config.root))?;

    catalog.close().context("Failed to close catalog")?;
    info!(
        "Indexed {} songs from {:?} into {:?}",
        summary.persisted, config.root, config.catalog_path
    );
    Ok(())
}
