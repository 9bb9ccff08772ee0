use std::path::PathBuf;

use shared_utils::env::EnvVarError;
use snafu::{Backtrace, Snafu};
use thiserror::Error;

use crate::models::job::RunMode;

/// Errors raised by the export engine and the bar sources feeding it.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ExportError {
    /// Streaming export was started while the host is not replaying history.
    #[snafu(display("Streaming export requires backtesting mode, host is in {mode} mode"))]
    NotBacktesting { mode: RunMode, backtrace: Backtrace },

    /// The output directory (or one of its ancestors) could not be created.
    #[snafu(display("Failed to create directory {}: {source}", path.display()))]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// Writing, flushing or opening the output file failed.
    #[snafu(display("Failed to write {}: {source}", path.display()))]
    Write {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// A bar input file could not be read.
    #[snafu(display("Failed to read bars from {}: {source}", path.display()))]
    ReadBars {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// A bar input file is not a JSON array of bars.
    #[snafu(display("Failed to parse bars from {}: {source}", path.display()))]
    ParseBars {
        path: PathBuf,
        source: serde_json::Error,
        backtrace: Backtrace,
    },
}

/// Errors related to loading the exporter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Env(#[from] EnvVarError),
}
