//! Output file identity.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use snafu::ResultExt;
use tracing::info;

use crate::errors::{CreateDirSnafu, ExportError};

/// `chrono` format of the run timestamp embedded in the file name.
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `{symbol}_{timeframe}_{yyyyMMdd_HHmmss}.csv`, symbol lower-cased with every `/` removed
/// and timeframe lower-cased.
pub fn output_file_name(symbol: &str, timeframe: &str, run_timestamp: DateTime<Utc>) -> String {
    let symbol = symbol.to_lowercase().replace('/', "");
    let timeframe = timeframe.to_lowercase();
    let stamp = run_timestamp.format(RUN_TIMESTAMP_FORMAT);
    format!("{symbol}_{timeframe}_{stamp}.csv")
}

/// Resolves the output path inside `dir`, creating `dir` and any missing ancestors.
///
/// Calling this again for an existing directory is a no-op apart from the path computation.
pub fn resolve_output_path(
    dir: &Path,
    symbol: &str,
    timeframe: &str,
    run_timestamp: DateTime<Utc>,
) -> Result<PathBuf, ExportError> {
    if !dir.is_dir() {
        fs::create_dir_all(dir).context(CreateDirSnafu { path: dir })?;
        info!(dir = %dir.display(), "created output directory");
    }
    Ok(dir.join(output_file_name(symbol, timeframe, run_timestamp)))
}
