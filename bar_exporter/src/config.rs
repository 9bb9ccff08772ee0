//! Exporter configuration: parsing, defaults and job construction.
//!
//! The configuration is a small TOML document; every key is optional:
//!
//! ```toml
//! output_dir = "/data/bars"
//! bar_count = 5000
//! include_volume = true
//! delimiter = "comma"          # or "semicolon"
//! window_end = "closed_only"   # or "include_forming"
//! auto_start = false
//! ```
//!
//! Entrypoints:
//! - Parse from a TOML string: [`load_config_str`]
//! - Parse from a file path: [`load_config_path`]
//! - Resolve from an explicit path or the [`CONFIG_ENV_VAR`] variable: [`resolve_config`]

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_utils::env::get_env_path;

use crate::{
    errors::ConfigError,
    models::job::{Delimiter, ExportJob, ExportMode, LineFormat, WindowEnd},
};

/// Environment variable naming the config file when `--config` is not given.
pub const CONFIG_ENV_VAR: &str = "BAR_EXPORTER_CONFIG";

/// Host-owned parameters, read-only to the export engine.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Directory the output files are written to; created on demand.
    pub output_dir: PathBuf,
    /// Number of trailing bars a bulk export writes.
    pub bar_count: usize,
    pub include_volume: bool,
    pub delimiter: Delimiter,
    /// Whether the bulk window ends at the forming bar or the last closed one.
    pub window_end: WindowEnd,
    /// Export as soon as the run starts instead of waiting for a manual trigger.
    pub auto_start: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
            bar_count: 1000,
            include_volume: true,
            delimiter: Delimiter::Semicolon,
            window_end: WindowEnd::IncludeForming,
            auto_start: true,
        }
    }
}

impl ExportConfig {
    pub fn line_format(&self) -> LineFormat {
        LineFormat {
            delimiter: self.delimiter,
            include_volume: self.include_volume,
        }
    }

    /// Builds the immutable job for one run.
    ///
    /// `streaming` selects append mode; otherwise the job is a bulk export of
    /// `bar_count` bars ending at `window_end`.
    pub fn to_job(
        &self,
        symbol: impl Into<String>,
        timeframe: impl Into<String>,
        run_timestamp: DateTime<Utc>,
        streaming: bool,
    ) -> ExportJob {
        let mode = if streaming {
            ExportMode::Streaming
        } else {
            ExportMode::Bulk {
                bar_count: self.bar_count,
                window_end: self.window_end,
            }
        };
        ExportJob {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            output_dir: self.output_dir.clone(),
            run_timestamp,
            mode,
            format: self.line_format(),
        }
    }
}

pub fn load_config_str(s: &str) -> Result<ExportConfig, ConfigError> {
    Ok(toml::from_str(s)?)
}

pub fn load_config_path(path: &Path) -> Result<ExportConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_str(&s)
}

/// Loads `explicit` if given, else the file named by [`CONFIG_ENV_VAR`], else defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ExportConfig, ConfigError> {
    match explicit {
        Some(path) => load_config_path(path),
        None => match get_env_path(CONFIG_ENV_VAR)? {
            Some(path) => load_config_path(&path),
            None => Ok(ExportConfig::default()),
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(load_config_str("").unwrap(), ExportConfig::default());
    }

    #[test]
    fn parses_every_key() {
        let cfg = load_config_str(
            r#"
            output_dir = "/tmp/bars"
            bar_count = 250
            include_volume = false
            delimiter = "comma"
            window_end = "closed_only"
            auto_start = false
            "#,
        )
        .unwrap();

        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/bars"));
        assert_eq!(cfg.bar_count, 250);
        assert!(!cfg.include_volume);
        assert_eq!(cfg.delimiter, Delimiter::Comma);
        assert_eq!(cfg.window_end, WindowEnd::ClosedOnly);
        assert!(!cfg.auto_start);
    }

    #[test]
    fn rejects_unknown_keys_and_values() {
        assert!(matches!(
            load_config_str("precision = 3"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            load_config_str(r#"delimiter = "tab""#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config_path(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn explicit_path_wins() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cfg.toml");
        fs::write(&path, "bar_count = 7").unwrap();
        assert_eq!(resolve_config(Some(&path)).unwrap().bar_count, 7);
    }

    #[test]
    fn to_job_carries_mode_and_format() {
        let cfg = ExportConfig {
            bar_count: 42,
            delimiter: Delimiter::Comma,
            ..ExportConfig::default()
        };
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let bulk = cfg.to_job("EUR/USD", "Hour", ts, false);
        assert_eq!(
            bulk.mode,
            ExportMode::Bulk {
                bar_count: 42,
                window_end: WindowEnd::IncludeForming,
            }
        );
        assert_eq!(bulk.format.delimiter, Delimiter::Comma);
        assert_eq!(bulk.symbol, "EUR/USD");

        let stream = cfg.to_job("EUR/USD", "Hour", ts, true);
        assert_eq!(stream.mode, ExportMode::Streaming);
        assert_eq!(stream.run_timestamp, ts);
    }
}
