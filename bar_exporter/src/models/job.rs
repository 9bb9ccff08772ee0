//! Run configuration handed to the export engine.
//!
//! An [`ExportJob`] is built once at run start (usually through
//! [`ExportConfig::to_job`](crate::config::ExportConfig::to_job)) and never mutated afterwards.

use std::{fmt, path::PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of fractional digits every price column is rendered with.
pub const PRICE_PRECISION: usize = 5;

/// Field separator of the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    #[default]
    Semicolon,
    Comma,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Semicolon => ';',
            Delimiter::Comma => ',',
        }
    }
}

/// Which bar closes the bulk export window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowEnd {
    /// The latest index the host exposes, forming bar included.
    #[default]
    IncludeForming,
    /// The latest closed bar (`count - 2`).
    ClosedOnly,
}

/// How the bars of a job reach the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// One-shot export of the trailing `bar_count` bars.
    Bulk { bar_count: usize, window_end: WindowEnd },
    /// Append each newly closed bar as the host reports it.
    Streaming,
}

/// Execution mode reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Backtesting,
    RealTime,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Backtesting => f.write_str("backtesting"),
            RunMode::RealTime => f.write_str("real-time"),
        }
    }
}

/// Field selection and separator policy for formatted lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFormat {
    pub delimiter: Delimiter,
    pub include_volume: bool,
}

/// Everything one export run needs, fixed when the run starts.
///
/// The output path is derived from `output_dir`, `symbol`, `timeframe` and
/// `run_timestamp`, so two jobs with the same values write the same file.
///
/// ```
/// use bar_exporter::io::path::output_file_name;
/// use chrono::{TimeZone, Utc};
///
/// let run = Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0).unwrap();
/// assert_eq!(output_file_name("EUR/USD", "Hour4", run), "eurusd_hour4_20250106_080000.csv");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExportJob {
    /// Symbol as the host names it (e.g. `EUR/USD`).
    pub symbol: String,
    /// Timeframe label as the host names it (e.g. `Hour4`).
    pub timeframe: String,
    pub output_dir: PathBuf,
    /// Host server time at run start; part of the output file name.
    pub run_timestamp: DateTime<Utc>,
    pub mode: ExportMode,
    pub format: LineFormat,
}
