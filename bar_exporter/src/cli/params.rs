use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    config::ExportConfig,
    models::timeframe::{TimeFrameError, parse_timeframe},
};

use super::commands::HostArgs;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error(transparent)]
    TimeFrame(#[from] TimeFrameError),

    #[error("Invalid server time {value:?}: {source}")]
    ServerTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Parses an RFC 3339 timestamp into UTC.
pub fn parse_server_time(value: &str) -> Result<DateTime<Utc>, ParamsError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| ParamsError::ServerTime {
            value: value.to_string(),
            source,
        })
}

impl HostArgs {
    /// Host label of the requested timeframe, e.g. `Minute5`.
    pub fn timeframe_label(&self) -> Result<String, ParamsError> {
        Ok(parse_timeframe(self.amount, &self.unit)?.to_string())
    }

    /// `--server-time`, or the current time when absent. Sub-second precision is dropped.
    pub fn run_timestamp(&self) -> Result<DateTime<Utc>, ParamsError> {
        let ts = match &self.server_time {
            Some(value) => parse_server_time(value)?,
            None => Utc::now(),
        };
        Ok(DateTime::from_timestamp(ts.timestamp(), 0).unwrap_or(ts))
    }

    /// Applies command-line overrides on top of the loaded config.
    pub fn apply_to(&self, config: &mut ExportConfig) {
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
    }
}
