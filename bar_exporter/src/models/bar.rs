//! Canonical in-memory representation of one closed or forming OHLCV bar.
//!
//! Every [`BarSource`](crate::source::BarSource) hands out this struct regardless of
//! where the host got the data from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `chrono` format string for a bar's identity key and for the timestamp column.
pub const KEY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single time-series bar (OHLCV) keyed by its open time.
///
/// Two bars with the same [`key`](BarRecord::key) are the same bar as far as the
/// exporter is concerned, even if their prices differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRecord {
    /// The time the bar opened (UTC, second precision).
    pub open_time: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Tick volume for the bar interval.
    pub volume: u64,
}

impl BarRecord {
    /// Identity key: `open_time` rendered as `yyyy-MM-dd HH:mm:ss`.
    pub fn key(&self) -> String {
        self.open_time.format(KEY_FORMAT).to_string()
    }
}
