//! Bar record → text line mapping.
//!
//! Rust's float formatting never consults a locale, so `{:.5}` always yields
//! a `.` separator and no digit grouping. Nothing here is quoted or escaped:
//! every field is a timestamp or a number.

use crate::models::{
    bar::{BarRecord, KEY_FORMAT},
    job::{LineFormat, PRICE_PRECISION},
};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

const PRICE_COLUMNS: [&str; 5] = ["timestamp", "open", "high", "low", "close"];

/// Header row for `format`. Depends on nothing but the field policy.
pub fn header(format: LineFormat) -> String {
    let mut columns = PRICE_COLUMNS.to_vec();
    if format.include_volume {
        columns.push("volume");
    }
    columns.join(&format.delimiter.as_char().to_string())
}

/// Renders one bar as `timestamp;open;high;low;close[;volume]`, without a line ending.
pub fn format_line(bar: &BarRecord, format: LineFormat) -> String {
    let delimiter = format.delimiter.as_char();
    let mut line = bar.open_time.format(KEY_FORMAT).to_string();

    for price in [bar.open, bar.high, bar.low, bar.close] {
        line.push(delimiter);
        line.push_str(&format!("{:.*}", PRICE_PRECISION, price));
    }

    if format.include_volume {
        line.push(delimiter);
        line.push_str(&bar.volume.to_string());
    }

    line
}
