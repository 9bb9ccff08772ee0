#![allow(dead_code)]

use std::{fs, path::Path};

use bar_exporter::models::{
    bar::BarRecord,
    job::{Delimiter, ExportJob, ExportMode, LineFormat, WindowEnd},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

pub fn run_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0).unwrap()
}

/// `n` one-minute bars starting at 2025-01-06 00:00:00, prices drifting with the index.
pub fn history(n: usize) -> Vec<BarRecord> {
    let t0 = Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let base = 1.08 + i as f64 * 0.000_013;
            BarRecord {
                open_time: t0 + Duration::minutes(i as i64),
                open: base,
                high: base + 0.0004,
                low: base - 0.0003,
                close: base + 0.0001,
                volume: 50 + (i as u64 % 17),
            }
        })
        .collect()
}

pub fn streaming_job(dir: &Path) -> ExportJob {
    ExportJob {
        symbol: "EUR/USD".into(),
        timeframe: "Minute".into(),
        output_dir: dir.to_path_buf(),
        run_timestamp: run_timestamp(),
        mode: ExportMode::Streaming,
        format: LineFormat {
            delimiter: Delimiter::Semicolon,
            include_volume: true,
        },
    }
}

pub fn bulk_job(dir: &Path, bar_count: usize, window_end: WindowEnd) -> ExportJob {
    ExportJob {
        mode: ExportMode::Bulk {
            bar_count,
            window_end,
        },
        ..streaming_job(dir)
    }
}

pub fn tempdir() -> TempDir {
    TempDir::new().expect("tempdir")
}

/// Data rows of an output file (header excluded).
pub fn data_rows(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read output")
        .lines()
        .skip(1)
        .map(str::to_string)
        .collect()
}

pub fn row_keys(path: &Path) -> Vec<String> {
    data_rows(path)
        .iter()
        .map(|row| row.split(';').next().unwrap_or_default().to_string())
        .collect()
}
