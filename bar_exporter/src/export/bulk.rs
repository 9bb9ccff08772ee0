use std::{fs, path::PathBuf};

use chrono::{DateTime, Utc};
use snafu::ResultExt;
use tracing::info;

use crate::{
    errors::{ExportError, WriteSnafu},
    io::{
        format::{LINE_ENDING, format_line, header},
        path::resolve_output_path,
    },
    models::job::{ExportJob, ExportMode, LineFormat, WindowEnd},
    source::BarSource,
};

const PROGRESS_EVERY: usize = 10_000;

/// Outcome of one bulk export.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkSummary {
    pub path: PathBuf,
    pub rows: usize,
    /// Open time of the first exported bar, `None` when nothing was exported.
    pub first: Option<DateTime<Utc>>,
    pub last: Option<DateTime<Utc>>,
    /// Size of the written file in bytes.
    pub bytes: u64,
}

/// Index range `start..=end` holding the trailing `bar_count` bars, or `None` when empty.
///
/// `start = max(0, end - bar_count + 1)` where `end` is the forming bar or the last
/// closed bar depending on `window_end`.
pub fn window(
    source: &(impl BarSource + ?Sized),
    bar_count: usize,
    window_end: WindowEnd,
) -> Option<(usize, usize)> {
    let end = match window_end {
        WindowEnd::IncludeForming => source.last_index(),
        WindowEnd::ClosedOnly => source.last_closed_index(),
    }?;
    if bar_count == 0 {
        return None;
    }
    Some((end.saturating_sub(bar_count - 1), end))
}

/// Writes the header plus the trailing window of `source` to `path`, replacing any
/// previous content in a single write.
///
/// The dedup ledger is not involved: re-running overwrites the prior output.
pub fn export_window(
    path: PathBuf,
    source: &(impl BarSource + ?Sized),
    bar_count: usize,
    window_end: WindowEnd,
    format: LineFormat,
) -> Result<BulkSummary, ExportError> {
    let mut buffer = header(format);
    buffer.push_str(LINE_ENDING);

    let mut rows = 0;
    let mut first = None;
    let mut last = None;

    if let Some((start, end)) = window(source, bar_count, window_end) {
        info!(start, end, path = %path.display(), "bulk export started");
        for bar in (start..=end).filter_map(|index| source.bar(index)) {
            buffer.push_str(&format_line(&bar, format));
            buffer.push_str(LINE_ENDING);
            first.get_or_insert(bar.open_time);
            last = Some(bar.open_time);
            rows += 1;
            if rows % PROGRESS_EVERY == 0 {
                info!(rows, total = end - start + 1, "bulk export progress");
            }
        }
    }

    fs::write(&path, buffer.as_bytes()).context(WriteSnafu { path: &path })?;

    let summary = BulkSummary {
        bytes: buffer.len() as u64,
        path,
        rows,
        first,
        last,
    };
    info!(
        rows = summary.rows,
        first = ?summary.first,
        last = ?summary.last,
        bytes = summary.bytes,
        path = %summary.path.display(),
        "bulk export completed"
    );
    Ok(summary)
}

/// Resolves the output path for `job` and runs [`export_window`].
///
/// A streaming job exported in bulk is unbounded: the whole history is written.
pub fn export_bulk(
    job: &ExportJob,
    source: &(impl BarSource + ?Sized),
) -> Result<BulkSummary, ExportError> {
    let (bar_count, window_end) = match job.mode {
        ExportMode::Bulk {
            bar_count,
            window_end,
        } => (bar_count, window_end),
        ExportMode::Streaming => (usize::MAX, WindowEnd::IncludeForming),
    };
    let path = resolve_output_path(&job.output_dir, &job.symbol, &job.timeframe, job.run_timestamp)?;
    export_window(path, source, bar_count, window_end, job.format)
}
