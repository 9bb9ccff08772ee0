//! Append-only export driven by bar-close notifications.
//!
//! A [`StreamingSession`] is the whole state of one run: the resolved path, the
//! open file handle and the dedup ledger. It moves through
//! `start` → `Ready` → (`on_bar` / `on_closed_bar`)* → `stop` → `Closed`.
//! Dropping a ready session flushes and closes it as well, so the handle is
//! released on every exit path.

use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use snafu::{ResultExt, ensure};
use tracing::{debug, error, info};

use crate::{
    errors::{ExportError, NotBacktestingSnafu, WriteSnafu},
    io::{
        format::{LINE_ENDING, format_line, header},
        ledger::DedupLedger,
        path::resolve_output_path,
    },
    models::{
        bar::BarRecord,
        job::{ExportJob, LineFormat, RunMode},
    },
    source::BarSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Ready,
    Closed,
}

/// What a single notification did to the output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// A new row was appended and flushed.
    Written,
    /// The bar's key is already in the file.
    Duplicate,
    /// The host has no closed bar yet.
    NoClosedBar,
    /// The session was already stopped.
    Closed,
    /// The write failed and was logged. The bar is not recorded, so delivering it
    /// again writes it.
    Failed,
}

/// Rows go straight to `W` with no buffering in between, so a failed append
/// never leaves bytes behind to be written later.
#[derive(Debug)]
pub struct StreamingSession<W: Write = File> {
    path: PathBuf,
    format: LineFormat,
    ledger: DedupLedger,
    writer: Option<W>,
    /// A failed append left part of a row in the file.
    torn: bool,
    rows_written: usize,
}

impl StreamingSession {
    /// Starts a run: checks the host mode, resolves the path, seeds the ledger from any
    /// existing file, writes the header if the file is new and opens it for append.
    ///
    /// Outside backtesting nothing is created on disk.
    pub fn start(job: &ExportJob, mode: RunMode) -> Result<Self, ExportError> {
        ensure!(mode == RunMode::Backtesting, NotBacktestingSnafu { mode });

        let path =
            resolve_output_path(&job.output_dir, &job.symbol, &job.timeframe, job.run_timestamp)?;
        let ledger = DedupLedger::seed(&path, job.format.delimiter);
        let file = open_for_append(&path, job.format).context(WriteSnafu { path: &path })?;

        info!(
            path = %path.display(),
            resumed_keys = ledger.len(),
            last_key = ledger.last().unwrap_or("-"),
            "streaming export ready"
        );

        Ok(Self {
            path,
            format: job.format,
            ledger,
            writer: Some(file),
            torn: false,
            rows_written: 0,
        })
    }
}

impl<W: Write> StreamingSession<W> {
    /// Host notification that a new bar is available: appends the most recently
    /// closed bar of `source` unless it is already in the file.
    pub fn on_bar(&mut self, source: &(impl BarSource + ?Sized)) -> AppendOutcome {
        if self.writer.is_none() {
            return AppendOutcome::Closed;
        }
        match source.last_closed_index().and_then(|index| source.bar(index)) {
            Some(bar) => self.on_closed_bar(&bar),
            None => AppendOutcome::NoClosedBar,
        }
    }

    /// Appends `bar` unless its key is already recorded. Write errors are logged, not returned.
    pub fn on_closed_bar(&mut self, bar: &BarRecord) -> AppendOutcome {
        match self.try_append(bar) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(key = %bar.key(), error = %e, "failed to append bar");
                AppendOutcome::Failed
            }
        }
    }

    /// Like [`on_closed_bar`](Self::on_closed_bar) but hands the write error back.
    pub fn try_append(&mut self, bar: &BarRecord) -> Result<AppendOutcome, ExportError> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(AppendOutcome::Closed);
        };

        let key = bar.key();
        if self.ledger.contains(&key) {
            debug!(%key, "bar already exported");
            return Ok(AppendOutcome::Duplicate);
        }

        if self.torn {
            writer
                .write_all(LINE_ENDING.as_bytes())
                .context(WriteSnafu { path: &self.path })?;
            self.torn = false;
        }

        let mut line = format_line(bar, self.format);
        line.push_str(LINE_ENDING);
        if let Err((written, source)) = write_row(writer, line.as_bytes()) {
            if written == line.len() {
                // Only the flush failed; the whole row is already in the file.
                self.ledger.record(key);
                self.rows_written += 1;
            } else if written > 0 {
                self.torn = true;
            }
            return Err(source).context(WriteSnafu { path: &self.path });
        }

        self.ledger.record(key);
        self.rows_written += 1;
        Ok(AppendOutcome::Written)
    }

    /// Flushes and closes the file. Later notifications become no-ops; stopping twice is fine.
    pub fn stop(&mut self) -> Result<(), ExportError> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        writer.flush().context(WriteSnafu { path: &self.path })?;
        info!(
            path = %self.path.display(),
            rows_written = self.rows_written,
            total_rows = self.ledger.len(),
            "streaming export saved"
        );
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        if self.writer.is_some() {
            SessionState::Ready
        } else {
            SessionState::Closed
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows appended by this session, not counting rows resumed from an earlier run.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn ledger(&self) -> &DedupLedger {
        &self.ledger
    }
}

impl<W: Write> Drop for StreamingSession<W> {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            error!(error = %e, "failed to flush output on drop");
        }
    }
}

/// Writes `row` and flushes. On error, also reports how many bytes of `row`
/// the writer had already taken.
fn write_row(writer: &mut impl Write, row: &[u8]) -> Result<(), (usize, io::Error)> {
    let mut written = 0;
    while written < row.len() {
        match writer.write(&row[written..]) {
            Ok(0) => return Err((written, io::ErrorKind::WriteZero.into())),
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err((written, e)),
        }
    }
    writer.flush().map_err(|e| (written, e))
}

/// Opens `path` for append, writing the header when the file is new or empty.
///
/// An existing file is never truncated. If its last line was cut short (no
/// trailing newline), a line ending is appended first so the next row starts
/// on a line of its own.
fn open_for_append(path: &Path, format: LineFormat) -> io::Result<File> {
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)?;

    let len = file.metadata()?.len();
    if len == 0 {
        let mut head = header(format);
        head.push_str(LINE_ENDING);
        file.write_all(head.as_bytes())?;
    } else {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::Start(len - 1))?;
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            file.write_all(LINE_ENDING.as_bytes())?;
        }
    }
    file.flush()?;
    Ok(file)
}
