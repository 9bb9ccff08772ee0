//! Set of bar keys already present in an output file.
//!
//! The ledger is rebuilt from the file at the start of every streaming run and
//! never persisted on its own. Losing it is recoverable (at worst a few
//! duplicate rows), so seeding never fails: unreadable files and malformed
//! lines are logged and skipped.
//!
//! Only complete rows count. A last line with no newline, or a row with fewer
//! fields than the header, was cut off by a failed write and is left out so its
//! bar can be written again.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::models::job::Delimiter;

#[derive(Debug, Default, Clone)]
pub struct DedupLedger {
    keys: IndexSet<String>,
}

impl DedupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from the first field of every non-header line of `path`.
    ///
    /// A missing file yields an empty ledger. Any I/O error also yields an empty
    /// ledger, even if some lines had already been read.
    pub fn seed(path: &Path, delimiter: Delimiter) -> Self {
        if !path.exists() {
            return Self::new();
        }
        match Self::read_keys(path, delimiter) {
            Ok(ledger) => {
                debug!(path = %path.display(), keys = ledger.len(), "seeded dedup ledger");
                ledger
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read existing output, starting with an empty ledger");
                Self::new()
            }
        }
    }

    fn read_keys(path: &Path, delimiter: Delimiter) -> io::Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        let delimiter = delimiter.as_char();
        let mut ledger = Self::new();
        let mut columns = 0;
        let mut line = String::new();

        for number in 1.. {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            let Some(row) = line.strip_suffix('\n') else {
                warn!(path = %path.display(), line = number, "ignoring unterminated last line");
                break;
            };
            let row = row.strip_suffix('\r').unwrap_or(row);

            if number == 1 {
                columns = row.split(delimiter).count();
                continue;
            }
            match row.split_once(delimiter) {
                Some((key, _)) if !key.is_empty() && row.split(delimiter).count() == columns => {
                    ledger.record(key)
                }
                _ => warn!(path = %path.display(), line = number, "skipping malformed line"),
            }
        }
        Ok(ledger)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Inserts `key`; recording a key twice is a no-op.
    pub fn record(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Most recently recorded key, in file order for a freshly seeded ledger.
    pub fn last(&self) -> Option<&str> {
        self.keys.last().map(String::as_str)
    }
}
