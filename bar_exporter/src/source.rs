//! Host-side bar history abstraction.
//!
//! This module defines the [`BarSource`] trait, the only view the export engine
//! has of the host's bar history: an append-only, index-addressable sequence
//! whose last index is the bar that is still forming.
//!
//! Slices and vectors of [`BarRecord`] implement it directly, which is what the
//! replay driver and the tests use.
//!
//! # Example
//!
//! ```rust
//! use bar_exporter::models::bar::BarRecord;
//! use bar_exporter::source::BarSource;
//!
//! struct Empty;
//!
//! impl BarSource for Empty {
//!     fn count(&self) -> usize {
//!         0
//!     }
//!
//!     fn bar(&self, _index: usize) -> Option<BarRecord> {
//!         None
//!     }
//! }
//!
//! assert_eq!(Empty.last_closed_index(), None);
//! ```

use std::{fs, path::Path};

use snafu::ResultExt;

use crate::{
    errors::{ExportError, ParseBarsSnafu, ReadBarsSnafu},
    models::bar::BarRecord,
};

/// Index-addressable bar history supplied by the host.
pub trait BarSource {
    /// Number of bars the host currently exposes, forming bar included.
    fn count(&self) -> usize;

    /// The bar at `index`, or `None` past the end.
    fn bar(&self, index: usize) -> Option<BarRecord>;

    /// Index of the forming bar, `None` when the history is empty.
    fn last_index(&self) -> Option<usize> {
        self.count().checked_sub(1)
    }

    /// Index of the most recently closed bar (`count - 2`).
    fn last_closed_index(&self) -> Option<usize> {
        self.count().checked_sub(2)
    }
}

impl BarSource for [BarRecord] {
    fn count(&self) -> usize {
        self.len()
    }

    fn bar(&self, index: usize) -> Option<BarRecord> {
        self.get(index).cloned()
    }
}

impl BarSource for Vec<BarRecord> {
    fn count(&self) -> usize {
        self.len()
    }

    fn bar(&self, index: usize) -> Option<BarRecord> {
        self.get(index).cloned()
    }
}

/// Reads a JSON array of bars, e.g. `[{"open_time": "2024-01-02T09:30:00Z", "open": 1.1, ...}]`.
pub fn load_bars_json(path: &Path) -> Result<Vec<BarRecord>, ExportError> {
    let content = fs::read_to_string(path).context(ReadBarsSnafu { path })?;
    serde_json::from_str(&content).context(ParseBarsSnafu { path })
}
