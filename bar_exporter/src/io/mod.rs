//! Everything that touches the output file: line formatting, file naming and the dedup ledger.

pub mod format;
pub mod ledger;
pub mod path;
