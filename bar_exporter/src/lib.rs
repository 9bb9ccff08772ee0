//! Incremental OHLCV bar export to delimited text files.
//!
//! Two strategies share one line format and file naming scheme:
//! - [`export::bulk`]: write the trailing N bars of a history in one pass.
//! - [`export::stream`]: append each newly closed bar exactly once, resuming
//!   from whatever an earlier run already wrote to the same file.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod export;
pub mod io;
pub mod models;
pub mod replay;
pub mod source;
