//! The two export strategies: one-shot [`bulk`] export of a trailing window and
//! resumable [`stream`]ing append during a replay.

pub mod bulk;
pub mod stream;

pub use bulk::{BulkSummary, export_bulk};
pub use stream::{AppendOutcome, SessionState, StreamingSession};
