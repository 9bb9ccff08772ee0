//! Host simulation for streaming export.
//!
//! During a backtest the host reveals history one bar at a time and notifies the
//! exporter after every reveal; the bar revealed last is the one still forming.
//! [`replay`] does the same over an in-memory history and stops the session at
//! the end, so the final (forming) bar is never written.

use tracing::{error, info};

use crate::{
    export::{AppendOutcome, StreamingSession},
    models::bar::BarRecord,
};

/// Notification counts for one replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    pub notifications: usize,
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ReplayStats {
    fn tally(&mut self, outcome: AppendOutcome) {
        self.notifications += 1;
        match outcome {
            AppendOutcome::Written => self.written += 1,
            AppendOutcome::Failed => self.failed += 1,
            AppendOutcome::Duplicate | AppendOutcome::NoClosedBar | AppendOutcome::Closed => {
                self.skipped += 1
            }
        }
    }
}

/// Drives `session` through `history`, then stops it.
pub fn replay(history: &[BarRecord], session: &mut StreamingSession) -> ReplayStats {
    let mut stats = ReplayStats::default();
    for visible in 1..=history.len() {
        stats.tally(session.on_bar(&history[..visible]));
    }
    if let Err(e) = session.stop() {
        error!(error = %e, "failed to close output");
    }
    info!(
        notifications = stats.notifications,
        written = stats.written,
        skipped = stats.skipped,
        failed = stats.failed,
        "replay finished"
    );
    stats
}
