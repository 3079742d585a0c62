//! Progress snapshots — pure reads of run state for display and logging.

use crate::runner::state::RunState;

/// Point-in-time progress of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    /// Items processed so far (success and failure both count).
    pub processed: usize,
    /// Items fetched so far across all pages.
    pub total: usize,
    /// Completion percentage, 0.0 when nothing has been fetched.
    pub percent: f64,
}

impl ProgressSnapshot {
    /// Snapshot the given run state. No side effects.
    pub fn of(state: &RunState) -> Self {
        let processed = state.processed_count();
        let total = state.items().len();
        let percent = if total == 0 {
            0.0
        } else {
            processed as f64 / total as f64 * 100.0
        };
        Self {
            processed,
            total,
            percent,
        }
    }
}

impl std::fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} ({:.0}%)",
            self.processed, self.total, self.percent
        )
    }
}
