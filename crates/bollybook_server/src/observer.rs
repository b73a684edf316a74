//! Job progress reporting.

use async_trait::async_trait;
use bollybook_interface::{AssemblyObserver, AssemblyStep, JobStore};
use std::sync::Arc;
use uuid::Uuid;

/// Writes assembly progress to a job record as a percentage.
///
/// Store failures are logged and otherwise ignored; progress is advisory
/// and must not abort the assembly.
pub struct JobProgressObserver {
    store: Arc<dyn JobStore>,
    book_id: Uuid,
}

impl JobProgressObserver {
    /// Report progress for `book_id` into `store`.
    pub fn new(store: Arc<dyn JobStore>, book_id: Uuid) -> Self {
        Self { store, book_id }
    }
}

/// `completed` out of `total`, as a whole percentage capped at 100.
pub fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = completed.min(total) * 100 / total;
    u8::try_from(pct).unwrap_or(100)
}

#[async_trait]
impl AssemblyObserver for JobProgressObserver {
    async fn on_step(&self, step: AssemblyStep, completed: usize, total: usize) {
        let progress = percent(completed, total);
        tracing::debug!(book_id = %self.book_id, %step, progress, "Assembly progress");
        if let Err(e) = self.store.update_job_progress(self.book_id, progress).await {
            tracing::warn!(book_id = %self.book_id, error = %e, "Failed to record progress");
        }
    }
}
