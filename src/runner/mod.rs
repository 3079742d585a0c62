//! Sequential run loop.
//!
//! Drives the whole run: fetch a page, hand items to the agent one at a
//! time, classify each response, advance, and fetch the next page when the
//! current one is exhausted. One item is ever in flight; items are
//! processed strictly in fetch order and pages strictly in continuation
//! order.

pub mod progress;
pub mod state;

pub use progress::ProgressSnapshot;
pub use state::{AdvanceOutcome, RunPhase, RunState};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::agent::ItemProcessor;
use crate::classify::CompletionClassifier;
use crate::config::FailurePolicy;
use crate::error::{Error, Result};
use crate::source::MessageSource;

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Run identifier (also tags all log lines for the run).
    pub run_id: Uuid,
    /// Items processed (classification failures included).
    pub processed: usize,
    /// Items fetched across all pages.
    pub total: usize,
    /// Pages fetched.
    pub pages_fetched: usize,
    /// Ids of items whose output was missing a confirmation marker.
    pub failed_items: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// The sequential dispatcher: owns the run state and drives it to
/// completion against a message source and an item processor.
pub struct RunLoop {
    source: Arc<dyn MessageSource>,
    processor: Arc<dyn ItemProcessor>,
    classifier: CompletionClassifier,
    failure_policy: FailurePolicy,
    state: RunState,
    run_id: Uuid,
}

impl RunLoop {
    pub fn new(
        source: Arc<dyn MessageSource>,
        processor: Arc<dyn ItemProcessor>,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            source,
            processor,
            classifier: CompletionClassifier::new(),
            failure_policy,
            state: RunState::new(),
            run_id: Uuid::new_v4(),
        }
    }

    /// Current progress. Pure read.
    pub fn progress(&self) -> ProgressSnapshot {
        ProgressSnapshot::of(&self.state)
    }

    /// Current run state (read-only).
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Run until every page is exhausted.
    ///
    /// Fetch and agent errors stop the run and leave the state in `Error`.
    /// Classification failures are recorded and, under the default advance
    /// policy, do not stop the run.
    pub async fn run(&mut self) -> Result<RunReport> {
        let started_at = Utc::now();
        let mut pages_fetched = 0usize;
        let mut failed_items = Vec::new();

        tracing::info!(run_id = %self.run_id, "Starting candidate run");

        let first = match self.source.fetch_page(None).await {
            Ok(page) => page,
            Err(e) => {
                self.state.fail();
                return Err(e.into());
            }
        };
        pages_fetched += 1;
        self.state.start(first);

        tracing::info!(
            run_id = %self.run_id,
            items = self.state.items().len(),
            "Loaded first page"
        );

        loop {
            while let Some(item) = self.state.begin_dispatch() {
                let raw = match self.processor.process(&item).await {
                    Ok(raw) => raw,
                    Err(e) => {
                        tracing::error!(run_id = %self.run_id, item = %item.id, error = %e, "Agent call failed");
                        self.state.fail();
                        return Err(e.into());
                    }
                };

                self.state.begin_classify();
                let result = self.classifier.classify(&raw);

                if result.succeeded {
                    tracing::debug!(run_id = %self.run_id, item = %item.id, "Item confirmed");
                } else {
                    tracing::warn!(
                        run_id = %self.run_id,
                        item = %item.id,
                        missing = ?result.missing,
                        "Item output missing confirmation markers"
                    );
                    failed_items.push(item.id.clone());
                    if self.failure_policy == FailurePolicy::Halt {
                        self.state.fail();
                        return Err(Error::Halted { item_id: item.id });
                    }
                }

                self.state.advance();
                tracing::info!(run_id = %self.run_id, progress = %self.progress(), "Progress");
            }

            let Some(token) = self.state.take_continuation_token() else {
                break;
            };

            let page = match self.source.fetch_page(Some(&token)).await {
                Ok(page) => page,
                Err(e) => {
                    self.state.fail();
                    return Err(e.into());
                }
            };
            pages_fetched += 1;
            tracing::info!(
                run_id = %self.run_id,
                items = page.items.len(),
                "Loaded continuation page"
            );
            self.state.append_page(page);
        }

        let snapshot = self.progress();
        tracing::info!(
            run_id = %self.run_id,
            processed = snapshot.processed,
            total = snapshot.total,
            failed = failed_items.len(),
            "Run complete"
        );

        Ok(RunReport {
            run_id: self.run_id,
            processed: snapshot.processed,
            total: snapshot.total,
            pages_fetched,
            failed_items,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
