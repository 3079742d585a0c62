//! End-to-end run loop tests against in-memory fakes.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use candidate_runner::agent::ItemProcessor;
use candidate_runner::classify::{
    CompletionClassifier, LABEL_CONFIRMED_MARKER, STORAGE_CONFIRMED_MARKER,
};
use candidate_runner::config::FailurePolicy;
use candidate_runner::error::{AgentError, FetchError};
use candidate_runner::runner::{RunLoop, RunPhase};
use candidate_runner::source::{MessageSource, Page, WorkItem};

/// Serves a queued sequence of pages, one per fetch.
struct ScriptedSource {
    pages: Mutex<Vec<Page>>,
}

impl ScriptedSource {
    fn new(pages: Vec<Page>) -> Self {
        Self {
            pages: Mutex::new(pages),
        }
    }
}

#[async_trait]
impl MessageSource for ScriptedSource {
    async fn fetch_page(&self, _token: Option<&str>) -> Result<Page, FetchError> {
        let mut pages = self.pages.lock().unwrap();
        if pages.is_empty() {
            return Err(FetchError::Request("script exhausted".into()));
        }
        Ok(pages.remove(0))
    }
}

/// Returns a scripted output per call, in order.
struct ScriptedProcessor {
    outputs: Mutex<Vec<String>>,
}

impl ScriptedProcessor {
    fn new(outputs: Vec<String>) -> Self {
        Self {
            outputs: Mutex::new(outputs),
        }
    }
}

#[async_trait]
impl ItemProcessor for ScriptedProcessor {
    async fn process(&self, _item: &WorkItem) -> Result<String, AgentError> {
        let mut outputs = self.outputs.lock().unwrap();
        if outputs.is_empty() {
            return Err(AgentError::InvalidResponse {
                provider: "scripted".into(),
                reason: "script exhausted".into(),
            });
        }
        Ok(outputs.remove(0))
    }
}

fn confirmed_output() -> String {
    format!(
        "Extracted details.\n{LABEL_CONFIRMED_MARKER}\nScored 70/100.\n{STORAGE_CONFIRMED_MARKER}"
    )
}

/// Two items: the first response misses both markers, the second confirms.
/// Both count as processed under the advance policy and the run ends Done.
#[tokio::test]
async fn mixed_outcomes_process_both_items_to_done() {
    let source = Arc::new(ScriptedSource::new(vec![Page::new(
        vec![WorkItem::new("a", "t-a"), WorkItem::new("b", "t-b")],
        None,
    )]));
    let processor = Arc::new(ScriptedProcessor::new(vec![
        "I was unable to find the email.".to_string(),
        confirmed_output(),
    ]));

    let mut run = RunLoop::new(source, processor, FailurePolicy::Advance);
    let report = run.run().await.expect("run");

    assert_eq!(report.processed, 2);
    assert_eq!(report.total, 2);
    assert_eq!(report.failed_items, vec!["a"]);
    assert_eq!(run.state().phase(), RunPhase::Done);

    let progress = run.progress();
    assert_eq!(progress.processed, 2);
    assert_eq!(progress.percent, 100.0);
}

/// A continuation token on page one leads to exactly two fetches and Done.
#[tokio::test]
async fn paginated_run_reaches_done_after_two_pages() {
    let source = Arc::new(ScriptedSource::new(vec![
        Page::new(vec![WorkItem::new("a", "t-a")], Some("tok1".to_string())),
        Page::new(vec![WorkItem::new("b", "t-b")], None),
    ]));
    let processor = Arc::new(ScriptedProcessor::new(vec![
        confirmed_output(),
        confirmed_output(),
    ]));

    let mut run = RunLoop::new(source, processor, FailurePolicy::Advance);
    let report = run.run().await.expect("run");

    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.processed, 2);
    assert_eq!(run.state().phase(), RunPhase::Done);
}

/// Partial output that confirms only the label is still a failure — both
/// markers are required.
#[tokio::test]
async fn label_only_output_is_not_confirmed() {
    let source = Arc::new(ScriptedSource::new(vec![Page::new(
        vec![WorkItem::new("a", "t-a")],
        None,
    )]));
    let processor = Arc::new(ScriptedProcessor::new(vec![format!(
        "Details extracted.\n{LABEL_CONFIRMED_MARKER}\nAirtable write pending."
    )]));

    let mut run = RunLoop::new(source, processor, FailurePolicy::Advance);
    let report = run.run().await.expect("run");

    assert_eq!(report.failed_items, vec!["a"]);
    assert_eq!(report.processed, 1);
}

/// The classifier and the agent fakes agree on marker text by construction.
#[test]
fn scripted_output_passes_classifier() {
    let classifier = CompletionClassifier::new();
    assert!(classifier.classify(&confirmed_output()).succeeded);
    assert!(!classifier.classify("no markers here").succeeded);
}
