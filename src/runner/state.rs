//! Run state machine.
//!
//! `RunState` is the single owner of all mutable run state. It is only
//! mutated through the dispatch contract (`start`, `append_page`,
//! `begin_dispatch`, `begin_classify`, `advance`, `fail`) — never from
//! multiple call sites.

use serde::{Deserialize, Serialize};

use crate::source::{Page, WorkItem};

/// Phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// No page loaded yet.
    Idle,
    /// Fetching a page from the source.
    Loading,
    /// An item has been handed to the agent.
    Dispatching,
    /// Agent output received, completion check in progress.
    Classifying,
    /// All items on the final page processed.
    Done,
    /// A fetch or agent error stopped the run.
    Error,
}

impl RunPhase {
    /// Check if this is a terminal phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Dispatching => "dispatching",
            Self::Classifying => "classifying",
            Self::Done => "done",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// What the dispatcher should do after an item completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// More items remain on the loaded pages — dispatch the next one.
    NextItem,
    /// Current items exhausted but a continuation token remains.
    PageExhausted,
    /// No items and no token left. Terminal.
    Done,
}

/// Mutable state of one run.
///
/// Invariants: `current_index <= items.len()`; `processed_count` never
/// decreases; `is_processing` is true only between dispatch and the end of
/// classification; items are visited strictly in fetch order.
#[derive(Debug)]
pub struct RunState {
    items: Vec<WorkItem>,
    /// Index of the item currently in flight, or next to dispatch.
    current_index: usize,
    processed_count: usize,
    continuation_token: Option<String>,
    is_processing: bool,
    phase: RunPhase,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            current_index: 0,
            processed_count: 0,
            continuation_token: None,
            is_processing: false,
            phase: RunPhase::Idle,
        }
    }

    /// Load the first page, resetting position and counters.
    pub fn start(&mut self, page: Page) {
        self.items = page.items;
        self.continuation_token = page.continuation_token;
        self.current_index = 0;
        self.processed_count = 0;
        self.is_processing = false;
        self.phase = if self.items.is_empty() && self.continuation_token.is_none() {
            RunPhase::Done
        } else {
            RunPhase::Dispatching
        };
    }

    /// Append a continuation page. Counters persist; position moves into
    /// the appended region.
    pub fn append_page(&mut self, page: Page) {
        self.continuation_token = page.continuation_token;
        self.items.extend(page.items);
        if self.current_index < self.items.len() {
            self.phase = RunPhase::Dispatching;
        } else if self.continuation_token.is_none() {
            // Empty final page.
            self.phase = RunPhase::Done;
        }
    }

    /// Hand out the current item for processing.
    ///
    /// No-op (returns `None`) while an item is already in flight, and when
    /// no dispatchable item remains.
    pub fn begin_dispatch(&mut self) -> Option<WorkItem> {
        if self.is_processing || self.phase.is_terminal() {
            return None;
        }
        let item = self.items.get(self.current_index)?.clone();
        self.is_processing = true;
        self.phase = RunPhase::Dispatching;
        Some(item)
    }

    /// Mark that agent output has arrived and is being classified.
    pub fn begin_classify(&mut self) {
        debug_assert!(self.is_processing);
        self.phase = RunPhase::Classifying;
    }

    /// Complete the in-flight item and advance.
    ///
    /// Called exactly once per item after its completion result is known.
    /// The item counts as processed regardless of classification outcome.
    pub fn advance(&mut self) -> AdvanceOutcome {
        self.processed_count += 1;
        self.is_processing = false;
        self.current_index += 1;

        if self.current_index < self.items.len() {
            AdvanceOutcome::NextItem
        } else if self.continuation_token.is_some() {
            self.phase = RunPhase::Loading;
            AdvanceOutcome::PageExhausted
        } else {
            self.phase = RunPhase::Done;
            AdvanceOutcome::Done
        }
    }

    /// Mark the run as failed. Terminal unless restarted from scratch.
    pub fn fail(&mut self) {
        self.is_processing = false;
        self.phase = RunPhase::Error;
    }

    /// Take the continuation token for the next fetch.
    pub fn take_continuation_token(&mut self) -> Option<String> {
        self.continuation_token.take()
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn processed_count(&self) -> usize {
        self.processed_count
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
