//! Work source — fetches pages of message ids to process.
//!
//! Sources are pure I/O, no business logic: given an optional continuation
//! token they return one page of opaque work items plus the token for the
//! next page, if any. Processing order is the order items appear in a page.

mod pica;

pub use pica::PicaSource;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// One unit of work — an opaque handle to an email message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    /// Message id, submitted to the agent.
    pub id: String,
    /// Thread the message belongs to.
    pub thread_id: String,
}

impl WorkItem {
    pub fn new(id: impl Into<String>, thread_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            thread_id: thread_id.into(),
        }
    }
}

/// One fetched batch of work items.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Items in processing order.
    pub items: Vec<WorkItem>,
    /// Cursor for the next page, absent on the final page.
    pub continuation_token: Option<String>,
}

impl Page {
    pub fn new(items: Vec<WorkItem>, continuation_token: Option<String>) -> Self {
        Self {
            items,
            continuation_token,
        }
    }
}

/// Read-only source of work-item pages.
///
/// Fetching per token is idempotent as far as the upstream allows: the same
/// token yields the same or a superset page, since upstream content may
/// change between calls. No stronger guarantee is available.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Fetch one page. `None` fetches the first page.
    async fn fetch_page(&self, continuation_token: Option<&str>) -> Result<Page, FetchError>;
}
