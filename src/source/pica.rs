//! Pica passthrough message source.
//!
//! Lists Gmail messages matching the candidate query via
//! `GET /v1/passthrough/users/me/messages`, authenticated with the Pica
//! secret and the Gmail connection key headers.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::RunnerConfig;
use crate::error::FetchError;
use crate::source::{MessageSource, Page, WorkItem};

const MESSAGES_PATH: &str = "/v1/passthrough/users/me/messages";

/// Wire shape of the passthrough message list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageListResponse {
    #[serde(default)]
    messages: Vec<WorkItem>,
    next_page_token: Option<String>,
}

/// Message source backed by the Pica passthrough API.
pub struct PicaSource {
    client: reqwest::Client,
    api_base: String,
    query: String,
    pica_secret: SecretString,
    gmail_connection_key: SecretString,
}

impl PicaSource {
    pub fn new(config: &RunnerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            query: config.query.clone(),
            pica_secret: config.pica_secret.clone(),
            gmail_connection_key: config.gmail_connection_key.clone(),
        }
    }
}

#[async_trait]
impl MessageSource for PicaSource {
    async fn fetch_page(&self, continuation_token: Option<&str>) -> Result<Page, FetchError> {
        let url = format!("{}{MESSAGES_PATH}", self.api_base);

        let mut params: Vec<(&str, &str)> = vec![("q", self.query.as_str())];
        if let Some(token) = continuation_token {
            params.push(("pageToken", token));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header("x-pica-secret", self.pica_secret.expose_secret())
            .header(
                "x-pica-connection-key",
                self.gmail_connection_key.expose_secret(),
            )
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let list: MessageListResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        tracing::debug!(
            count = list.messages.len(),
            has_next = list.next_page_token.is_some(),
            "Fetched message page"
        );

        Ok(Page::new(list.messages, list.next_page_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_response_decodes_with_token() {
        let json = r#"{"messages":[{"id":"m1","threadId":"t1"}],"nextPageToken":"tok"}"#;
        let list: MessageListResponse = serde_json::from_str(json).expect("decode");
        assert_eq!(list.messages.len(), 1);
        assert_eq!(list.next_page_token.as_deref(), Some("tok"));
    }

    #[test]
    fn list_response_decodes_without_messages() {
        // Gmail omits `messages` entirely when the result set is empty.
        let list: MessageListResponse = serde_json::from_str("{}").expect("decode");
        assert!(list.messages.is_empty());
        assert!(list.next_page_token.is_none());
    }
}
