//! External agent integration.
//!
//! The agent that actually parses the email, labels it, and stores the
//! candidate row is opaque to the runner: the runner submits a natural-
//! language instruction naming the message id and gets free text back.
//! `ItemProcessor` is that seam; `RigProcessor` is the rig-core backed
//! implementation.

mod rig_processor;

pub use rig_processor::RigProcessor;

use std::sync::Arc;

use async_trait::async_trait;
use rig::agent::AgentBuilder;
use rig::client::CompletionClient;
use secrecy::ExposeSecret;

use crate::config::RunnerConfig;
use crate::error::AgentError;
use crate::prompts::render_system_prompt;
use crate::source::WorkItem;

/// Supported LLM backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAi,
    Anthropic,
}

/// External processor for one work item.
///
/// The call is the runner's sole suspension point; it eventually yields the
/// agent's full raw output for the completion classifier to scan.
#[async_trait]
pub trait ItemProcessor: Send + Sync {
    async fn process(&self, item: &WorkItem) -> Result<String, AgentError>;
}

/// Create an item processor from configuration.
pub fn create_processor(config: &RunnerConfig) -> Result<Arc<dyn ItemProcessor>, AgentError> {
    let system = render_system_prompt(&config.airtable_base_id, &config.airtable_table_id);
    match config.backend {
        LlmBackend::OpenAi => create_openai_processor(config, &system),
        LlmBackend::Anthropic => create_anthropic_processor(config, &system),
    }
}

fn create_openai_processor(
    config: &RunnerConfig,
    system: &str,
) -> Result<Arc<dyn ItemProcessor>, AgentError> {
    use rig::providers::openai;

    let client: rig::client::Client<openai::client::OpenAIResponsesExt> =
        openai::Client::new(config.llm_api_key.expose_secret()).map_err(|e| {
            AgentError::RequestFailed {
                provider: "openai".to_string(),
                reason: format!("Failed to create OpenAI client: {e}"),
            }
        })?;

    let model = client.completion_model(&config.model);
    let agent = AgentBuilder::new(model).preamble(system).build();
    tracing::info!("Using OpenAI (model: {})", config.model);
    Ok(Arc::new(RigProcessor::new(agent, "openai")))
}

fn create_anthropic_processor(
    config: &RunnerConfig,
    system: &str,
) -> Result<Arc<dyn ItemProcessor>, AgentError> {
    use rig::providers::anthropic;

    let client: rig::client::Client<anthropic::client::AnthropicExt> =
        anthropic::Client::new(config.llm_api_key.expose_secret()).map_err(|e| {
            AgentError::RequestFailed {
                provider: "anthropic".to_string(),
                reason: format!("Failed to create Anthropic client: {e}"),
            }
        })?;

    let model = client.completion_model(&config.model);
    let agent = AgentBuilder::new(model).preamble(system).build();
    tracing::info!("Using Anthropic (model: {})", config.model);
    Ok(Arc::new(RigProcessor::new(agent, "anthropic")))
}
