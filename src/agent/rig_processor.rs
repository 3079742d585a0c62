//! Bridges rig's `Agent` to the runner's `ItemProcessor` trait.

use async_trait::async_trait;

use rig::agent::Agent;
use rig::completion::{CompletionModel, Prompt};

use crate::agent::ItemProcessor;
use crate::error::AgentError;
use crate::prompts::tracking_instruction;
use crate::source::WorkItem;

/// Item processor backed by a rig agent.
///
/// The candidate-tracking system prompt is baked in as the agent preamble;
/// each item is submitted as a single tracking instruction.
pub struct RigProcessor<M: CompletionModel> {
    agent: Agent<M>,
    provider: &'static str,
}

impl<M: CompletionModel> RigProcessor<M> {
    pub fn new(agent: Agent<M>, provider: &'static str) -> Self {
        Self { agent, provider }
    }
}

#[async_trait]
impl<M: CompletionModel> ItemProcessor for RigProcessor<M> {
    async fn process(&self, item: &WorkItem) -> Result<String, AgentError> {
        let instruction = tracking_instruction(&item.id);
        tracing::debug!(item = %item.id, "Submitting tracking instruction");

        self.agent
            .prompt(instruction)
            .await
            .map_err(|e| AgentError::RequestFailed {
                provider: self.provider.to_string(),
                reason: e.to_string(),
            })
    }
}
