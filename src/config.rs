//! Runner configuration, loaded from the environment.
//!
//! All required keys are checked up front so a misconfigured run fails
//! before any network call is made.

use secrecy::SecretString;

use crate::agent::LlmBackend;
use crate::error::ConfigError;
use crate::prompts::DEFAULT_QUERY;

/// Default Pica passthrough API base.
pub const DEFAULT_API_BASE: &str = "https://api.picaos.com";

/// What to do when an agent response is missing a confirmation marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Count the item as processed and move on (observed behavior).
    #[default]
    Advance,
    /// Stop the run at the first unconfirmed item.
    Halt,
}

impl FailurePolicy {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "advance" => Ok(Self::Advance),
            "halt" => Ok(Self::Halt),
            other => Err(ConfigError::InvalidValue {
                key: "CANDIDATE_RUNNER_FAILURE_POLICY".to_string(),
                message: format!("expected \"advance\" or \"halt\", got {other:?}"),
            }),
        }
    }
}

/// Full runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Pica API secret, sent as `x-pica-secret`.
    pub pica_secret: SecretString,
    /// Gmail connection key, sent as `x-pica-connection-key`.
    pub gmail_connection_key: SecretString,
    /// Airtable base holding the Candidates table.
    pub airtable_base_id: String,
    /// Airtable table the agent writes candidate rows to.
    pub airtable_table_id: String,
    /// Gmail search filter for candidate emails.
    pub query: String,
    /// Passthrough API base URL.
    pub api_base: String,
    /// LLM backend for the agent.
    pub backend: LlmBackend,
    /// API key for the LLM backend.
    pub llm_api_key: SecretString,
    /// Model name for the agent.
    pub model: String,
    /// Policy for unconfirmed items.
    pub failure_policy: FailurePolicy,
}

impl RunnerConfig {
    /// Load configuration from the environment.
    ///
    /// Fails with `ConfigError::MissingEnvVar` on the first absent required
    /// key: `PICA_SECRET_KEY`, `GMAIL_CONNECTION_KEY`, `AIRTABLE_BASE_ID`,
    /// `AIRTABLE_TABLE_ID`, and the backend's API key.
    pub fn from_env() -> Result<Self, ConfigError> {
        let pica_secret = required_env("PICA_SECRET_KEY")?;
        let gmail_connection_key = required_env("GMAIL_CONNECTION_KEY")?;
        let airtable_base_id = required_env("AIRTABLE_BASE_ID")?;
        let airtable_table_id = required_env("AIRTABLE_TABLE_ID")?;

        let backend = match std::env::var("CANDIDATE_RUNNER_BACKEND")
            .unwrap_or_else(|_| "openai".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "openai" => LlmBackend::OpenAi,
            "anthropic" => LlmBackend::Anthropic,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "CANDIDATE_RUNNER_BACKEND".to_string(),
                    message: format!("expected \"openai\" or \"anthropic\", got {other:?}"),
                });
            }
        };

        let llm_api_key = match backend {
            LlmBackend::OpenAi => required_env("OPENAI_API_KEY")?,
            LlmBackend::Anthropic => required_env("ANTHROPIC_API_KEY")?,
        };

        let model = std::env::var("CANDIDATE_RUNNER_MODEL").unwrap_or_else(|_| {
            match backend {
                LlmBackend::OpenAi => "gpt-4.1",
                LlmBackend::Anthropic => "claude-sonnet-4-20250514",
            }
            .to_string()
        });

        let failure_policy = match std::env::var("CANDIDATE_RUNNER_FAILURE_POLICY") {
            Ok(value) => FailurePolicy::parse(&value)?,
            Err(_) => FailurePolicy::default(),
        };

        Ok(Self {
            pica_secret: SecretString::from(pica_secret),
            gmail_connection_key: SecretString::from(gmail_connection_key),
            airtable_base_id,
            airtable_table_id,
            query: std::env::var("CANDIDATE_RUNNER_QUERY")
                .unwrap_or_else(|_| DEFAULT_QUERY.to_string()),
            api_base: std::env::var("PICA_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            backend,
            llm_api_key: SecretString::from(llm_api_key),
            model,
            failure_policy,
        })
    }
}

fn required_env(key: &str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(key.to_string())),
    }
}
