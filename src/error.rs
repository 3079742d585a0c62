//! Error types for Candidate Runner.

/// Top-level error type for the runner.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("Run halted: item {item_id} did not confirm completion")]
    Halted { item_id: String },
}

/// Configuration-related errors. Surfaced before any network call.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Page-fetch errors from the message source.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request to message source failed: {0}")]
    Request(String),

    #[error("Message source returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed page response: {0}")]
    Decode(String),
}

/// Errors from the external agent call.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

/// Result type alias for the runner.
pub type Result<T> = std::result::Result<T, Error>;
