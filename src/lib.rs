//! Candidate Runner — paginated candidate-tracking run driver.
//!
//! Fetches pages of Gmail message ids through the Pica passthrough API,
//! submits each message to an LLM agent that extracts, labels, and stores
//! candidate details, and scans the agent's output for confirmation
//! markers before advancing to the next message.

pub mod agent;
pub mod classify;
pub mod config;
pub mod error;
pub mod prompts;
pub mod runner;
pub mod source;
