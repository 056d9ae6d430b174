//! Chat-completion client for Zeitfaden's AI role-play conversations.
//!
//! Thin wrapper over an OpenAI-compatible `chat/completions` endpoint: a
//! system prompt establishes the character, the user message is forwarded,
//! and the first choice's content comes back as the reply. Failures are
//! surfaced, not retried — retry policy belongs to the caller.

pub mod client;
pub mod error;
pub mod prompt;

pub use client::{ChatClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{ChatError, ChatResult};
pub use prompt::role_prompt;
