//! Error types for the narrative engine.

use thiserror::Error;
use zf_scenario::{OptionTag, ScenarioError};

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while driving a narrative session.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The session already ended; the caller must start a fresh one.
    #[error("session already terminated")]
    SessionOver,

    /// The current step offers no option with the chosen tag.
    #[error("step {step} has no option {tag}")]
    MissingOption {
        /// Step id of the current chapter.
        step: u32,
        /// The tag the caller asked for.
        tag: OptionTag,
    },

    /// An option's result list was empty at resolution time. Catalog
    /// validation rejects this, so hitting it means the scenario bypassed
    /// validation.
    #[error("step {step}, option {tag}: empty result list")]
    EmptyResults {
        /// Step id of the current chapter.
        step: u32,
        /// The offending option tag.
        tag: OptionTag,
    },

    /// Scenario content failed integrity validation at session start.
    #[error("{0}")]
    Content(#[from] ScenarioError),
}
