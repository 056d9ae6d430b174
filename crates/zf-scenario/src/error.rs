//! Error types for scenario loading and validation.

use thiserror::Error;

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors raised while loading or validating scenario data.
///
/// These are content-integrity errors: they are fatal to starting the
/// affected scenario and are reported at load time, never deferred into an
/// undefined in-game outcome.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The catalog JSON could not be parsed.
    #[error("malformed catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The catalog contains no scenarios at all.
    #[error("catalog is empty")]
    EmptyCatalog,

    /// Two scenarios share the same id.
    #[error("duplicate scenario id: {0}")]
    DuplicateScenario(u32),

    /// A scenario has no chapter steps.
    #[error("scenario {scenario} ({title:?}) has no chapter steps")]
    NoSteps {
        /// Scenario id.
        scenario: u32,
        /// Scenario title, for readable diagnostics.
        title: String,
    },

    /// A chapter step offers no options.
    #[error("scenario {scenario}, step {step}: no options defined")]
    NoOptions {
        /// Scenario id.
        scenario: u32,
        /// Chapter step id.
        step: u32,
    },

    /// An option carries an empty result list.
    #[error("scenario {scenario}, step {step}, option {option}: empty result list")]
    EmptyResults {
        /// Scenario id.
        scenario: u32,
        /// Chapter step id.
        step: u32,
        /// The offending option tag.
        option: crate::scenario::OptionTag,
    },

    /// No scenario with the requested id exists in the catalog.
    #[error("unknown scenario id: {0}")]
    UnknownScenario(u32),
}
