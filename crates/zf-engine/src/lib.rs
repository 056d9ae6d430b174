//! Branching narrative engine for the Zeitfaden time-travel mini-game.
//!
//! A [`NarrativeSession`] drives one play-through of a scenario: the player
//! picks one of up to three options per chapter step, the engine resolves a
//! weighted random result, applies it to a bounded progression score, and
//! either advances, or terminates the run with a win or a loss. All
//! randomness comes from a session-owned seeded RNG, so play-throughs are
//! reproducible.

pub mod config;
pub mod error;
pub mod progression;
pub mod resolver;
pub mod session;

pub use config::SessionConfig;
pub use error::{EngineError, EngineResult};
pub use progression::{MAX_LEVEL, ProgressionScale, WIN_THRESHOLD};
pub use session::{ChoiceOutcome, Ending, NarrativeSession, SessionState, Transition};
