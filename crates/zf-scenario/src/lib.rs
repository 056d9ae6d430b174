//! Scenario catalog for the Zeitfaden branching narrative engine.
//!
//! A [`Scenario`] is one complete branching mini-story: a game mode, some
//! presentation metadata, and an ordered list of chapter steps. Each step
//! offers up to three lettered options, and each option carries a list of
//! equally weighted result entries. Scenarios are loaded from a static JSON
//! catalog and are immutable afterwards.

pub mod catalog;
pub mod error;
pub mod scenario;

pub use catalog::Catalog;
pub use error::{ScenarioError, ScenarioResult};
pub use scenario::{ChapterStep, ChoiceOption, EffectKind, Mode, OptionTag, ResultEntry, Scenario};
