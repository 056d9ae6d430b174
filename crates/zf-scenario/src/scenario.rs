//! Scenario data types.

use serde::{Deserialize, Serialize};

use crate::error::{ScenarioError, ScenarioResult};

/// Which game mode a scenario plays in.
///
/// The mode selects both the tier-label table for the progression score and
/// the win condition evaluated at the final step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Immortal-cultivation mode: win only at the very top tier.
    Cultivation,
    /// Startup/business mode: win at band 11 or above.
    Business,
    /// Desert-island survival mode: win at band 11 or above.
    Survival,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cultivation => write!(f, "cultivation"),
            Self::Business => write!(f, "business"),
            Self::Survival => write!(f, "survival"),
        }
    }
}

/// What a resolved result does to the progression score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Add the magnitude to the level.
    Add,
    /// Subtract the magnitude from the level.
    Subtract,
    /// Force the level back to zero.
    ResetToZero,
    /// End the run outright (level untouched).
    GameOver,
    /// Leave the level untouched.
    NoOp,
}

/// One weighted consequence of picking an option.
///
/// An option holds one or more entries; resolution picks uniformly among
/// them. The narration may be empty, in which case the caller skips display
/// but still advances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEntry {
    /// How the progression score changes.
    pub effect: EffectKind,
    /// Magnitude for `Add`/`Subtract`; ignored by the other effects.
    #[serde(default)]
    pub magnitude: u32,
    /// Narration text shown to the player (may be empty).
    #[serde(default)]
    pub narration: String,
}

/// One selectable option within a chapter step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Text describing the option.
    pub description: String,
    /// Equally weighted outcomes; must be non-empty (validated at load).
    pub results: Vec<ResultEntry>,
}

/// Which of the up-to-three options the player picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionTag {
    /// First option.
    A,
    /// Second option.
    B,
    /// Third option.
    C,
}

impl OptionTag {
    /// All tags in display order.
    pub fn all() -> [Self; 3] {
        [Self::A, Self::B, Self::C]
    }

    /// Parse a tag from user input (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "a" => Some(Self::A),
            "b" => Some(Self::B),
            "c" => Some(Self::C),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
        }
    }
}

/// One decision point in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterStep {
    /// Step id, unique within its scenario.
    pub id: u32,
    /// Chapter heading shown before the options.
    pub title: String,
    /// Legacy flag from the source data: advance to the next step no matter
    /// which effect resolved. The engine always advances after any
    /// non-fatal effect, so this carries no extra behavior; it is kept so
    /// existing catalog data round-trips.
    #[serde(default)]
    pub advance_unconditionally: bool,
    /// First option, if offered.
    #[serde(default)]
    pub option_a: Option<ChoiceOption>,
    /// Second option, if offered.
    #[serde(default)]
    pub option_b: Option<ChoiceOption>,
    /// Third option, if offered.
    #[serde(default)]
    pub option_c: Option<ChoiceOption>,
}

impl ChapterStep {
    /// Look up an option by tag.
    pub fn option(&self, tag: OptionTag) -> Option<&ChoiceOption> {
        match tag {
            OptionTag::A => self.option_a.as_ref(),
            OptionTag::B => self.option_b.as_ref(),
            OptionTag::C => self.option_c.as_ref(),
        }
    }

    /// Iterate the offered options with their tags, in display order.
    pub fn options(&self) -> impl Iterator<Item = (OptionTag, &ChoiceOption)> {
        OptionTag::all()
            .into_iter()
            .filter_map(|tag| self.option(tag).map(|opt| (tag, opt)))
    }
}

/// One complete branching mini-story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Catalog-unique scenario id.
    pub id: u32,
    /// Game mode, selecting labels and win condition.
    pub mode: Mode,
    /// Display title.
    pub title: String,
    /// Cover image asset reference.
    #[serde(default)]
    pub cover_image: String,
    /// Background music asset reference.
    #[serde(default)]
    pub background_music: String,
    /// Introductory text shown before the first step.
    #[serde(default)]
    pub intro: String,
    /// Ordered chapter steps.
    pub steps: Vec<ChapterStep>,
}

impl Scenario {
    /// Check content integrity: at least one step, every step offers at
    /// least one option, every option has a non-empty result list.
    pub fn validate(&self) -> ScenarioResult<()> {
        if self.steps.is_empty() {
            return Err(ScenarioError::NoSteps {
                scenario: self.id,
                title: self.title.clone(),
            });
        }

        for step in &self.steps {
            if step.options().next().is_none() {
                return Err(ScenarioError::NoOptions {
                    scenario: self.id,
                    step: step.id,
                });
            }
            for (tag, option) in step.options() {
                if option.results.is_empty() {
                    return Err(ScenarioError::EmptyResults {
                        scenario: self.id,
                        step: step.id,
                        option: tag,
                    });
                }
            }
        }

        Ok(())
    }
}
