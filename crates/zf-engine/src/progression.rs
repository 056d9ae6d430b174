//! Bounded progression score with per-mode tier labels.
//!
//! The progression scale tracks the player's in-fiction "strength" as an
//! integer clamped to `[0, MAX_LEVEL]`. Cultivation mode names every level
//! individually; business and survival modes bucket levels into bands.

use serde::{Deserialize, Serialize};
use zf_scenario::{EffectKind, Mode, ResultEntry};

/// Top of the scale; the highest named cultivation tier.
pub const MAX_LEVEL: u32 = 13;

/// Win threshold for the business and survival modes.
pub const WIN_THRESHOLD: u32 = 11;

/// Cultivation tiers, one label per level 0..=13.
const CULTIVATION_TIERS: [&str; 14] = [
    "Mortal",
    "Innate",
    "Qi Refining",
    "Peak Qi Refining",
    "Foundation Establishment",
    "Peak Foundation",
    "Golden Core",
    "Peak Golden Core",
    "Nascent Soul",
    "Peak Nascent Soul",
    "Spirit Transformation",
    "Body Integration",
    "Tribulation Crossing",
    "Immortal",
];

/// Business bands: inclusive level ranges with a catch-all top label.
const BUSINESS_BANDS: [(u32, u32, &str); 5] = [
    (0, 0, "Jobless Youth"),
    (1, 3, "Startup Novice"),
    (4, 5, "Modest Success"),
    (6, 8, "Senior Executive"),
    (9, 10, "Listed-Company CEO"),
];
const BUSINESS_TOP: &str = "Business Magnate";

/// Survival bands, same shape as the business table.
const SURVIVAL_BANDS: [(u32, u32, &str); 5] = [
    (0, 0, "Castaway"),
    (1, 3, "Novice Survivor"),
    (4, 5, "Skilled Survivor"),
    (6, 8, "Wilderness Expert"),
    (9, 10, "Survival Master"),
];
const SURVIVAL_TOP: &str = "King of the Wild";

fn band_label(bands: &[(u32, u32, &'static str)], top: &'static str, level: u32) -> &'static str {
    for &(lo, hi, label) in bands {
        if (lo..=hi).contains(&level) {
            return label;
        }
    }
    top
}

/// The player's bounded progression score for one play-through.
///
/// Every mutation goes through [`ProgressionScale::apply`], which clamps the
/// level back into `[0, MAX_LEVEL]`; the level is never negative and never
/// above the top tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionScale {
    level: u32,
    mode: Mode,
}

impl ProgressionScale {
    /// Create a fresh scale at level 0 for the given mode.
    pub fn new(mode: Mode) -> Self {
        Self { level: 0, mode }
    }

    /// Current level, always within `[0, MAX_LEVEL]`.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// The mode this scale labels and wins under.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Apply a resolved result and return the adjusted scale.
    ///
    /// Never fails: out-of-range arithmetic is clamped, not rejected.
    /// `GameOver` and `NoOp` leave the level untouched; termination is the
    /// session's decision, not the scale's.
    #[must_use]
    pub fn apply(self, entry: &ResultEntry) -> Self {
        let level = match entry.effect {
            EffectKind::Add => self.level.saturating_add(entry.magnitude).min(MAX_LEVEL),
            EffectKind::Subtract => self.level.saturating_sub(entry.magnitude),
            EffectKind::ResetToZero => 0,
            EffectKind::GameOver | EffectKind::NoOp => self.level,
        };
        Self { level, ..self }
    }

    /// Human-readable label for the current level under this scale's mode.
    pub fn tier_label(&self) -> &'static str {
        match self.mode {
            Mode::Cultivation => CULTIVATION_TIERS[self.level.min(MAX_LEVEL) as usize],
            Mode::Business => band_label(&BUSINESS_BANDS, BUSINESS_TOP, self.level),
            Mode::Survival => band_label(&SURVIVAL_BANDS, SURVIVAL_TOP, self.level),
        }
    }

    /// Whether this level wins at the final step of its mode.
    ///
    /// Cultivation demands the very top tier; business and survival accept
    /// anything at or above [`WIN_THRESHOLD`].
    pub fn is_winning(&self) -> bool {
        match self.mode {
            Mode::Cultivation => self.level == MAX_LEVEL,
            Mode::Business | Mode::Survival => self.level >= WIN_THRESHOLD,
        }
    }
}
