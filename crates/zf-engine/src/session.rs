//! The scenario driver: one play-through from first step to win or loss.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use zf_scenario::{ChapterStep, EffectKind, OptionTag, Scenario};

use crate::config::SessionConfig;
use crate::error::{EngineError, EngineResult};
use crate::progression::ProgressionScale;
use crate::resolver;

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    /// The final win condition for the scenario's mode was met.
    Won,
    /// A fatal effect struck, or the final win condition was missed.
    Lost,
}

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The session is live and waiting for the player to pick an option.
    AwaitingChoice {
        /// Index of the current chapter step.
        step: usize,
    },
    /// The session ended; no further choices are accepted.
    Terminated(Ending),
}

/// What happened as a consequence of one choice.
///
/// The UI layer reacts to these transitions (music, effects, navigation);
/// the engine only reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The story moved on to the given step index.
    Advanced {
        /// Index of the step now awaiting a choice.
        step: usize,
    },
    /// The play-through ended in victory.
    Won,
    /// The play-through ended in defeat.
    Lost,
}

/// The resolved consequence of a single [`NarrativeSession::choose`] call.
#[derive(Debug, Clone)]
pub struct ChoiceOutcome {
    /// Narration for the resolved result. May be empty; the caller skips
    /// display then but still paces the advance.
    pub narration: String,
    /// Where the session went next.
    pub transition: Transition,
}

/// One play-through of a scenario.
///
/// Holds the current step, the progression scale, and a seeded RNG; all
/// randomness and mutation happen inside [`choose`](Self::choose). A
/// terminated session stays terminated — replay means constructing a new
/// session from a fresh scenario pick.
#[derive(Debug)]
pub struct NarrativeSession {
    scenario: Scenario,
    step_index: usize,
    progression: ProgressionScale,
    outcome: Option<Ending>,
    rng: StdRng,
}

impl NarrativeSession {
    /// Start a session at step 0 with a fresh level-0 progression scale.
    ///
    /// Fails fast with a content error if the scenario is malformed
    /// (no steps, step without options, option without results).
    pub fn new(scenario: Scenario, config: SessionConfig) -> EngineResult<Self> {
        scenario.validate()?;
        let progression = ProgressionScale::new(scenario.mode);
        Ok(Self {
            scenario,
            step_index: 0,
            progression,
            outcome: None,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// The scenario being played.
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Current progression scale.
    pub fn progression(&self) -> ProgressionScale {
        self.progression
    }

    /// Index of the current chapter step.
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// The step currently awaiting a choice, or `None` once terminated.
    pub fn current_step(&self) -> Option<&ChapterStep> {
        if self.outcome.is_some() {
            return None;
        }
        self.scenario.steps.get(self.step_index)
    }

    /// How the session ended, if it has.
    pub fn outcome(&self) -> Option<Ending> {
        self.outcome
    }

    /// Whether the session has ended.
    pub fn is_terminated(&self) -> bool {
        self.outcome.is_some()
    }

    /// Observable state: awaiting a choice at some step, or terminated.
    pub fn state(&self) -> SessionState {
        match self.outcome {
            Some(ending) => SessionState::Terminated(ending),
            None => SessionState::AwaitingChoice {
                step: self.step_index,
            },
        }
    }

    /// Resolve the chosen option and move the session forward.
    ///
    /// Decision table:
    /// 1. a terminated session or a missing option tag is a guard error;
    /// 2. one result entry is drawn uniformly from the option's list;
    /// 3. the effect is applied to the progression scale (clamped);
    /// 4. `GameOver`/`ResetToZero` with a resulting level below 1 terminates
    ///    with [`Ending::Lost`] on the spot;
    /// 5. otherwise the session advances one step — unconditionally, the
    ///    step's `advance_unconditionally` flag adds nothing on top;
    /// 6. advancing past the last step settles the final outcome: top tier
    ///    for cultivation, level 11+ for business/survival.
    pub fn choose(&mut self, tag: OptionTag) -> EngineResult<ChoiceOutcome> {
        if self.outcome.is_some() {
            return Err(EngineError::SessionOver);
        }

        let step = &self.scenario.steps[self.step_index];
        let option = step.option(tag).ok_or(EngineError::MissingOption {
            step: step.id,
            tag,
        })?;
        let entry = resolver::resolve(option, &mut self.rng)
            .ok_or(EngineError::EmptyResults { step: step.id, tag })?
            .clone();

        self.progression = self.progression.apply(&entry);

        let fatal = matches!(entry.effect, EffectKind::GameOver | EffectKind::ResetToZero);
        if fatal && self.progression.level() < 1 {
            self.outcome = Some(Ending::Lost);
            return Ok(ChoiceOutcome {
                narration: entry.narration,
                transition: Transition::Lost,
            });
        }

        self.step_index += 1;
        let transition = if self.step_index >= self.scenario.steps.len() {
            let ending = if self.progression.is_winning() {
                Ending::Won
            } else {
                Ending::Lost
            };
            self.outcome = Some(ending);
            match ending {
                Ending::Won => Transition::Won,
                Ending::Lost => Transition::Lost,
            }
        } else {
            Transition::Advanced {
                step: self.step_index,
            }
        };

        Ok(ChoiceOutcome {
            narration: entry.narration,
            transition,
        })
    }
}
