//! Catalog loading and lookup.

use serde::{Deserialize, Serialize};

use crate::error::{ScenarioError, ScenarioResult};
use crate::scenario::Scenario;

/// The bundled catalog shipped with the engine: one scenario per mode.
const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.json");

/// An immutable collection of playable scenarios.
///
/// Loaded once at startup and never re-read mid-session. Every scenario in a
/// catalog has passed content-integrity validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    scenarios: Vec<Scenario>,
}

impl Catalog {
    /// Load the catalog bundled into the binary.
    pub fn builtin() -> ScenarioResult<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog from JSON.
    pub fn from_json(json: &str) -> ScenarioResult<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> ScenarioResult<()> {
        if self.scenarios.is_empty() {
            return Err(ScenarioError::EmptyCatalog);
        }

        let mut seen = std::collections::HashSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(scenario.id) {
                return Err(ScenarioError::DuplicateScenario(scenario.id));
            }
            scenario.validate()?;
        }

        Ok(())
    }

    /// All scenarios, in catalog order.
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Look up a scenario by id.
    pub fn get(&self, id: u32) -> ScenarioResult<&Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.id == id)
            .ok_or(ScenarioError::UnknownScenario(id))
    }

    /// Number of scenarios.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// True if the catalog holds no scenarios.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
