//! Configuration for a narrative session.

/// Configuration for one play-through.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible outcome resolution.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
