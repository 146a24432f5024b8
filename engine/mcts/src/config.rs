//! MCTS configuration parameters.

use crate::policy::Policy;

/// Default exploration constant `C` in `sqrt(C * ln(N) / n)`.
///
/// Equivalent to a coefficient of sqrt(2) when `C` is written outside the root.
pub const DEFAULT_EXPLORE_PARAM: f64 = 2.0;

/// Configuration for UCT search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of iterations to run per search.
    pub iterations: u32,

    /// Exploration constant for UCB1, placed inside the square root.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub explore_param: f64,

    /// Policy used to turn statistics into a move.
    pub policy: Policy,

    /// Seed for the engine's random source. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 2000,
            explore_param: DEFAULT_EXPLORE_PARAM,
            policy: Policy::MostVisited,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Create a fast, seeded config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 200,
            seed: Some(42),
            ..Self::default()
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the UCB1 exploration constant.
    pub fn with_explore_param(mut self, c: f64) -> Self {
        self.explore_param = c;
        self
    }

    /// Builder pattern: set the recommendation policy.
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Builder pattern: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
