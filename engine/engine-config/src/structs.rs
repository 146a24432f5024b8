//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.
//! Player and policy names stay strings here; the runner parses them.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_first_mover() -> String {
    defaults::first_mover().into()
}
fn d_iterations() -> u32 {
    defaults::iterations()
}
fn d_explore_param() -> f64 {
    defaults::explore_param()
}
fn d_policy() -> String {
    defaults::policy().into()
}
fn d_seed() -> Option<u64> {
    defaults::seed()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_opponent_policy() -> String {
    defaults::opponent_policy().into()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub actor: ActorConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// Player who moves first in each game ("one" or "two")
    #[serde(default = "d_first_mover")]
    pub first_mover: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            first_mover: defaults::first_mover().into(),
        }
    }
}

/// Search engine configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    /// Iterations per move
    #[serde(default = "d_iterations")]
    pub iterations: u32,
    /// UCB1 constant inside the square root
    #[serde(default = "d_explore_param")]
    pub explore_param: f64,
    /// Recommendation policy for player one
    #[serde(default = "d_policy")]
    pub policy: String,
    /// Seed for the random source (None = entropy)
    #[serde(default = "d_seed")]
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::iterations(),
            explore_param: defaults::explore_param(),
            policy: defaults::policy().into(),
            seed: defaults::seed(),
        }
    }
}

/// Self-play runner configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ActorConfig {
    /// Number of games to play
    #[serde(default = "d_games")]
    pub games: u32,
    /// Recommendation policy for player two
    #[serde(default = "d_opponent_policy")]
    pub opponent_policy: String,
    /// Log a progress line every N games
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            opponent_policy: defaults::opponent_policy().into(),
            log_interval: defaults::log_interval(),
        }
    }
}
