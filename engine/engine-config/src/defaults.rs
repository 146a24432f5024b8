//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time, so
//! the struct defaults and the documented file never drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    actor: ActorDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    first_mover: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    iterations: u32,
    explore_param: f64,
    policy: String,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ActorDefaults {
    games: u32,
    opponent_policy: String,
    log_interval: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn first_mover() -> &'static str {
    &DEFAULTS.common.first_mover
}

// MCTS
pub fn iterations() -> u32 {
    DEFAULTS.mcts.iterations
}
pub fn explore_param() -> f64 {
    DEFAULTS.mcts.explore_param
}
pub fn policy() -> &'static str {
    &DEFAULTS.mcts.policy
}
pub fn seed() -> Option<u64> {
    DEFAULTS.mcts.seed
}

// Actor
pub fn games() -> u32 {
    DEFAULTS.actor.games
}
pub fn opponent_policy() -> &'static str {
    &DEFAULTS.actor.opponent_policy
}
pub fn log_interval() -> u32 {
    DEFAULTS.actor.log_interval
}
