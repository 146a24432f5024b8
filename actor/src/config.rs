//! Configuration for the self-play runner
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_core::Player;
use mcts::{MctsConfig, Policy};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use engine_config::{load_config, CentralConfig};

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_games() -> u32 {
    CENTRAL_CONFIG.actor.games
}

fn default_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.iterations
}

fn default_explore_param() -> f64 {
    CENTRAL_CONFIG.mcts.explore_param
}

fn default_policy() -> String {
    CENTRAL_CONFIG.mcts.policy.clone()
}

fn default_opponent_policy() -> String {
    CENTRAL_CONFIG.actor.opponent_policy.clone()
}

fn default_first_mover() -> String {
    CENTRAL_CONFIG.common.first_mover.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.actor.log_interval
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "actor")]
#[command(about = "Self-play runner for the UCT search engine")]
#[command(
    long_about = "Plays tic-tac-toe games between two UCT engines and reports the results.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Search iterations per move
    #[arg(long, default_value_t = default_iterations())]
    pub iterations: u32,

    /// UCB1 exploration constant (inside the square root)
    #[arg(long, default_value_t = default_explore_param())]
    pub explore_param: f64,

    /// Move policy for player one (most_visited, highest_win_rate, uniform_random)
    #[arg(long, default_value_t = default_policy())]
    pub policy: String,

    /// Move policy for player two
    #[arg(long, default_value_t = default_opponent_policy())]
    pub opponent_policy: String,

    /// Player who moves first (one, two)
    #[arg(long, default_value_t = default_first_mover())]
    pub first_mover: String,

    /// Seed for reproducible games (random if unset)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log progress every N games (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.iterations == 0 {
            return Err(anyhow!("iterations must be greater than 0"));
        }

        if !self.explore_param.is_finite() || self.explore_param < 0.0 {
            return Err(anyhow!(
                "explore_param must be a non-negative number, got {}",
                self.explore_param
            ));
        }

        self.policies()?;
        self.starting_player()?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Policies for player one and player two, indexed by `Player::index`
    pub fn policies(&self) -> Result<[Policy; 2]> {
        let one = self.policy.parse::<Policy>()?;
        let two = self.opponent_policy.parse::<Policy>()?;
        Ok([one, two])
    }

    pub fn starting_player(&self) -> Result<Player> {
        Ok(self.first_mover.parse::<Player>()?)
    }

    /// Seed from the command line, falling back to the central config
    pub fn seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.mcts.seed)
    }

    /// Engine settings for one player
    pub fn mcts_config(&self, policy: Policy) -> MctsConfig {
        MctsConfig::default()
            .with_iterations(self.iterations)
            .with_explore_param(self.explore_param)
            .with_policy(policy)
    }
}
