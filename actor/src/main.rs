//! Actor - self-play runner for the UCT engine
//!
//! Plays a configured number of tic-tac-toe games between two search
//! engines, logging each finished board and a final tally.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod actor;
mod config;
mod stats;

use crate::actor::Actor;
use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let mut actor = Actor::new(config)?;

    match actor.run() {
        Ok(tally) => {
            info!(
                games = tally.games(),
                player_one_wins = tally.wins(engine_core::Player::One),
                player_two_wins = tally.wins(engine_core::Player::Two),
                ties = tally.ties(),
                "Actor completed successfully"
            );
            Ok(())
        }
        Err(e) => {
            error!("Actor failed: {:#}", e);
            Err(e)
        }
    }
}
