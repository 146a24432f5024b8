//! Core traits and types shared by the search engine and game implementations
//!
//! This crate provides the fixed interface the engine consumes:
//! - `Game`: rules provider (legal moves, state transition, outcome detection)
//! - `Player` / `Outcome`: who moves and how a game ended
//! - `StateKey`: stable fingerprint used as transposition-table key
//! - `GameMetadata`: display information for runners and logs

pub mod metadata;
pub mod player;
pub mod state_key;
pub mod typed;

// Re-export main types for convenience
pub use metadata::GameMetadata;
pub use player::{Outcome, ParsePlayerError, Player};
pub use state_key::StateKey;
pub use typed::Game;
