//! Players and game outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the two sides of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Single-character marker used in fingerprints.
    #[inline]
    pub fn marker(self) -> char {
        match self {
            Player::One => '1',
            Player::Two => '2',
        }
    }

    /// Zero-based index, handy for per-player arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "one"),
            Player::Two => write!(f, "two"),
        }
    }
}

/// Error returned when a player name cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid player '{0}', expected 'one' or 'two'")]
pub struct ParsePlayerError(pub String);

impl FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "one" | "1" => Ok(Player::One),
            "two" | "2" => Ok(Player::Two),
            _ => Err(ParsePlayerError(s.to_string())),
        }
    }
}

/// Result of a game at a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The game is still in progress
    Undecided,
    /// The given player has won
    WinFor(Player),
    /// The game ended without a winner
    Tie,
}

impl Outcome {
    /// Check if the game has concluded.
    #[inline]
    pub fn is_concluded(self) -> bool {
        self != Outcome::Undecided
    }

    /// The winner, if any.
    #[inline]
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::WinFor(player) => Some(player),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Undecided => write!(f, "undecided"),
            Outcome::WinFor(player) => write!(f, "player {} wins", player),
            Outcome::Tie => write!(f, "tie"),
        }
    }
}
