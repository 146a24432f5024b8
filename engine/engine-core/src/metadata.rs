//! Game metadata for runners and logging
//!
//! Display-oriented information about a game so that the self-play runner
//! can label players and boards without knowing the concrete game.

use crate::player::Player;
use serde::{Deserialize, Serialize};

/// Metadata about a game for display and configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    /// Environment identifier (e.g., "tictactoe")
    pub env_id: String,

    /// Human-readable display name (e.g., "Tic-Tac-Toe")
    pub display_name: String,

    /// Board width in cells
    pub board_width: usize,

    /// Board height in cells
    pub board_height: usize,

    /// Upper bound on the number of legal moves at any state
    pub max_moves: usize,

    /// Display names for each player, indexed by `Player::index`
    pub player_names: [String; 2],

    /// Single-character symbols for each player, indexed by `Player::index`
    pub player_symbols: [char; 2],

    /// Brief description of the game rules
    pub description: String,
}

impl GameMetadata {
    /// Create a new GameMetadata with required fields
    pub fn new(env_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            env_id: env_id.into(),
            display_name: display_name.into(),
            board_width: 0,
            board_height: 0,
            max_moves: 0,
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
            player_symbols: ['1', '2'],
            description: String::new(),
        }
    }

    /// Builder method for board dimensions
    pub fn with_board(mut self, width: usize, height: usize) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    /// Builder method for move count
    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = max_moves;
        self
    }

    /// Builder method for player information
    pub fn with_players(mut self, names: [String; 2], symbols: [char; 2]) -> Self {
        self.player_names = names;
        self.player_symbols = symbols;
        self
    }

    /// Builder method for description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Get the total number of board cells
    pub fn board_size(&self) -> usize {
        self.board_width * self.board_height
    }

    /// Display name of `player`
    pub fn player_name(&self, player: Player) -> &str {
        &self.player_names[player.index()]
    }

    /// Board symbol of `player`
    pub fn player_symbol(&self, player: Player) -> char {
        self.player_symbols[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let meta = GameMetadata::new("tictactoe", "Tic-Tac-Toe")
            .with_board(3, 3)
            .with_max_moves(9)
            .with_players(["X".to_string(), "O".to_string()], ['X', 'O'])
            .with_description("Get three in a row to win!");

        assert_eq!(meta.board_size(), 9);
        assert_eq!(meta.max_moves, 9);
        assert_eq!(meta.player_name(Player::Two), "O");
        assert_eq!(meta.player_symbol(Player::One), 'X');
    }

    #[test]
    fn test_defaults() {
        let meta = GameMetadata::new("test", "Test Game");
        assert_eq!(meta.board_size(), 0);
        assert_eq!(meta.player_symbol(Player::Two), '2');
        assert!(meta.description.is_empty());
    }
}
