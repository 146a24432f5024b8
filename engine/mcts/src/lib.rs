//! Monte Carlo Tree Search (UCT) for two-player perfect-information games.
//!
//! This crate provides a game-agnostic search engine that works with any
//! game implementing the `engine-core` Game trait.
//!
//! # Overview
//!
//! Each iteration of the search consists of four phases:
//!
//! 1. **Selection**: Traverse fully expanded nodes using UCB1 to balance
//!    exploration and exploitation, breaking ties at random
//! 2. **Expansion**: Fill one randomly chosen unexpanded move slot
//! 3. **Simulation**: Play uniformly random moves until the game concludes
//! 4. **Backpropagation**: Update visit counts and win totals along the
//!    path that was actually taken
//!
//! A transposition table keyed by state fingerprint merges move orders that
//! reach the same position, and a one-ply lookahead marks moves that hand the
//! opponent an immediate win as proven losses.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Game, Player};
//! use games_tictactoe::TicTacToe;
//! use mcts::{Mcts, MctsConfig, Policy};
//!
//! let game = TicTacToe::new();
//! let state = game.initial_state(Player::One);
//!
//! let config = MctsConfig::for_testing();
//! let mut engine = Mcts::from_config(game, config);
//!
//! let stats = engine.search(&state, 500).unwrap();
//! assert_eq!(stats.iterations, 500);
//!
//! let mv = engine.recommend(&state, Policy::MostVisited).unwrap();
//! assert!(mv < 9);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `iterations`: Iterations per search (default: 2000)
//! - `explore_param`: UCB1 constant `C` in `sqrt(C * ln(N) / n)` (default: 2.0)
//! - `policy`: Recommendation policy used by [`Mcts::best_move`]
//! - `seed`: Seed for the engine's `ChaCha20Rng`; unset means entropy
//!
//! # Architecture
//!
//! ```text
//! +------------------------------------------------------+
//! |                        Mcts                          |
//! +------------------------------------------------------+
//! |  +-------------------------+   +------------------+  |
//! |  |        MctsTree         |   |      Game        |  |
//! |  | arena + transposition   |   | (rules provider) |  |
//! |  +------------+------------+   +--------+---------+  |
//! |               |                         |            |
//! |               v                         v            |
//! |  +------------------------------------------------+  |
//! |  |  select -> expand -> simulate -> prune ->      |  |
//! |  |               backpropagate                    |  |
//! |  +------------------------------------------------+  |
//! +------------------------------------------------------+
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod table;
pub mod tree;
pub mod ucb;

// Re-export main types
pub use config::{MctsConfig, DEFAULT_EXPLORE_PARAM};
pub use node::{MctsNode, NodeId, Score};
pub use policy::{ParsePolicyError, Policy};
pub use search::{ChildStats, Mcts, SearchError, SearchStats};
pub use table::{TableStats, TranspositionTable};
pub use tree::{Expansion, MctsTree, TreeStats};
