//! Typed Game trait consumed by the search engine
//!
//! Games implement this trait with their own strongly-typed state and move
//! types. The engine never inspects either beyond what the trait exposes.

use crate::metadata::GameMetadata;
use crate::player::{Outcome, Player};
use crate::state_key::StateKey;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Rules provider for a deterministic, perfect-information, two-player game
///
/// All methods are pure: `apply` returns a new state and never mutates its
/// input, and calling any method twice with the same arguments yields the same
/// result.
///
/// # Type Parameters
///
/// * `State` - Immutable game state (history, board and player to move)
/// * `Move` - Small, copyable identifier of one legal action
///
/// # Example
///
/// ```rust
/// # use engine_core::*;
/// #[derive(Debug, Clone)]
/// struct CountState { total: u8, to_move: Player }
///
/// /// Players alternately add 1 or 2; whoever reaches 5 wins.
/// #[derive(Debug)]
/// struct CountToFive;
///
/// impl Game for CountToFive {
///     type State = CountState;
///     type Move = u8;
///
///     fn metadata(&self) -> GameMetadata { GameMetadata::new("count", "Count to five") }
///     fn initial_state(&self, first_mover: Player) -> CountState {
///         CountState { total: 0, to_move: first_mover }
///     }
///     fn player_to_move(&self, state: &CountState) -> Player { state.to_move }
///     fn legal_moves(&self, state: &CountState) -> Vec<u8> {
///         if state.total >= 5 { Vec::new() } else { vec![1, 2] }
///     }
///     fn apply(&self, state: &CountState, mv: u8) -> CountState {
///         CountState { total: state.total + mv, to_move: state.to_move.opponent() }
///     }
///     fn outcome(&self, state: &CountState) -> Outcome {
///         if state.total >= 5 { Outcome::WinFor(state.to_move.opponent()) } else { Outcome::Undecided }
///     }
///     fn fingerprint(&self, state: &CountState) -> StateKey {
///         StateKey::new(state.to_move).with_token(state.total)
///     }
///     fn render(&self, state: &CountState) -> String { state.total.to_string() }
/// }
///
/// let game = CountToFive;
/// let state = game.apply(&game.initial_state(Player::One), 2);
/// assert_eq!(game.player_to_move(&state), Player::Two);
/// ```
pub trait Game: Debug {
    /// Game state type
    type State: Clone + Debug;

    /// Move type - opaque, comparable and hashable
    type Move: Copy + Eq + Hash + Debug + Display;

    /// Get game metadata for runners and logs
    fn metadata(&self) -> GameMetadata;

    /// Create the starting position with `first_mover` to play.
    fn initial_state(&self, first_mover: Player) -> Self::State;

    /// The player who moves next at `state`.
    fn player_to_move(&self, state: &Self::State) -> Player;

    /// Legal moves at `state`, in a stable order.
    ///
    /// Returns an empty list once the game has concluded.
    fn legal_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Apply `mv` and return the resulting state.
    fn apply(&self, state: &Self::State, mv: Self::Move) -> Self::State;

    /// Winner / tie status of `state`.
    fn outcome(&self, state: &Self::State) -> Outcome;

    /// Stable identity of `state` for transposition lookups.
    ///
    /// Must be a pure function of the position and the player to move: equal
    /// histories give equal keys, different positions or movers give different
    /// keys.
    fn fingerprint(&self, state: &Self::State) -> StateKey;

    /// Render the state as text for logs.
    fn render(&self, state: &Self::State) -> String;

    /// The other side.
    fn opponent(&self, player: Player) -> Player {
        player.opponent()
    }
}
