//! TicTacToe rules provider for the search engine
//!
//! This crate provides a complete reference implementation of the
//! `engine_core::Game` trait for 3x3 tic-tac-toe.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Game, Outcome, Player};
//! use games_tictactoe::TicTacToe;
//!
//! let game = TicTacToe::new();
//! let state = game.initial_state(Player::One);
//! assert_eq!(game.legal_moves(&state).len(), 9);
//! assert_eq!(game.outcome(&state), Outcome::Undecided);
//! ```

use engine_core::{Game, GameMetadata, Outcome, Player, StateKey};

/// Number of cells on the board
pub const BOARD_CELLS: usize = 9;

/// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// TicTacToe game state
///
/// Holds the move history together with the board derived from it and the
/// player to move next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// Board representation, row-major
    board: [Option<Player>; BOARD_CELLS],
    /// Player to move next
    to_move: Player,
    /// Cells played so far, in order
    history: Vec<u8>,
}

impl State {
    /// Create an empty board with `first_mover` to play
    pub fn new(first_mover: Player) -> Self {
        Self {
            board: [None; BOARD_CELLS],
            to_move: first_mover,
            history: Vec::with_capacity(BOARD_CELLS),
        }
    }

    /// Replay `moves` from an empty board.
    ///
    /// Returns `None` if any move is out of range, already occupied, or played
    /// after the game has ended.
    pub fn from_moves(first_mover: Player, moves: &[u8]) -> Option<Self> {
        let mut state = Self::new(first_mover);
        for &position in moves {
            if !state.is_legal(position) {
                return None;
            }
            state = state.make_move(position);
        }
        Some(state)
    }

    /// Player to move next
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Occupant of `position`
    pub fn cell(&self, position: usize) -> Option<Player> {
        self.board[position]
    }

    /// Cells played so far, in order
    pub fn history(&self) -> &[u8] {
        &self.history
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.outcome().is_concluded()
    }

    /// Check whether `position` can be played now
    pub fn is_legal(&self, position: u8) -> bool {
        (position as usize) < BOARD_CELLS
            && self.board[position as usize].is_none()
            && !self.is_done()
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..BOARD_CELLS as u8)
            .filter(|&pos| self.board[pos as usize].is_none())
            .collect()
    }

    /// Make a move and return the new state
    ///
    /// Illegal moves leave the state unchanged.
    pub fn make_move(&self, position: u8) -> State {
        if !self.is_legal(position) {
            return self.clone();
        }

        let mut new_state = self.clone();
        new_state.board[position as usize] = Some(self.to_move);
        new_state.history.push(position);
        new_state.to_move = self.to_move.opponent();
        new_state
    }

    /// Winner / tie status of the board
    pub fn outcome(&self) -> Outcome {
        Self::check_winner(&self.board)
    }

    fn check_winner(board: &[Option<Player>; BOARD_CELLS]) -> Outcome {
        for line in &LINES {
            let [a, b, c] = *line;
            if let Some(player) = board[a] {
                if board[b] == Some(player) && board[c] == Some(player) {
                    return Outcome::WinFor(player);
                }
            }
        }

        // Board full but no winner
        if board.iter().all(Option::is_some) {
            return Outcome::Tie;
        }

        Outcome::Undecided
    }
}

/// TicTacToe game implementation
#[derive(Debug, Clone, Copy)]
pub struct TicTacToe {
    symbols: [char; 2],
}

impl TicTacToe {
    /// Create a new TicTacToe game with X for player one and O for player two
    pub fn new() -> Self {
        Self { symbols: ['X', 'O'] }
    }

    fn symbol(&self, cell: Option<Player>) -> char {
        match cell {
            Some(player) => self.symbols[player.index()],
            None => '.',
        }
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for TicTacToe {
    type State = State;
    type Move = u8;

    fn metadata(&self) -> GameMetadata {
        GameMetadata::new("tictactoe", "Tic-Tac-Toe")
            .with_board(3, 3)
            .with_max_moves(BOARD_CELLS)
            .with_players(
                [self.symbols[0].to_string(), self.symbols[1].to_string()],
                self.symbols,
            )
            .with_description("Get three in a row to win!")
    }

    fn initial_state(&self, first_mover: Player) -> State {
        State::new(first_mover)
    }

    fn player_to_move(&self, state: &State) -> Player {
        state.to_move
    }

    fn legal_moves(&self, state: &State) -> Vec<u8> {
        state.legal_moves()
    }

    fn apply(&self, state: &State, mv: u8) -> State {
        state.make_move(mv)
    }

    fn outcome(&self, state: &State) -> Outcome {
        state.outcome()
    }

    /// Mover marker followed by the nine cells.
    ///
    /// The board is a function of the history, so equal histories give equal
    /// keys, while different move orders reaching the same board share one key.
    fn fingerprint(&self, state: &State) -> StateKey {
        let mut key = StateKey::new(state.to_move);
        for cell in &state.board {
            key.push_token(cell.map_or('0', Player::marker));
        }
        key
    }

    fn render(&self, state: &State) -> String {
        let mut result = String::with_capacity(18);
        for row in 0..3 {
            for col in 0..3 {
                result.push(self.symbol(state.board[row * 3 + col]));
                if col < 2 {
                    result.push(' ');
                }
            }
            result.push('\n');
        }
        result
    }
}
