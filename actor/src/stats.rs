//! Game result tallies for the self-play runner.

use engine_core::{Outcome, Player};
use std::fmt;
use std::time::Instant;

/// Running totals over completed games.
#[derive(Debug)]
pub struct GameTally {
    games: u32,
    wins: [u32; 2],
    ties: u32,
    total_moves: u64,
    start_time: Instant,
}

impl Default for GameTally {
    fn default() -> Self {
        Self::new()
    }
}

impl GameTally {
    pub fn new() -> Self {
        Self {
            games: 0,
            wins: [0; 2],
            ties: 0,
            total_moves: 0,
            start_time: Instant::now(),
        }
    }

    /// Record a finished game.
    ///
    /// `Undecided` is counted as a tie; the runner only reports it for a
    /// position with no legal moves.
    pub fn record(&mut self, outcome: Outcome, moves: u32) {
        self.games += 1;
        self.total_moves += u64::from(moves);
        match outcome {
            Outcome::WinFor(player) => self.wins[player.index()] += 1,
            Outcome::Tie | Outcome::Undecided => self.ties += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.games
    }

    pub fn wins(&self, player: Player) -> u32 {
        self.wins[player.index()]
    }

    pub fn ties(&self) -> u32 {
        self.ties
    }

    pub fn avg_game_length(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / f64::from(self.games)
        }
    }

    pub fn games_per_second(&self) -> f64 {
        let runtime = self.start_time.elapsed().as_secs_f64();
        if runtime > 0.0 {
            f64::from(self.games) / runtime
        } else {
            0.0
        }
    }
}

impl fmt::Display for GameTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: player one {} wins, player two {} wins, {} ties (avg {:.1} moves)",
            self.games,
            self.wins[0],
            self.wins[1],
            self.ties,
            self.avg_game_length()
        )
    }
}
