//! Self-play loop: two UCT engines playing tic-tac-toe against each other

use anyhow::{Context, Result};
use engine_core::{Game, Outcome, Player};
use games_tictactoe::{State, TicTacToe};
use mcts::{Mcts, Policy, SearchStats};
use tracing::{debug, info};

use crate::config::Config;
use crate::stats::GameTally;

/// Accumulated search statistics for one game.
#[derive(Debug, Default, Clone)]
pub struct GameStats {
    /// Number of searches run
    pub search_count: u32,
    pub iterations: u64,
    pub expansions: u64,
    pub transpositions: u64,
    pub terminal_hits: u64,
    pub pruned: u64,
    /// Total time spent searching (microseconds)
    pub total_time_us: u64,
}

impl GameStats {
    /// Add stats from a single search.
    fn add(&mut self, stats: &SearchStats) {
        self.search_count += 1;
        self.iterations += u64::from(stats.iterations);
        self.expansions += u64::from(stats.expansions);
        self.transpositions += u64::from(stats.transpositions);
        self.terminal_hits += u64::from(stats.terminal_hits);
        self.pruned += u64::from(stats.pruned);
        self.total_time_us += stats.elapsed.as_micros() as u64;
    }

    fn log_summary(&self, game_num: u32) {
        if self.search_count == 0 {
            return;
        }

        let total_ms = self.total_time_us as f64 / 1000.0;
        let transposition_pct = if self.expansions > 0 {
            (self.transpositions as f64 / self.expansions as f64) * 100.0
        } else {
            0.0
        };

        debug!(
            game = game_num,
            searches = self.search_count,
            iterations = self.iterations,
            total_ms = format!("{:.1}", total_ms),
            expansions = self.expansions,
            transposition_pct = format!("{:.1}%", transposition_pct),
            terminal_hits = self.terminal_hits,
            pruned = self.pruned,
            "Game search stats"
        );
    }
}

/// Result of one finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub moves: Vec<u8>,
    pub final_state: State,
    pub stats: GameStats,
}

pub struct Actor {
    config: Config,
    game: TicTacToe,
    policies: [Policy; 2],
    first_mover: Player,
    tally: GameTally,
}

impl Actor {
    pub fn new(config: Config) -> Result<Self> {
        let policies = config.policies()?;
        let first_mover = config.starting_player()?;
        let game = TicTacToe::new();
        let metadata = game.metadata();

        info!(
            env_id = %metadata.env_id,
            games = config.games,
            iterations = config.iterations,
            explore_param = config.explore_param,
            player_one = %policies[Player::One.index()],
            player_two = %policies[Player::Two.index()],
            first_mover = %first_mover,
            seed = ?config.seed(),
            "Actor initialized for {}",
            metadata.display_name
        );

        Ok(Self {
            config,
            game,
            policies,
            first_mover,
            tally: GameTally::new(),
        })
    }

    /// Play the configured number of games.
    pub fn run(&mut self) -> Result<&GameTally> {
        info!("Starting self-play");

        for game_num in 1..=self.config.games {
            let record = self
                .play_game(game_num)
                .with_context(|| format!("game {} failed", game_num))?;

            info!(
                game = game_num,
                result = %record.outcome,
                moves = record.moves.len(),
                "Game finished\n{}",
                self.game.render(&record.final_state)
            );
            record.stats.log_summary(game_num);
            self.tally.record(record.outcome, record.moves.len() as u32);

            let interval = self.config.log_interval;
            if interval > 0 && game_num % interval == 0 {
                info!(
                    game = game_num,
                    games_per_sec = format!("{:.2}", self.tally.games_per_second()),
                    "Progress: {}",
                    self.tally
                );
            }
        }

        info!("Self-play complete: {}", self.tally);
        Ok(&self.tally)
    }

    /// Play one game with a fresh engine per player.
    ///
    /// Each engine is kept for the whole game so its tree carries over
    /// between that player's moves.
    fn play_game(&self, game_num: u32) -> Result<GameRecord> {
        let mut engines = [
            self.engine_for(game_num, Player::One),
            self.engine_for(game_num, Player::Two),
        ];

        let mut state = self.game.initial_state(self.first_mover);
        let mut moves = Vec::with_capacity(9);
        let mut stats = GameStats::default();

        debug!(game = game_num, first_mover = %self.first_mover, "Starting game");

        let outcome = loop {
            let outcome = self.game.outcome(&state);
            if outcome.is_concluded() {
                break outcome;
            }
            if self.game.legal_moves(&state).is_empty() {
                break Outcome::Tie;
            }

            let mover = self.game.player_to_move(&state);
            let policy = self.policies[mover.index()];
            let engine = &mut engines[mover.index()];

            if policy != Policy::UniformRandom {
                let search = engine.search(&state, self.config.iterations)?;
                stats.add(&search);
            }
            let mv = engine.recommend(&state, policy)?;

            debug!(
                game = game_num,
                ply = moves.len() + 1,
                player = %mover,
                %policy,
                mv,
                "Move chosen"
            );

            state = self.game.apply(&state, mv);
            moves.push(mv);
        };

        Ok(GameRecord {
            outcome,
            moves,
            final_state: state,
            stats,
        })
    }

    fn engine_for(&self, game_num: u32, player: Player) -> Mcts<TicTacToe> {
        let mut config = self.config.mcts_config(self.policies[player.index()]);
        if let Some(seed) = self.config.seed() {
            let offset = u64::from(game_num) * 2 + player.index() as u64;
            config = config.with_seed(seed.wrapping_add(offset));
        }
        Mcts::from_config(self.game, config)
    }
}
