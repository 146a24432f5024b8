//! UCT search implementation.
//!
//! Each iteration runs four phases from the searched state's node:
//! 1. Selection: descend through fully expanded nodes by UCB1
//! 2. Expansion: fill one random unexpanded move slot
//! 3. Simulation: random play-out to a concluded outcome
//! 4. Backpropagation: update statistics along the recorded path
//!
//! Between simulation and backpropagation a one-ply lookahead marks moves
//! that hand the opponent an immediate win as proven losses.

use std::time::{Duration, Instant};

use engine_core::{Game, Outcome};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::policy::{self, Policy};
use crate::table::TableStats;
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Move {0} is not legal at this state")]
    UnknownMove(String),

    #[error("Move {0} has not been expanded yet")]
    NotExpanded(String),

    #[error("Not enough search at this state to apply a statistics policy")]
    InsufficientSearch,

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Counters for one call to `search` or `search_for`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    /// Iterations completed
    pub iterations: u32,
    /// Move slots filled
    pub expansions: u32,
    /// Expansions that linked an existing node
    pub transpositions: u32,
    /// Iterations that stopped at a concluded or move-less node
    pub terminal_hits: u32,
    /// Nodes newly marked as proven losses
    pub pruned: u32,
    /// Wall-clock time spent
    pub elapsed: Duration,
}

/// Read-only view of one move slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats<M> {
    pub mv: M,
    /// Whether the slot points at a node yet
    pub expanded: bool,
    pub visits: u32,
    /// Wins for the mover; zero once pruned
    pub wins: f64,
    /// Move is a proven loss
    pub pruned: bool,
}

/// UCT search engine.
///
/// Owns the node arena and transposition table, so keeping one engine alive
/// across moves of a game reuses everything searched so far.
#[derive(Debug)]
pub struct Mcts<G: Game, R: Rng = ChaCha20Rng> {
    game: G,
    config: MctsConfig,
    tree: MctsTree<G>,
    rng: R,
}

impl<G: Game> Mcts<G, ChaCha20Rng> {
    /// Create an engine seeded from `config.seed`, or from entropy if unset.
    pub fn from_config(game: G, config: MctsConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        Self::new(game, config, rng)
    }
}

impl<G: Game, R: Rng> Mcts<G, R> {
    /// Create an engine with an injected random source.
    pub fn new(game: G, config: MctsConfig, rng: R) -> Self {
        Self {
            game,
            config,
            tree: MctsTree::new(),
            rng,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<G> {
        &self.tree
    }

    pub fn table_stats(&self) -> TableStats {
        self.tree.table_stats()
    }

    /// Run exactly `iterations` iterations from `state`.
    pub fn search(
        &mut self,
        state: &G::State,
        iterations: u32,
    ) -> Result<SearchStats, SearchError> {
        self.validate()?;
        let start = Instant::now();
        let root = self.tree.ensure_node(&self.game, state);

        let mut stats = SearchStats::default();
        for _ in 0..iterations {
            self.iterate(root, &mut stats);
        }

        stats.elapsed = start.elapsed();
        self.log_summary(root, &stats);
        Ok(stats)
    }

    /// Run iterations from `state` until `budget` has elapsed.
    ///
    /// The deadline is checked between iterations only.
    pub fn search_for(
        &mut self,
        state: &G::State,
        budget: Duration,
    ) -> Result<SearchStats, SearchError> {
        self.validate()?;
        let start = Instant::now();
        let deadline = start + budget;
        let root = self.tree.ensure_node(&self.game, state);

        let mut stats = SearchStats::default();
        while Instant::now() < deadline {
            self.iterate(root, &mut stats);
        }

        stats.elapsed = start.elapsed();
        self.log_summary(root, &stats);
        Ok(stats)
    }

    /// Search with the configured budget, then recommend with the configured
    /// policy.
    pub fn best_move(&mut self, state: &G::State) -> Result<G::Move, SearchError> {
        self.search(state, self.config.iterations)?;
        self.recommend(state, self.config.policy)
    }

    /// Pick a move at `state` using `policy`.
    pub fn recommend(
        &mut self,
        state: &G::State,
        policy: Policy,
    ) -> Result<G::Move, SearchError> {
        let legal = self.game.legal_moves(state);
        if legal.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        if policy == Policy::UniformRandom {
            return legal
                .choose(&mut self.rng)
                .copied()
                .ok_or(SearchError::NoLegalMoves);
        }

        let node = self
            .tree
            .lookup(&self.game, state)
            .ok_or(SearchError::InsufficientSearch)?;
        let mv = policy::select_move(&self.tree, node, policy, &mut self.rng)?;

        debug!(%mv, %policy, visits = self.tree.get(node).visits, "Recommended move");
        Ok(mv)
    }

    /// Statistics of every move slot at `state`, in legal-move order.
    pub fn child_stats(
        &self,
        state: &G::State,
    ) -> Result<Vec<ChildStats<G::Move>>, SearchError> {
        let node = self
            .tree
            .lookup(&self.game, state)
            .ok_or(SearchError::InsufficientSearch)?;

        let stats = self
            .tree
            .get(node)
            .children
            .iter()
            .map(|&(mv, child)| match child {
                Some(id) => {
                    let child = self.tree.get(id);
                    ChildStats {
                        mv,
                        expanded: true,
                        visits: child.visits,
                        wins: child.score.wins().unwrap_or(0.0),
                        pruned: child.score.is_proven_loss(),
                    }
                }
                None => ChildStats {
                    mv,
                    expanded: false,
                    visits: 0,
                    wins: 0.0,
                    pruned: false,
                },
            })
            .collect();
        Ok(stats)
    }

    /// Node reached from `state` by `mv`.
    pub fn child(&self, state: &G::State, mv: G::Move) -> Result<NodeId, SearchError> {
        let node = self
            .tree
            .lookup(&self.game, state)
            .ok_or(SearchError::InsufficientSearch)?;
        self.tree.child(node, mv)
    }

    fn validate(&self) -> Result<(), SearchError> {
        let c = self.config.explore_param;
        if !c.is_finite() || c < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "explore_param must be a non-negative number, got {}",
                c
            )));
        }
        Ok(())
    }

    /// Run a single iteration (select -> expand -> simulate -> backpropagate).
    fn iterate(&mut self, root: NodeId, stats: &mut SearchStats) {
        let mut path = vec![root];
        let mut current = root;

        // Selection: descend while every move has been tried
        loop {
            let node = self.tree.get(current);
            if node.is_terminal() || node.children.is_empty() || !node.is_fully_expanded() {
                break;
            }
            match self
                .tree
                .select_child(current, self.config.explore_param, &mut self.rng)
            {
                Some(child) => {
                    path.push(child);
                    current = child;
                }
                None => break,
            }
        }

        // Expansion: one random slot per iteration
        let node = self.tree.get(current);
        if node.is_terminal() || node.children.is_empty() {
            stats.terminal_hits = stats.terminal_hits.saturating_add(1);
        } else {
            let slots = node.unexpanded_slots();
            if let Some(&slot) = slots.choose(&mut self.rng) {
                let expansion = self.tree.expand_slot(&self.game, current, slot);
                stats.expansions = stats.expansions.saturating_add(1);
                if expansion.merged {
                    stats.transpositions = stats.transpositions.saturating_add(1);
                }
                path.push(expansion.child);
                current = expansion.child;
            }
        }

        let result = self.rollout(current);

        if let [.., parent, leaf] = *path.as_slice() {
            if self.prune(root, parent, leaf) {
                stats.pruned = stats.pruned.saturating_add(1);
            }
        }

        self.backpropagate(&path, result);
        stats.iterations = stats.iterations.saturating_add(1);

        trace!(
            leaf = current.0,
            depth = path.len(),
            result = %result,
            "MCTS iteration complete"
        );
    }

    /// Record `result` on every node of `path`.
    ///
    /// Walks the path actually taken, not parent links, so a transposed node
    /// credits whichever parent led to it this time.
    fn backpropagate(&mut self, path: &[NodeId], result: Outcome) {
        for &id in path {
            self.tree.get_mut(id).record(result);
        }
    }

    /// Play uniformly random moves from `leaf` until the game concludes.
    ///
    /// A state with no legal moves that is still undecided counts as a tie.
    fn rollout(&mut self, leaf: NodeId) -> Outcome {
        let node = self.tree.get(leaf);
        if node.is_terminal() {
            return node.outcome;
        }

        let mut state = node.state.clone();
        loop {
            let outcome = self.game.outcome(&state);
            if outcome.is_concluded() {
                return outcome;
            }
            let moves = self.game.legal_moves(&state);
            match moves.choose(&mut self.rng) {
                Some(&mv) => state = self.game.apply(&state, mv),
                None => return Outcome::Tie,
            }
        }
    }

    /// Mark forced losses revealed by `leaf`'s own outcome.
    ///
    /// Returns true if a node was newly marked.
    fn prune(&mut self, root: NodeId, parent: NodeId, leaf: NodeId) -> bool {
        let Outcome::WinFor(winner) = self.tree.get(leaf).outcome else {
            return false;
        };
        let parent_mover = self.tree.get(parent).mover;
        let root_opponent = self.game.opponent(self.tree.get(root).mover);

        let target = if winner == self.game.opponent(parent_mover) {
            // The move into `leaf` lost for the player who made it
            leaf
        } else if parent != root && winner == root_opponent {
            // The root side's opponent wins on the spot from `parent`
            parent
        } else {
            return false;
        };

        let node = self.tree.get_mut(target);
        if node.score.is_proven_loss() {
            return false;
        }
        node.mark_proven_loss();
        trace!(node = target.0, winner = %winner, "Marked proven loss");
        true
    }

    fn log_summary(&self, root: NodeId, stats: &SearchStats) {
        let table = self.tree.table_stats();
        debug!(
            iterations = stats.iterations,
            expansions = stats.expansions,
            transpositions = stats.transpositions,
            terminal_hits = stats.terminal_hits,
            pruned = stats.pruned,
            root_visits = self.tree.get(root).visits,
            nodes = self.tree.len(),
            table_hit_rate = table.hit_rate(),
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "Search complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Score;
    use engine_core::{GameMetadata, Player, StateKey};
    use games_tictactoe::{State, TicTacToe};

    fn engine(seed: u64) -> Mcts<TicTacToe> {
        Mcts::from_config(TicTacToe::new(), MctsConfig::for_testing().with_seed(seed))
    }

    /// X X .
    /// O O .
    /// . . .
    fn immediate_win() -> State {
        State::from_moves(Player::One, &[0, 3, 1, 4]).unwrap()
    }

    /// O O .
    /// O X .
    /// . . X
    ///
    /// X to move; O wins next ply whatever X does.
    fn every_move_loses() -> State {
        State::from_moves(Player::Two, &[0, 4, 1, 8, 3]).unwrap()
    }

    #[test]
    fn test_root_visits_equal_iterations() {
        let mut mcts = engine(42);
        let state = State::new(Player::One);

        let stats = mcts.search(&state, 500).unwrap();
        assert_eq!(stats.iterations, 500);

        let root = mcts.tree().lookup(mcts.game(), &state).unwrap();
        assert_eq!(mcts.tree().get(root).visits, 500);
    }

    #[test]
    fn test_child_slots_match_legal_moves() {
        let mut mcts = engine(42);
        let state = immediate_win();
        mcts.search(&state, 100).unwrap();

        let moves: Vec<u8> = mcts.child_stats(&state).unwrap().iter().map(|c| c.mv).collect();
        assert_eq!(moves, mcts.game().legal_moves(&state));

        mcts.search(&state, 100).unwrap();
        assert_eq!(mcts.child_stats(&state).unwrap().len(), moves.len());
    }

    #[test]
    fn test_first_iteration_deltas() {
        let mut mcts = engine(3);
        let state = State::new(Player::One);

        let stats = mcts.search(&state, 1).unwrap();
        assert_eq!(stats.expansions, 1);

        let tree = mcts.tree();
        let root = tree.lookup(mcts.game(), &state).unwrap();
        let root_node = tree.get(root);
        assert_eq!(root_node.visits, 1);

        let children = mcts.child_stats(&state).unwrap();
        let expanded: Vec<_> = children.iter().filter(|c| c.expanded).collect();
        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[0].visits, 1);

        // Root is credited to player two, the child to player one: exactly one
        // point is shared between them
        let root_wins = root_node.score.wins().unwrap();
        assert!([0.0, 0.5, 1.0].contains(&root_wins));
        assert!((root_wins + expanded[0].wins - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_visits_never_decrease() {
        let mut mcts = engine(11);
        let state = State::new(Player::One);

        mcts.search(&state, 200).unwrap();
        let before = mcts.child_stats(&state).unwrap();
        mcts.search(&state, 200).unwrap();
        let after = mcts.child_stats(&state).unwrap();

        for (b, a) in before.iter().zip(&after) {
            assert_eq!(b.mv, a.mv);
            assert!(a.visits >= b.visits);
        }
    }

    #[test]
    fn test_empty_board_recommends_legal_move() {
        let mut mcts = Mcts::from_config(
            TicTacToe::new(),
            MctsConfig::default().with_explore_param(2.0).with_seed(42),
        );
        let state = State::new(Player::One);
        mcts.search(&state, 2000).unwrap();

        let legal = mcts.game().legal_moves(&state);
        for policy in [Policy::MostVisited, Policy::HighestWinRate, Policy::UniformRandom] {
            let mv = mcts.recommend(&state, policy).unwrap();
            assert!(legal.contains(&mv), "{} returned {}", policy, mv);
        }
    }

    #[test]
    fn test_finds_immediate_win() {
        let state = immediate_win();
        for seed in 0..20 {
            let mut mcts = engine(seed);
            mcts.search(&state, 100).unwrap();

            assert_eq!(mcts.recommend(&state, Policy::MostVisited), Ok(2), "seed {}", seed);
            assert_eq!(mcts.recommend(&state, Policy::HighestWinRate), Ok(2), "seed {}", seed);
        }
    }

    #[test]
    fn test_backpropagation_follows_taken_path() {
        let mut mcts = engine(42);
        let game = *mcts.game();
        let tree = &mut mcts.tree;
        let root = tree.ensure_node(&game, &State::new(Player::One));

        // 0 -> 4 -> 8 creates the shared node under `b`
        let a = tree.expand_move(&game, root, 0).unwrap().child;
        let b = tree.expand_move(&game, a, 4).unwrap().child;
        let shared = tree.expand_move(&game, b, 8).unwrap().child;

        // 8 -> 4 -> 0 links it under `b2`
        let a2 = tree.expand_move(&game, root, 8).unwrap().child;
        let b2 = tree.expand_move(&game, a2, 4).unwrap().child;
        let merged = tree.expand_move(&game, b2, 0).unwrap();
        assert!(merged.merged);
        assert_eq!(merged.child, shared);
        assert_eq!(tree.get(shared).parent, b);

        mcts.backpropagate(&[root, a2, b2, shared], Outcome::Tie);

        let tree = mcts.tree();
        for id in [root, a2, b2, shared] {
            assert_eq!(tree.get(id).visits, 1);
        }
        assert_eq!(tree.get(a).visits, 0);
        assert_eq!(tree.get(b).visits, 0);
        assert_eq!(tree.get(b).score, Score::Wins(0.0));
    }

    /// Running total misère game: players add 1 or 2 and whoever brings the
    /// total to 5 or more loses.
    #[derive(Debug, Clone, Copy)]
    struct Misere;

    #[derive(Debug, Clone)]
    struct Total {
        total: u8,
        to_move: Player,
    }

    impl Game for Misere {
        type State = Total;
        type Move = u8;

        fn metadata(&self) -> GameMetadata {
            GameMetadata::new("misere", "Misere count to five")
        }
        fn initial_state(&self, first_mover: Player) -> Total {
            Total { total: 0, to_move: first_mover }
        }
        fn player_to_move(&self, state: &Total) -> Player {
            state.to_move
        }
        fn legal_moves(&self, state: &Total) -> Vec<u8> {
            if state.total >= 5 {
                Vec::new()
            } else {
                vec![1, 2]
            }
        }
        fn apply(&self, state: &Total, mv: u8) -> Total {
            Total { total: state.total + mv, to_move: state.to_move.opponent() }
        }
        fn outcome(&self, state: &Total) -> Outcome {
            // The player who just moved went over
            if state.total >= 5 {
                Outcome::WinFor(state.to_move)
            } else {
                Outcome::Undecided
            }
        }
        fn fingerprint(&self, state: &Total) -> StateKey {
            StateKey::new(state.to_move).with_token(state.total)
        }
        fn render(&self, state: &Total) -> String {
            state.total.to_string()
        }
    }

    #[test]
    fn test_self_losing_move_is_pruned() {
        let mut mcts = Mcts::from_config(Misere, MctsConfig::for_testing());
        // Adding 2 reaches 5 and loses for player one; adding 1 forces player two over
        let state = Total { total: 3, to_move: Player::One };

        let stats = mcts.search(&state, 50).unwrap();
        assert!(stats.pruned > 0);

        let losing = mcts.child(&state, 2).unwrap();
        assert_eq!(mcts.tree().get(losing).score, Score::ProvenLoss);
        let visits = mcts.tree().get(losing).visits;

        mcts.search(&state, 50).unwrap();
        let node = mcts.tree().get(losing);
        assert_eq!(node.score, Score::ProvenLoss);
        // UCB1 never picks it again once its sibling is expanded
        assert_eq!(node.visits, visits);

        let children = mcts.child_stats(&state).unwrap();
        assert!(children.iter().any(|c| c.mv == 2 && c.pruned && c.wins == 0.0));
        assert!(children.iter().any(|c| c.mv == 1 && !c.pruned));
        assert_eq!(mcts.recommend(&state, Policy::MostVisited), Ok(1));
        assert_eq!(mcts.recommend(&state, Policy::HighestWinRate), Ok(1));
    }

    #[test]
    fn test_best_move_uses_config() {
        let mut mcts = engine(5);
        assert_eq!(mcts.best_move(&immediate_win()), Ok(2));
    }

    #[test]
    fn test_every_move_losing_still_recommends() {
        let mut mcts = engine(42);
        let state = every_move_loses();
        let stats = mcts.search(&state, 300).unwrap();
        assert!(stats.pruned > 0);

        let children = mcts.child_stats(&state).unwrap();
        assert_eq!(children.len(), 4);
        assert!(children.iter().all(|c| c.pruned));

        let legal = mcts.game().legal_moves(&state);
        let mv = mcts.recommend(&state, Policy::MostVisited).unwrap();
        assert!(legal.contains(&mv));
        let mv = mcts.recommend(&state, Policy::HighestWinRate).unwrap();
        assert!(legal.contains(&mv));
    }

    #[test]
    fn test_proven_loss_survives_more_search() {
        let mut mcts = engine(8);
        let state = every_move_loses();
        mcts.search(&state, 300).unwrap();
        mcts.search(&state, 300).unwrap();

        let children = mcts.child_stats(&state).unwrap();
        assert!(children.iter().all(|c| c.pruned && c.wins == 0.0));
        assert_eq!(children.iter().map(|c| c.visits).sum::<u32>(), 600);
    }

    #[test]
    fn test_transpositions_share_nodes() {
        let mut mcts = engine(42);
        let state = State::new(Player::One);
        let stats = mcts.search(&state, 2000).unwrap();

        assert!(stats.transpositions > 0);
        assert_eq!(mcts.table_stats().hits, u64::from(stats.transpositions));
        assert_eq!(mcts.table_stats().entries, mcts.tree().len());
        assert_eq!(mcts.tree().len() as u32, stats.expansions - stats.transpositions + 1);
    }

    #[test]
    fn test_tree_reuse_across_moves() {
        let mut mcts = engine(42);
        let state = State::new(Player::One);
        mcts.search(&state, 300).unwrap();

        let child = mcts.child(&state, 4).unwrap();
        let next = mcts.game().apply(&state, 4);
        let visits_before = mcts.tree().get(child).visits;
        assert!(visits_before > 0);

        mcts.search(&next, 100).unwrap();
        assert_eq!(mcts.tree().lookup(mcts.game(), &next), Some(child));
        assert_eq!(mcts.tree().get(child).visits, visits_before + 100);
    }

    #[test]
    fn test_same_seed_same_statistics() {
        let state = State::new(Player::One);
        let mut a = engine(99);
        let mut b = engine(99);
        a.search(&state, 300).unwrap();
        b.search(&state, 300).unwrap();

        assert_eq!(a.child_stats(&state).unwrap(), b.child_stats(&state).unwrap());
    }

    #[test]
    fn test_search_for_deadline() {
        let mut mcts = engine(42);
        let state = State::new(Player::One);
        let stats = mcts.search_for(&state, Duration::from_millis(20)).unwrap();

        assert!(stats.iterations > 0);
        assert!(stats.elapsed >= Duration::from_millis(20));
        let root = mcts.tree().lookup(mcts.game(), &state).unwrap();
        assert_eq!(mcts.tree().get(root).visits, stats.iterations);
    }

    #[test]
    fn test_search_terminal_state() {
        let mut mcts = engine(42);
        let state = State::from_moves(Player::One, &[0, 3, 1, 4, 2]).unwrap();
        let stats = mcts.search(&state, 10).unwrap();

        assert_eq!(stats.terminal_hits, 10);
        assert_eq!(stats.expansions, 0);
        assert_eq!(
            mcts.recommend(&state, Policy::MostVisited),
            Err(SearchError::NoLegalMoves)
        );
    }

    #[test]
    fn test_unsearched_state_errors() {
        let mut mcts = engine(42);
        let state = State::new(Player::One);

        assert_eq!(
            mcts.recommend(&state, Policy::MostVisited),
            Err(SearchError::InsufficientSearch)
        );
        assert_eq!(mcts.child_stats(&state), Err(SearchError::InsufficientSearch));
        assert_eq!(mcts.child(&state, 0), Err(SearchError::InsufficientSearch));
        // Random play needs no search
        assert!(mcts.recommend(&state, Policy::UniformRandom).is_ok());
    }

    #[test]
    fn test_partial_search_is_insufficient() {
        let mut mcts = engine(42);
        let state = State::new(Player::One);
        mcts.search(&state, 3).unwrap();

        assert_eq!(
            mcts.recommend(&state, Policy::HighestWinRate),
            Err(SearchError::InsufficientSearch)
        );
    }

    #[test]
    fn test_child_errors() {
        let mut mcts = engine(42);
        let state = State::new(Player::One);
        mcts.search(&state, 1).unwrap();

        assert!(matches!(mcts.child(&state, 9), Err(SearchError::UnknownMove(_))));

        let unexpanded = mcts
            .child_stats(&state)
            .unwrap()
            .into_iter()
            .find(|c| !c.expanded)
            .unwrap();
        assert!(matches!(
            mcts.child(&state, unexpanded.mv),
            Err(SearchError::NotExpanded(_))
        ));
    }

    #[test]
    fn test_invalid_explore_param() {
        let config = MctsConfig::for_testing().with_explore_param(-1.0);
        let mut mcts = Mcts::from_config(TicTacToe::new(), config);
        let state = State::new(Player::One);

        assert!(matches!(
            mcts.search(&state, 10),
            Err(SearchError::InvalidConfig(_))
        ));
        assert!(mcts.tree().is_empty());
    }
}
