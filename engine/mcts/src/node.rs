//! MCTS tree node representation.
//!
//! Each node holds one game state, the statistics gathered for it, and one
//! slot per legal move. Slots start unexpanded and are filled with a child id
//! as the search grows the tree.

use engine_core::{Game, Outcome, Player};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// Accumulated result for the player who moved into a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    /// Wins credited so far; a tie counts as half a win.
    Wins(f64),
    /// Moving into this node loses by force. Never reverts to `Wins`.
    ProvenLoss,
}

impl Score {
    /// Win total, or `None` once the node is a proven loss.
    #[inline]
    pub fn wins(self) -> Option<f64> {
        match self {
            Score::Wins(wins) => Some(wins),
            Score::ProvenLoss => None,
        }
    }

    #[inline]
    pub fn is_proven_loss(self) -> bool {
        matches!(self, Score::ProvenLoss)
    }
}

/// A node in the MCTS tree.
#[derive(Debug)]
pub struct MctsNode<G: Game> {
    /// Node that first created this one (NONE for entry points).
    /// Transposed nodes keep their first parent; backpropagation walks the
    /// recorded path instead.
    pub parent: NodeId,

    /// Move that first produced this node from `parent`
    pub incoming_move: Option<G::Move>,

    /// Game state at this node
    pub state: G::State,

    /// Player to move at `state`
    pub mover: Player,

    /// Player whose move produced `state`; wins are credited to this side
    pub last_mover: Player,

    /// Cached outcome of `state`
    pub outcome: Outcome,

    /// Number of iterations that passed through this node
    pub visits: u32,

    /// Win total or forced-loss marker
    pub score: Score,

    /// One slot per legal move, fixed at creation.
    /// `None` until the move has been expanded.
    pub children: Vec<(G::Move, Option<NodeId>)>,
}

impl<G: Game> MctsNode<G> {
    /// Create a node for `state` with every legal move unexpanded.
    pub fn new(
        game: &G,
        state: G::State,
        parent: NodeId,
        incoming_move: Option<G::Move>,
    ) -> Self {
        let mover = game.player_to_move(&state);
        let outcome = game.outcome(&state);
        let children = game
            .legal_moves(&state)
            .into_iter()
            .map(|mv| (mv, None))
            .collect();

        Self {
            parent,
            incoming_move,
            state,
            mover,
            last_mover: game.opponent(mover),
            outcome,
            visits: 0,
            score: Score::Wins(0.0),
            children,
        }
    }

    /// Wins divided by visits. Proven losses rank below everything.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        match self.score {
            Score::ProvenLoss => f64::NEG_INFINITY,
            Score::Wins(_) if self.visits == 0 => 0.0,
            Score::Wins(wins) => wins / f64::from(self.visits),
        }
    }

    /// Check if the game is over at this node.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_concluded()
    }

    /// Check if every move slot points at a child.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.children.iter().all(|(_, child)| child.is_some())
    }

    /// Indices of slots that have not been expanded yet.
    pub fn unexpanded_slots(&self) -> Vec<usize> {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, (_, child))| child.is_none())
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Slot index holding `mv`.
    pub fn slot_of(&self, mv: G::Move) -> Option<usize> {
        self.children.iter().position(|(m, _)| *m == mv)
    }

    /// Apply one simulation result.
    ///
    /// Visits always advance; wins are left alone on proven losses.
    pub fn record(&mut self, result: Outcome) {
        self.visits = self.visits.saturating_add(1);
        if let Score::Wins(wins) = &mut self.score {
            match result {
                Outcome::WinFor(winner) if winner == self.last_mover => *wins += 1.0,
                Outcome::Tie => *wins += 0.5,
                _ => {}
            }
        }
    }

    /// Flag the move into this node as a forced loss.
    pub fn mark_proven_loss(&mut self) {
        self.score = Score::ProvenLoss;
    }
}
