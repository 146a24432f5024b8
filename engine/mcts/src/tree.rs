//! MCTS tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices. The
//! tree owns the transposition table, so a state that is reached through
//! several move orders is backed by a single node and the structure is a DAG.
//! The game graph is assumed to be acyclic.

use engine_core::Game;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::node::{MctsNode, NodeId};
use crate::search::SearchError;
use crate::table::{TableStats, TranspositionTable};
use crate::ucb::ucb1;

/// Result of filling one move slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expansion {
    /// Node now linked from the slot
    pub child: NodeId,
    /// True when the child already existed and was linked through the table
    pub merged: bool,
}

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<G: Game> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<G>>,

    /// Fingerprint index over the arena
    table: TranspositionTable,
}

impl<G: Game> Default for MctsTree<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Game> MctsTree<G> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            table: TranspositionTable::new(),
        }
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<G> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<G> {
        &mut self.nodes[id.0 as usize]
    }

    fn allocate(&mut self, node: MctsNode<G>) -> NodeId {
        // u32::MAX is reserved for NodeId::NONE
        let index = u32::try_from(self.nodes.len())
            .ok()
            .filter(|&index| index != NodeId::NONE.0);
        let Some(index) = index else {
            panic!("node arena exceeded {} entries", NodeId::NONE.0);
        };
        let id = NodeId(index);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node for `state`, created with every move unexpanded if absent.
    pub fn ensure_node(&mut self, game: &G, state: &G::State) -> NodeId {
        let key = game.fingerprint(state);
        if let Some(id) = self.table.get(&key) {
            return id;
        }

        let id = self.allocate(MctsNode::new(game, state.clone(), NodeId::NONE, None));
        self.table.insert(key, id)
    }

    /// Node for `state`, if one exists. Never inserts.
    pub fn lookup(&self, game: &G, state: &G::State) -> Option<NodeId> {
        self.table.get(&game.fingerprint(state))
    }

    /// Fill slot `slot` of `parent`, reusing an existing node for the
    /// resulting state when the table has one.
    pub(crate) fn expand_slot(&mut self, game: &G, parent: NodeId, slot: usize) -> Expansion {
        let node = self.get(parent);
        let (mv, existing) = node.children[slot];
        if let Some(child) = existing {
            return Expansion {
                child,
                merged: false,
            };
        }

        let state = game.apply(&node.state, mv);
        let key = game.fingerprint(&state);
        let (child, merged) = match self.table.probe(&key) {
            Some(id) => (id, true),
            None => {
                let id = self.allocate(MctsNode::new(game, state, parent, Some(mv)));
                (self.table.insert(key, id), false)
            }
        };

        self.get_mut(parent).children[slot].1 = Some(child);
        Expansion { child, merged }
    }

    /// Fill the slot for `mv` at `parent`.
    pub fn expand_move(
        &mut self,
        game: &G,
        parent: NodeId,
        mv: G::Move,
    ) -> Result<Expansion, SearchError> {
        let slot = self
            .get(parent)
            .slot_of(mv)
            .ok_or_else(|| SearchError::UnknownMove(mv.to_string()))?;
        Ok(self.expand_slot(game, parent, slot))
    }

    /// Child reached from `node` by `mv`.
    pub fn child(&self, node: NodeId, mv: G::Move) -> Result<NodeId, SearchError> {
        let node = self.get(node);
        let slot = node
            .slot_of(mv)
            .ok_or_else(|| SearchError::UnknownMove(mv.to_string()))?;
        node.children[slot]
            .1
            .ok_or_else(|| SearchError::NotExpanded(mv.to_string()))
    }

    /// Select the child of a node with maximal UCB1.
    ///
    /// Ties are broken uniformly at random. Unexpanded slots are skipped.
    pub fn select_child<R: Rng + ?Sized>(
        &self,
        node_id: NodeId,
        explore_param: f64,
        rng: &mut R,
    ) -> Option<NodeId> {
        let node = self.get(node_id);
        let scored: Vec<(NodeId, f64)> = node
            .children
            .iter()
            .filter_map(|(_, child)| *child)
            .map(|id| {
                let child = self.get(id);
                (id, ucb1(child.score, child.visits, node.visits, explore_param))
            })
            .collect();

        let best = scored
            .iter()
            .map(|(_, score)| *score)
            .fold(f64::NEG_INFINITY, f64::max);
        let candidates: Vec<NodeId> = scored
            .iter()
            .filter(|(_, score)| *score == best)
            .map(|(id, _)| *id)
            .collect();

        candidates.choose(rng).copied()
    }

    /// Transposition table usage.
    pub fn table_stats(&self) -> TableStats {
        self.table.stats()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            total_nodes: self.nodes.len(),
            table: self.table.stats(),
            ..TreeStats::default()
        };
        for node in &self.nodes {
            if node.is_terminal() {
                stats.terminal_nodes += 1;
            }
            if node.score.is_proven_loss() {
                stats.proven_losses += 1;
            }
            stats.expanded_slots += node.children.iter().filter(|(_, c)| c.is_some()).count();
        }
        stats
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, Default)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub terminal_nodes: usize,
    pub proven_losses: usize,
    pub expanded_slots: usize,
    pub table: TableStats,
}
