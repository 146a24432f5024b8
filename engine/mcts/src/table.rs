//! Transposition table.
//!
//! Maps a state fingerprint to the arena node holding that state, so that
//! different move orders reaching the same position share one set of
//! statistics. Entries live as long as the owning tree.

use std::collections::HashMap;

use engine_core::StateKey;

use crate::node::NodeId;

/// Fingerprint to node index map with hit/miss accounting.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    /// Map from fingerprint to node
    entries: HashMap<StateKey, NodeId>,
    /// Statistics
    hits: u64,
    misses: u64,
}

impl TranspositionTable {
    /// Create a new empty transposition table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a node, counting the probe as a hit or a miss.
    pub fn probe(&mut self, key: &StateKey) -> Option<NodeId> {
        match self.entries.get(key) {
            Some(&id) => {
                self.hits += 1;
                Some(id)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Look up a node without touching the statistics.
    pub fn get(&self, key: &StateKey) -> Option<NodeId> {
        self.entries.get(key).copied()
    }

    /// Register `id` under `key`. An existing entry is kept.
    pub fn insert(&mut self, key: StateKey, id: NodeId) -> NodeId {
        *self.entries.entry(key).or_insert(id)
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get statistics.
    pub fn stats(&self) -> TableStats {
        TableStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

/// Snapshot of transposition table usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl TableStats {
    /// Fraction of probes that found an existing node.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
