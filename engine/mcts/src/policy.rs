//! Move recommendation policies.
//!
//! A policy turns the statistics gathered under a node into a single move.
//! The statistics policies only answer once every move has been tried at
//! least once; the random policy ignores statistics entirely.

use std::fmt;
use std::str::FromStr;

use engine_core::{Game, Outcome};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::{MctsNode, NodeId};
use crate::search::SearchError;
use crate::tree::MctsTree;

/// How to pick a move from search statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Child with the most visits, proven losses last
    #[default]
    MostVisited,
    /// Child with the best wins / visits ratio
    HighestWinRate,
    /// Any legal move, uniformly at random
    UniformRandom,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::MostVisited => "most_visited",
            Policy::HighestWinRate => "highest_win_rate",
            Policy::UniformRandom => "uniform_random",
        };
        f.write_str(name)
    }
}

/// Error returned when a policy name cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown policy '{0}', expected most_visited, highest_win_rate or uniform_random")]
pub struct ParsePolicyError(pub String);

impl FromStr for Policy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "most_visited" | "visits" => Ok(Policy::MostVisited),
            "highest_win_rate" | "win_rate" => Ok(Policy::HighestWinRate),
            "uniform_random" | "random" => Ok(Policy::UniformRandom),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Pick a move at `node_id` according to `policy`.
pub fn select_move<G: Game, R: Rng + ?Sized>(
    tree: &MctsTree<G>,
    node_id: NodeId,
    policy: Policy,
    rng: &mut R,
) -> Result<G::Move, SearchError> {
    let node = tree.get(node_id);
    if node.children.is_empty() {
        return Err(SearchError::NoLegalMoves);
    }

    let key: fn(&MctsNode<G>) -> f64 = match policy {
        Policy::UniformRandom => {
            return node
                .children
                .choose(rng)
                .map(|(mv, _)| *mv)
                .ok_or(SearchError::NoLegalMoves);
        }
        Policy::MostVisited => |child: &MctsNode<G>| {
            if child.score.is_proven_loss() {
                f64::NEG_INFINITY
            } else {
                f64::from(child.visits)
            }
        },
        Policy::HighestWinRate => MctsNode::win_rate,
    };

    let mut tried = Vec::with_capacity(node.children.len());
    for &(mv, child) in &node.children {
        let child = tree.get(child.ok_or(SearchError::InsufficientSearch)?);
        if child.visits == 0 {
            return Err(SearchError::InsufficientSearch);
        }
        tried.push((mv, child));
    }

    // A move that wins on the spot beats any statistic
    let winning = Outcome::WinFor(node.mover);
    if let Some((mv, _)) = tried.iter().find(|(_, child)| child.outcome == winning) {
        return Ok(*mv);
    }

    // First maximum wins, so a node whose children are all proven losses
    // still yields a move
    let (first, rest) = tried.split_first().ok_or(SearchError::NoLegalMoves)?;
    let (best, _) = rest
        .iter()
        .fold((first.0, key(first.1)), |(best, best_key), &(mv, child)| {
            let k = key(child);
            if k > best_key {
                (mv, k)
            } else {
                (best, best_key)
            }
        });
    Ok(best)
}
