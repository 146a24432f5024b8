//! UCB1 scoring.
//!
//! `wins / n + sqrt(C * ln(N) / n)` where `n` is the child's visit count and
//! `N` the visit count of the node it is being selected from. The search root
//! is never scored.

use crate::node::Score;

/// UCB1 value of a child.
///
/// Proven losses score negative infinity and unvisited children positive
/// infinity, in that order of precedence.
#[inline]
pub fn ucb1(score: Score, visits: u32, parent_visits: u32, explore_param: f64) -> f64 {
    let wins = match score {
        Score::ProvenLoss => return f64::NEG_INFINITY,
        Score::Wins(wins) => wins,
    };
    if visits == 0 {
        return f64::INFINITY;
    }

    let n = f64::from(visits);
    let ln_parent = f64::from(parent_visits.max(1)).ln();
    wins / n + (explore_param * ln_parent / n).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unvisited_is_infinite() {
        assert_eq!(ucb1(Score::Wins(0.0), 0, 10, 2.0), f64::INFINITY);
    }

    #[test]
    fn test_proven_loss_checked_first() {
        assert_eq!(ucb1(Score::ProvenLoss, 0, 10, 2.0), f64::NEG_INFINITY);
        assert_eq!(ucb1(Score::ProvenLoss, 5, 10, 2.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_formula() {
        // 3/4 + sqrt(2 * ln(16) / 4)
        let expected = 0.75 + (2.0 * 16f64.ln() / 4.0).sqrt();
        let score = ucb1(Score::Wins(3.0), 4, 16, 2.0);
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_single_parent_visit_has_no_exploration_bonus() {
        let score = ucb1(Score::Wins(0.5), 1, 1, 2.0);
        assert!((score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_larger_constant_explores_more() {
        let low = ucb1(Score::Wins(1.0), 2, 10, 0.5);
        let high = ucb1(Score::Wins(1.0), 2, 10, 4.0);
        assert!(high > low);
    }
}
