//! The "medium bot": a deliberately beatable opponent.
//!
//! Move selection walks an ordered list of tiers and stops at the first one that fires:
//!
//! 1. [`Tier::Win`]: take an immediate win. Always checked, never random.
//! 2. [`Tier::Block`]: with probability [`BLOCK_PROBABILITY`], block the human's
//!    immediate win. This is the opponent's central weakness.
//! 3. With probability [`AVOID_CENTER_PROBABILITY`], restrict the choice to non-center
//!    cells and continue with 4. Otherwise skip to 5.
//! 4. [`Tier::Edge`]: with probability [`EDGE_PROBABILITY`], pick a random edge cell.
//!    Otherwise [`Tier::NonCenter`]: pick any random non-center cell.
//! 5. [`Tier::Fallback`]: pick any random available cell.
//!
//! Every probabilistic step takes a fresh draw from the supplied [`RandomGenerator`].

use crate::board::{Board, CENTER, EDGES};
use crate::random::{RandomGenerator, StandardRandomGenerator};
use crate::{Mark, Move};
use tracing::debug;

/// Chance that the opponent blocks the human's immediate winning move.
pub const BLOCK_PROBABILITY: f64 = 0.05;
/// Chance that the opponent stays away from the center when other cells are free.
pub const AVOID_CENTER_PROBABILITY: f64 = 0.8;
/// Chance that an off-center pick is narrowed further to an edge cell.
pub const EDGE_PROBABILITY: f64 = 0.7;

/// The tier of the decision procedure that produced a move.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Tier {
    /// The move completes a line for the opponent.
    Win,
    /// The move blocks a line the human would have completed.
    Block,
    /// A random edge cell, picked while avoiding the center.
    Edge,
    /// A random non-center cell, picked while avoiding the center.
    NonCenter,
    /// A random cell from all available moves.
    Fallback,
}

/// A selected move together with the tier that selected it.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Decision {
    pub chosen_move: Move,
    pub tier: Tier,
}

/// Anything that can pick the next move for a side.
pub trait MovePolicy {
    /// Returns the next move for the board, or `None` if no legal move exists.
    fn select_move(&mut self, board: &Board) -> Option<Move>;
}

/// Runs the tiered decision procedure for the opponent ([`Mark::OPPONENT`]).
///
/// Returns `None` only when the board has no empty cell. Callers should not ask for a
/// move once the board is terminal.
pub fn decide<K: RandomGenerator>(board: &Board, random: &mut K) -> Option<Decision> {
    let me = Mark::OPPONENT;
    let them = me.other();

    let moves = board.available_moves();
    if moves.is_empty() {
        debug!("no legal move left");
        return None;
    }

    let decision = if let Some(m) = first_winning_move(board, &moves, me) {
        Decision {
            chosen_move: m,
            tier: Tier::Win,
        }
    } else if let Some(m) = random
        .roll(BLOCK_PROBABILITY)
        .then(|| first_winning_move(board, &moves, them))
        .flatten()
    {
        Decision {
            chosen_move: m,
            tier: Tier::Block,
        }
    } else {
        pick_weak_move(&moves, random)?
    };

    debug!(
        chosen_move = decision.chosen_move,
        tier = ?decision.tier,
        candidates = moves.len(),
        "opponent decided"
    );
    Some(decision)
}

/// Selects the opponent's next move. See [`decide`].
pub fn select_opponent_move<K: RandomGenerator>(board: &Board, random: &mut K) -> Option<Move> {
    decide(board, random).map(|d| d.chosen_move)
}

/// Returns the first move, in ascending order, that completes a line for `mark`.
fn first_winning_move(board: &Board, moves: &[Move], mark: Mark) -> Option<Move> {
    moves.iter().copied().find(|&m| board.would_win(m, mark))
}

/// Tiers 3 to 5: center avoidance, edge preference and the uniform fallback.
fn pick_weak_move<K: RandomGenerator>(moves: &[Move], random: &mut K) -> Option<Decision> {
    let non_center: Vec<Move> = moves.iter().copied().filter(|&m| m != CENTER).collect();

    if !non_center.is_empty() && random.roll(AVOID_CENTER_PROBABILITY) {
        let edges: Vec<Move> = non_center
            .iter()
            .copied()
            .filter(|m| EDGES.contains(m))
            .collect();

        if !edges.is_empty() && random.roll(EDGE_PROBABILITY) {
            return random.get_random_from_slice(&edges).map(|&m| Decision {
                chosen_move: m,
                tier: Tier::Edge,
            });
        }

        return random.get_random_from_slice(&non_center).map(|&m| Decision {
            chosen_move: m,
            tier: Tier::NonCenter,
        });
    }

    random.get_random_from_slice(moves).map(|&m| Decision {
        chosen_move: m,
        tier: Tier::Fallback,
    })
}

/// The medium-difficulty opponent with its own random source.
#[derive(Debug, Default, Clone)]
pub struct MediumBot<K: RandomGenerator = StandardRandomGenerator> {
    random: K,
}

impl<K: RandomGenerator> MediumBot<K> {
    pub fn new(random: K) -> Self {
        Self { random }
    }

    /// Runs the decision procedure and reports which tier fired.
    pub fn decide(&mut self, board: &Board) -> Option<Decision> {
        decide(board, &mut self.random)
    }
}

impl<K: RandomGenerator> MovePolicy for MediumBot<K> {
    fn select_move(&mut self, board: &Board) -> Option<Move> {
        select_opponent_move(board, &mut self.random)
    }
}
