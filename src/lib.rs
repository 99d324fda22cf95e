//! A small tic-tac-toe engine with a deliberately beatable opponent.
//!
//! The crate is split into a pure board evaluator and a randomized opponent policy.
//! The opponent always takes an immediate win, but blocks the human's winning move only
//! one time in twenty and otherwise drifts towards the weaker edge cells.
//! A headless [`game::Game`] controller ties both together for callers that want turn
//! handling out of the box.
//!
//! # Example
//!
//! ```rust
//! use medium_bot::board::Board;
//! use medium_bot::policy::select_opponent_move;
//! use medium_bot::random::SeededRandomGenerator;
//!
//! // The opponent (O) can complete the top row
//! let board: Board = "OO.XX....".parse().unwrap();
//!
//! let mut rng = SeededRandomGenerator::default();
//! let opponent_move = select_opponent_move(&board, &mut rng);
//!
//! assert_eq!(opponent_move, Some(2));
//! ```

/// Contains the `Board` struct and the pure win, draw and legal move checks.
pub mod board;
/// Contains the error types returned at the crate boundary.
pub mod error;
/// Contains the headless `Game` controller that alternates human and opponent turns.
pub mod game;
/// Contains the opponent's tiered, randomized move selection.
pub mod policy;
/// Contains traits and implementations for random number generation.
pub mod random;

use std::fmt;

/// A board position, `0..=8` in row-major order.
pub type Move = u8;

/// One of the two symbols placed on the board.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Mark {
    /// The human player's mark. Moves first.
    X,
    /// The automated opponent's mark.
    O,
}

impl Mark {
    /// The mark played by the human.
    pub const HUMAN: Mark = Mark::X;
    /// The mark played by the automated opponent.
    pub const OPPONENT: Mark = Mark::O;

    /// Returns the other player's mark.
    pub const fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub(crate) const fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Represents the possible outcomes of a game.
///
/// The outcome is always derived from a board and never stored alongside it.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GameOutcome {
    /// The game is still ongoing.
    InProgress,
    /// The given mark completed a line.
    Win(Mark),
    /// The board is full and nobody completed a line.
    Draw,
}

impl GameOutcome {
    /// Returns `true` once the game has ended, either by a win or a draw.
    pub fn is_finished(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::InProgress => write!(f, "in progress"),
            GameOutcome::Win(mark) => write!(f, "{mark} wins"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}
