use crate::{GameOutcome, Mark, Move};

/// Errors returned by the [`Game`](crate::game::Game) controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("move {0} is outside the board, expected 0..=8")]
    OutOfRange(Move),

    #[error("cell {0} is already occupied")]
    CellOccupied(Move),

    #[error("it is {expected}'s turn")]
    NotYourTurn { expected: Mark },

    #[error("the game is over ({0})")]
    GameOver(GameOutcome),

    #[error("no legal move is left on the board")]
    NoLegalMove,
}

/// Errors returned when parsing a [`Board`](crate::board::Board) from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("expected 9 cells, got {0}")]
    WrongCellCount(usize),

    #[error("invalid cell character: '{0}'")]
    InvalidCell(char),
}
