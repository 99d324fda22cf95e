use crate::board::Board;
use crate::error::GameError;
use crate::policy::{Decision, decide};
use crate::random::{RandomGenerator, StandardRandomGenerator};
use crate::{GameOutcome, Mark, Move};
use tracing::{debug, info, instrument};

/// Whose turn it is, or how the game ended.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Phase {
    /// Waiting for the human to place an `X`.
    HumanToMove,
    /// Waiting for the opponent to place an `O`.
    OpponentToMove,
    /// The game is over with the given outcome.
    Finished(GameOutcome),
}

/// What happened during one call to [`Game::play_turn`].
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct TurnReport {
    pub human_move: Move,
    /// The opponent's reply, absent when the human's move ended the game.
    pub opponent_move: Option<Decision>,
    pub phase: Phase,
}

/// A single session of the game: the human plays `X` against the medium bot playing `O`.
///
/// The controller owns the board and hands the policy a read-only snapshot on each of the
/// opponent's turns. The opponent can move at most once per human move: asking it to move
/// outside of [`Phase::OpponentToMove`] is an error.
pub struct Game<K: RandomGenerator> {
    board: Board,
    phase: Phase,
    random: K,
}

impl<K: RandomGenerator> Default for Game<K> {
    fn default() -> Self {
        GameBuilder::new().build()
    }
}

/// A builder for creating instances of `Game`.
pub struct GameBuilder<K: RandomGenerator> {
    board: Board,
    random_generator: K,
}

impl<K: RandomGenerator> GameBuilder<K> {
    /// Creates a new builder for a game starting on an empty board.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            random_generator: K::default(),
        }
    }

    /// Sets the random number generator used by the opponent.
    pub fn with_random_generator(mut self, rg: K) -> Self {
        self.random_generator = rg;
        self
    }

    /// Starts the game from an existing position instead of an empty board.
    ///
    /// `X` always moves first, so it is the opponent's turn whenever `X` has more marks.
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Builds the `Game` instance with the configured parameters.
    pub fn build(self) -> Game<K> {
        Game {
            board: self.board,
            phase: Game::<K>::phase_for(&self.board),
            random: self.random_generator,
        }
    }
}

impl<K: RandomGenerator> Default for GameBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: RandomGenerator> Game<K> {
    /// Returns a new builder for `Game`.
    pub fn builder() -> GameBuilder<K> {
        GameBuilder::new()
    }

    /// Returns the current board snapshot.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns whose turn it is, or how the game ended.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the outcome derived from the current board.
    pub fn outcome(&self) -> GameOutcome {
        self.board.outcome()
    }

    /// Returns the mark expected to move next, or `None` once the game is over.
    pub fn current_mark(&self) -> Option<Mark> {
        match self.phase {
            Phase::HumanToMove => Some(Mark::HUMAN),
            Phase::OpponentToMove => Some(Mark::OPPONENT),
            Phase::Finished(_) => None,
        }
    }

    /// Places the human's `X` at `index`.
    ///
    /// # Errors
    ///
    /// Fails if the game is over, it is the opponent's turn, or the cell is off the board
    /// or already taken. The board is left untouched on error.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn play_human(&mut self, index: Move) -> Result<Phase, GameError> {
        self.expect_turn(Mark::HUMAN)?;
        self.apply(index, Mark::HUMAN)
    }

    /// Lets the opponent pick and place its `O`.
    ///
    /// # Errors
    ///
    /// Fails if the game is over or it is the human's turn. Calling this twice for the same
    /// human move therefore fails the second time.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn play_opponent(&mut self) -> Result<Decision, GameError> {
        self.expect_turn(Mark::OPPONENT)?;
        let decision = decide(&self.board, &mut self.random).ok_or(GameError::NoLegalMove)?;
        self.apply(decision.chosen_move, Mark::OPPONENT)?;
        Ok(decision)
    }

    /// Plays the human's move and, if the game goes on, the opponent's reply.
    pub fn play_turn(&mut self, index: Move) -> Result<TurnReport, GameError> {
        let mut phase = self.play_human(index)?;
        let mut opponent_move = None;
        if phase == Phase::OpponentToMove {
            opponent_move = Some(self.play_opponent()?);
            phase = self.phase;
        }

        Ok(TurnReport {
            human_move: index,
            opponent_move,
            phase,
        })
    }

    /// Clears the board for a replay. The random generator keeps its state.
    pub fn reset(&mut self) {
        debug!("game reset");
        self.board = Board::new();
        self.phase = Phase::HumanToMove;
    }

    fn expect_turn(&self, mark: Mark) -> Result<(), GameError> {
        match (self.phase, self.current_mark()) {
            (Phase::Finished(outcome), _) => Err(GameError::GameOver(outcome)),
            (_, Some(expected)) if expected != mark => Err(GameError::NotYourTurn { expected }),
            _ => Ok(()),
        }
    }

    fn apply(&mut self, index: Move, mark: Mark) -> Result<Phase, GameError> {
        self.board.place(index, mark)?;
        self.phase = Self::phase_for(&self.board);
        debug!(index, %mark, "move applied");

        if let Phase::Finished(outcome) = self.phase {
            info!(%outcome, "game finished");
        }
        Ok(self.phase)
    }

    fn phase_for(board: &Board) -> Phase {
        let outcome = board.outcome();
        if outcome.is_finished() {
            Phase::Finished(outcome)
        } else if board.count(Mark::HUMAN) > board.count(Mark::OPPONENT) {
            Phase::OpponentToMove
        } else {
            Phase::HumanToMove
        }
    }
}

impl Game<StandardRandomGenerator> {
    /// Creates a game on an empty board with an entropy-seeded opponent.
    pub fn new() -> Self {
        GameBuilder::new().build()
    }
}
