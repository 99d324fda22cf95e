use crate::error::{BoardParseError, GameError};
use crate::{GameOutcome, Mark, Move};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Index of the center cell.
pub const CENTER: Move = 4;

/// Indices of the four edge (non-corner, non-center) cells.
pub const EDGES: [Move; 4] = [1, 3, 5, 7];

/// Every line that wins the game: rows, then columns, then diagonals.
///
/// The order doubles as the tie-break when a board holds more than one completed line.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A snapshot of the 3x3 grid.
///
/// The board is represented by a 9-element array in row-major order, where each element
/// is either empty (`None`) or holds a [`Mark`]. A move is a `u8` from 0 to 8.
///
/// Evaluation never mutates the board: hypothetical placements go through
/// [`Board::with_mark`], which returns a copy.
#[derive(Debug, Default, PartialEq, Eq, Hash, Copy, Clone)]
pub struct Board {
    field: [Option<Mark>; CELL_COUNT],
}

impl Board {
    /// Creates an empty board.
    pub const fn new() -> Self {
        Self {
            field: [None; CELL_COUNT],
        }
    }

    /// Creates a board from raw cells.
    pub const fn from_cells(field: [Option<Mark>; CELL_COUNT]) -> Self {
        Self { field }
    }

    /// Returns the raw cells in row-major order.
    pub fn cells(&self) -> &[Option<Mark>; CELL_COUNT] {
        &self.field
    }

    /// Returns the mark at `index`, or `None` if the cell is empty or off the board.
    pub fn get(&self, index: Move) -> Option<Mark> {
        self.field.get(index as usize).copied().flatten()
    }

    /// Returns the mark of the first completed line, or `None` if no line is complete.
    #[instrument(level = "trace", ret)]
    pub fn winner(&self) -> Option<Mark> {
        for [a, b, c] in LINES {
            let cell = self.field[a];
            if cell.is_some() && cell == self.field[b] && cell == self.field[c] {
                return cell;
            }
        }

        None
    }

    /// Returns the indices of all empty cells in ascending order.
    pub fn available_moves(&self) -> Vec<Move> {
        self.field
            .iter()
            .enumerate()
            .filter(|(_, x)| x.is_none())
            .map(|(i, _)| i as Move)
            .collect()
    }

    /// Returns `true` if the board has no empty cell left.
    pub fn is_full(&self) -> bool {
        self.field.iter().all(|x| x.is_some())
    }

    /// Returns `true` if a line is complete or no empty cell is left.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Derives the current outcome of the game from the board.
    pub fn outcome(&self) -> GameOutcome {
        match self.winner() {
            Some(mark) => GameOutcome::Win(mark),
            None if self.is_full() => GameOutcome::Draw,
            None => GameOutcome::InProgress,
        }
    }

    /// Returns a copy of the board with `mark` placed at `index`.
    ///
    /// The caller is responsible for `index` being an available move.
    pub fn with_mark(&self, index: Move, mark: Mark) -> Board {
        let mut copy = *self;
        copy.field[index as usize] = Some(mark);
        copy
    }

    /// Returns `true` if placing `mark` at `index` completes a line for `mark`.
    pub fn would_win(&self, index: Move, mark: Mark) -> bool {
        self.with_mark(index, mark).winner() == Some(mark)
    }

    /// Returns the number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.field.iter().filter(|x| **x == Some(mark)).count()
    }

    /// Places `mark` at `index` in place. Cells only ever go from empty to marked.
    pub(crate) fn place(&mut self, index: Move, mark: Mark) -> Result<(), GameError> {
        let cell = self
            .field
            .get_mut(index as usize)
            .ok_or(GameError::OutOfRange(index))?;
        if cell.is_some() {
            return Err(GameError::CellOccupied(index));
        }

        *cell = Some(mark);
        Ok(())
    }
}

impl fmt::Display for Board {
    /// Renders the board as three rows of `X`, `O` and `.`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.field.chunks(3).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let symbol = cell.map_or('.', Mark::symbol);
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses 9 cells from `X`, `O` and one of `.`, `_`, `-` for empty.
    /// Whitespace and `|` separators are skipped, so the `Display` form parses back.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .map(|c| match c {
                'X' | 'x' => Ok(Some(Mark::X)),
                'O' | 'o' => Ok(Some(Mark::O)),
                '.' | '_' | '-' => Ok(None),
                other => Err(BoardParseError::InvalidCell(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let field: [Option<Mark>; CELL_COUNT] = cells
            .try_into()
            .map_err(|v: Vec<_>| BoardParseError::WrongCellCount(v.len()))?;
        Ok(Board::from_cells(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    /// Every one of the 3^9 cell assignments, legal game position or not.
    fn all_boards() -> impl Iterator<Item = Board> {
        (0..3u32.pow(9)).map(|mut code| {
            let mut field = [None; CELL_COUNT];
            for cell in field.iter_mut() {
                *cell = match code % 3 {
                    0 => None,
                    1 => Some(Mark::X),
                    _ => Some(Mark::O),
                };
                code /= 3;
            }
            Board::from_cells(field)
        })
    }

    #[test]
    fn empty_board_has_no_winner() {
        let board = Board::new();
        assert_eq!(board.winner(), None);
        assert_eq!(board.outcome(), GameOutcome::InProgress);
        assert!(!board.is_terminal());
    }

    #[test]
    fn every_line_wins_for_both_marks() {
        for mark in [Mark::X, Mark::O] {
            for line in LINES {
                // arrange
                let mut field = [None; CELL_COUNT];
                for i in line {
                    field[i] = Some(mark);
                }
                let board = Board::from_cells(field);

                // act
                let winner = board.winner();

                // assert
                assert_eq!(winner, Some(mark), "line {line:?}");
                assert_eq!(board.outcome(), GameOutcome::Win(mark));
                assert!(board.is_terminal());
            }
        }
    }

    #[test]
    fn winner_matches_row_column_and_diagonal_scan() {
        for board in all_boards() {
            let cells = board.cells();
            let same = |a: usize, b: usize, c: usize| {
                cells[a].is_some() && cells[a] == cells[b] && cells[a] == cells[c]
            };
            let any_complete = (0..3).any(|r| same(3 * r, 3 * r + 1, 3 * r + 2))
                || (0..3).any(|c| same(c, c + 3, c + 6))
                || same(0, 4, 8)
                || same(2, 4, 6);

            assert_eq!(board.winner().is_some(), any_complete, "\n{board}");
        }
    }

    #[test]
    fn winner_uses_line_order_as_tie_break() {
        // X owns the top row, O the bottom row
        let board = board("XXX...OOO");
        assert_eq!(board.winner(), Some(Mark::X));

        // O owns column 0, X the right diagonal; columns come before diagonals
        let board = Board::from_cells([
            Some(Mark::O),
            None,
            Some(Mark::X),
            Some(Mark::O),
            Some(Mark::X),
            None,
            Some(Mark::O),
            None,
            None,
        ]);
        assert_eq!(board.winner(), Some(Mark::O));
    }

    #[test]
    fn available_moves_are_empty_cells_ascending() {
        for board in all_boards() {
            let moves = board.available_moves();
            let filled = board.cells().iter().filter(|x| x.is_some()).count();

            assert_eq!(moves.len(), CELL_COUNT - filled);
            assert!(moves.windows(2).all(|w| w[0] < w[1]));
            assert!(moves.iter().all(|&m| board.get(m).is_none()));
        }
    }

    #[test]
    fn available_moves_on_partial_board() {
        let board = board("X.O..XO..");
        assert_eq!(board.available_moves(), vec![1, 3, 4, 7, 8]);
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        // arrange
        let board = board("XOX OXO OXO");

        // act & assert
        assert_eq!(board.winner(), None);
        assert!(board.available_moves().is_empty());
        assert!(board.is_terminal());
        assert_eq!(board.outcome(), GameOutcome::Draw);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let board = board("XO.X.O...");
        let first = (board.winner(), board.available_moves());
        for _ in 0..10 {
            assert_eq!((board.winner(), board.available_moves()), first);
        }
    }

    #[test]
    fn would_win_does_not_touch_the_board() {
        // arrange
        let before = board("XX..O....");
        let snapshot = before;

        // act
        let wins = before.would_win(2, Mark::X);
        let loses = before.would_win(3, Mark::X);

        // assert
        assert!(wins);
        assert!(!loses);
        assert_eq!(before, snapshot);
    }

    #[test]
    fn place_only_fills_empty_cells() {
        let mut board = Board::new();
        assert_eq!(board.place(4, Mark::X), Ok(()));
        assert_eq!(board.get(4), Some(Mark::X));
        assert_eq!(board.place(4, Mark::O), Err(GameError::CellOccupied(4)));
        assert_eq!(board.place(9, Mark::O), Err(GameError::OutOfRange(9)));
        assert_eq!(board.get(4), Some(Mark::X));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let board = board("XO.|.X.|..O");
        assert_eq!(board.to_string(), "XO.\n.X.\n..O");
        assert_eq!(board.to_string().parse::<Board>(), Ok(board));
    }

    #[test]
    fn from_str_rejects_bad_input() {
        assert_eq!(
            "XO".parse::<Board>(),
            Err(BoardParseError::WrongCellCount(2))
        );
        assert_eq!(
            "XO.......Z".parse::<Board>(),
            Err(BoardParseError::InvalidCell('Z'))
        );
    }
}
