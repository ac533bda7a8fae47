use std::{fmt, ops::Range, str::FromStr};

use super::{COLS, ROWS, piece::PieceOrientation};

/// Contents of a single board cell.
///
/// `0` is empty. Any other value is occupied; the game stores the turn number the
/// cell was filled on, but nothing downstream depends on the value.
pub type Cell = u32;

/// Marker used for occupied cells read from text.
const PARSED_CELL: Cell = 1;

/// Occupancy grid of the board.
///
/// `Board` stores `ROWS × COLS` cells indexed by `[row][column]`, with row 0 at the
/// bottom. Its dimensions never change.
///
/// # Text Format
///
/// Boards render and parse top row first, one line per row: `.` is an empty cell and
/// any other visible character is an occupied one. When parsing, missing rows at the
/// top are treated as empty, and blank lines before the first row or after the last
/// are ignored.
///
/// ```
/// use plummet_engine::{Board, COLS};
///
/// let board: Board = "X.........\nXXXXXXXXXX".parse().unwrap();
/// assert!(board.is_row_full(0));
/// assert!(board.is_occupied(1, 0));
/// assert!(!board.is_occupied(1, COLS - 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [[Cell; COLS]; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const ROWS: usize = ROWS;
    pub const COLS: usize = COLS;

    pub const EMPTY: Self = Self {
        rows: [[0; COLS]; ROWS],
    };

    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.rows[row][column]
    }

    #[must_use]
    pub fn is_occupied(&self, row: usize, column: usize) -> bool {
        self.rows[row][column] != 0
    }

    pub fn set_cell(&mut self, row: usize, column: usize, value: Cell) {
        self.rows[row][column] = value;
    }

    /// Returns an iterator over the rows, bottom row first.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Cell; COLS]> + ExactSizeIterator {
        self.rows.iter()
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows[row].iter().all(|&cell| cell != 0)
    }

    /// Fills the cells of a piece resting on `landing_row` with its leftmost cell in
    /// `column`.
    ///
    /// The caller must have checked that the piece fits (see
    /// [`PieceOrientation::fits_at`]); cells above the board panic.
    pub fn fill_piece(
        &mut self,
        orientation: &PieceOrientation,
        column: usize,
        landing_row: usize,
        marker: Cell,
    ) {
        let spans = orientation.bottom().iter().zip(orientation.top());
        for (dx, (bottom, top)) in spans.enumerate() {
            for row in &mut self.rows[landing_row + bottom..landing_row + top] {
                row[column + dx] = marker;
            }
        }
    }

    /// Clears every full row within `rows` and returns how many were cleared.
    ///
    /// Rows are checked from the top of the range downward. Each cleared row is removed
    /// and everything above it shifts down by one, leaving an empty row at the top of
    /// the board.
    pub fn clear_full_rows(&mut self, rows: Range<usize>) -> usize {
        let mut count = 0;
        for row in rows.rev() {
            if !self.is_row_full(row) {
                continue;
            }
            self.rows.copy_within(row + 1.., row);
            self.rows[ROWS - 1] = [0; COLS];
            count += 1;
        }
        count
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().rev().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                f.write_str(if cell == 0 { "." } else { "#" })?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("board text contains no rows")]
    Empty,
    #[display("board text has {rows} rows, more than the board holds")]
    TooManyRows { rows: usize },
    #[display("board line {line} has {width} cells, expected {expected}")]
    WrongWidth {
        line: usize,
        width: usize,
        expected: usize,
    },
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines = s.lines().map(str::trim).collect::<Vec<_>>();
        let Some(first) = lines.iter().position(|line| !line.is_empty()) else {
            return Err(ParseBoardError::Empty);
        };
        let last = lines.iter().rposition(|line| !line.is_empty()).unwrap_or(first);
        let rows = &lines[first..=last];
        if rows.len() > ROWS {
            return Err(ParseBoardError::TooManyRows { rows: rows.len() });
        }

        let mut board = Board::EMPTY;
        for (i, line) in rows.iter().enumerate() {
            // Interior blank lines are rows of the wrong width
            let width = line.chars().count();
            if width != COLS {
                return Err(ParseBoardError::WrongWidth {
                    line: first + i + 1,
                    width,
                    expected: COLS,
                });
            }
            let row = rows.len() - 1 - i;
            for (column, c) in line.chars().enumerate() {
                if c != '.' {
                    board.rows[row][column] = PARSED_CELL;
                }
            }
        }
        Ok(board)
    }
}

/// Per-column tops of a board: for each column, the row index one above its highest
/// occupied cell (`0` for an empty column).
///
/// The game keeps these up to date incrementally. [`ColumnHeights::from_board`] derives
/// them with a full scan of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnHeights([usize; COLS]);

impl ColumnHeights {
    pub const ZERO: Self = Self([0; COLS]);

    #[must_use]
    pub const fn new(heights: [usize; COLS]) -> Self {
        Self(heights)
    }

    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let mut heights = [0; COLS];
        for (column, height) in heights.iter_mut().enumerate() {
            *height = (0..ROWS)
                .rev()
                .find(|&row| board.is_occupied(row, column))
                .map_or(0, |row| row + 1);
        }
        Self(heights)
    }

    #[must_use]
    pub const fn get(&self, column: usize) -> usize {
        self.0[column]
    }

    #[must_use]
    pub const fn as_array(&self) -> &[usize; COLS] {
        &self.0
    }

    #[must_use]
    pub fn max(&self) -> usize {
        self.0.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PieceKind, PieceTables};

    fn fill_row(board: &mut Board, row: usize) {
        for column in 0..COLS {
            board.set_cell(row, column, 1);
        }
    }

    #[test]
    fn test_empty_board() {
        let board = Board::EMPTY;
        assert!(board.rows().flatten().all(|&cell| cell == 0));
        assert_eq!(ColumnHeights::from_board(&board), ColumnHeights::ZERO);
    }

    #[test]
    fn test_fill_piece_t_down() {
        let mut board = Board::EMPTY;
        let t_down = PieceTables::STANDARD.orientation(PieceKind::T, 1);
        board.fill_piece(t_down, 2, 0, 7);

        assert!(board.is_occupied(0, 3));
        assert!(!board.is_occupied(0, 2));
        assert!(!board.is_occupied(0, 4));
        for column in 2..5 {
            assert_eq!(board.cell(1, column), 7);
        }
        assert_eq!(ColumnHeights::from_board(&board).as_array()[2..5], [2, 2, 2]);
    }

    #[test]
    fn test_clear_full_rows_shifts_down() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 0);
        board.set_cell(1, 4, 2);
        fill_row(&mut board, 2);
        board.set_cell(3, 0, 3);

        let cleared = board.clear_full_rows(0..4);
        assert_eq!(cleared, 2);
        assert_eq!(board.cell(0, 4), 2);
        assert_eq!(board.cell(1, 0), 3);
        assert!(!board.is_row_full(0));
        assert!(board.rows().skip(2).flatten().all(|&cell| cell == 0));
    }

    #[test]
    fn test_clear_full_rows_respects_range() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 0);
        fill_row(&mut board, 5);

        assert_eq!(board.clear_full_rows(3..6), 1);
        assert!(board.is_row_full(0));
        assert!(!board.is_row_full(5));
    }

    #[test]
    fn test_clear_partial_row_is_noop() {
        let mut board = Board::EMPTY;
        for column in 0..COLS - 1 {
            board.set_cell(0, column, 1);
        }
        let before = board.clone();
        assert_eq!(board.clear_full_rows(0..ROWS), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_column_heights_from_board() {
        let mut board = Board::EMPTY;
        board.set_cell(5, 0, 1);
        board.set_cell(0, 9, 1);
        board.set_cell(2, 9, 1);

        let heights = ColumnHeights::from_board(&board);
        assert_eq!(heights.get(0), 6);
        assert_eq!(heights.get(9), 3);
        assert_eq!(heights.get(4), 0);
        assert_eq!(heights.max(), 6);
    }

    #[test]
    fn test_parse_pads_missing_rows() {
        let board: Board = "..........\n#........#\n".parse().unwrap();
        assert!(board.is_occupied(0, 0));
        assert!(board.is_occupied(0, 9));
        assert!(!board.is_occupied(1, 0));
        assert_eq!(board.rows().flatten().filter(|&&c| c != 0).count(), 2);
    }

    #[test]
    fn test_parse_ignores_surrounding_blank_lines() {
        let board: Board = "\n\n  X.........\n..........\n\n".parse().unwrap();
        assert!(board.is_occupied(1, 0));
        assert!(!board.is_occupied(0, 0));
    }

    #[test]
    fn test_parse_rejects_interior_blank_line() {
        let text = "XXXXXXXXXX\n\nX.........";
        assert_eq!(
            text.parse::<Board>(),
            Err(ParseBoardError::WrongWidth {
                line: 2,
                width: 0,
                expected: COLS,
            })
        );
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 0);
        board.set_cell(3, 6, 9);

        let text = board.to_string();
        assert_eq!(text.lines().count(), ROWS);
        let parsed: Board = text.parse().unwrap();
        assert_eq!(
            ColumnHeights::from_board(&parsed),
            ColumnHeights::from_board(&board)
        );
        assert!(parsed.is_row_full(0));
        assert!(parsed.is_occupied(3, 6));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Board>(), Err(ParseBoardError::Empty));
        assert_eq!(
            "#####".parse::<Board>(),
            Err(ParseBoardError::WrongWidth {
                line: 1,
                width: 5,
                expected: COLS,
            })
        );
        let too_tall = "..........\n".repeat(ROWS + 1);
        assert_eq!(
            too_tall.parse::<Board>(),
            Err(ParseBoardError::TooManyRows { rows: ROWS + 1 })
        );
    }
}
