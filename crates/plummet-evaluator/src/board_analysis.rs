//! Board metrics shared by the scored features.
//!
//! [`BoardAnalysis`] scans every column once, from the top row downward, and records
//! what the features need:
//!
//! - **Column top**: row index of the topmost occupied cell, `None` for an empty column
//! - **Holes**: empty cells below the topmost occupied cell of their column
//! - **Full rows**: rows in which every column is occupied
//!
//! The analysis never mutates the board; full rows are counted, not cleared.

use plummet_engine::{Board, COLS, ROWS};

/// Board coordinates are tiny, so they always fit in `u32`.
#[expect(clippy::cast_possible_truncation)]
const fn coord(n: usize) -> u32 {
    n as u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardAnalysis {
    column_tops: [Option<usize>; COLS],
    num_holes: u32,
    num_full_rows: u32,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let mut column_tops = [None; COLS];
        let mut num_holes = 0;
        for (column, column_top) in column_tops.iter_mut().enumerate() {
            let mut seen_block = false;
            for row in (0..ROWS).rev() {
                if board.is_occupied(row, column) {
                    if !seen_block {
                        *column_top = Some(row);
                        seen_block = true;
                    }
                } else if seen_block {
                    num_holes += 1;
                }
            }
        }
        let num_full_rows = (0..ROWS).filter(|&row| board.is_row_full(row)).count();

        Self {
            column_tops,
            num_holes,
            num_full_rows: coord(num_full_rows),
        }
    }

    /// Returns the row index of the topmost occupied cell in `column`.
    #[must_use]
    pub fn column_top(&self, column: usize) -> Option<usize> {
        self.column_tops[column]
    }

    #[must_use]
    pub fn column_tops(&self) -> &[Option<usize>; COLS] {
        &self.column_tops
    }

    #[must_use]
    pub fn num_holes(&self) -> u32 {
        self.num_holes
    }

    #[must_use]
    pub fn num_full_rows(&self) -> u32 {
        self.num_full_rows
    }

    /// Sum of the column top row indices; empty columns contribute 0.
    #[must_use]
    pub fn aggregate_height(&self) -> u32 {
        self.column_tops
            .iter()
            .map(|top| coord(top.unwrap_or(0)))
            .sum()
    }

    /// Sum of the absolute top differences of adjacent columns.
    ///
    /// An empty column's top counts as row -1.
    #[must_use]
    pub fn bumpiness(&self) -> u32 {
        // Shifting every top up by one (empty becomes 0) leaves the differences intact
        let shifted = self.column_tops.map(|top| top.map_or(0, |row| row + 1));
        shifted
            .windows(2)
            .map(|pair| coord(pair[0].abs_diff(pair[1])))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let analysis = BoardAnalysis::from_board(&Board::EMPTY);
        assert_eq!(analysis.column_tops(), &[None; COLS]);
        assert_eq!(analysis.num_holes(), 0);
        assert_eq!(analysis.num_full_rows(), 0);
        assert_eq!(analysis.aggregate_height(), 0);
        assert_eq!(analysis.bumpiness(), 0);
    }

    #[test]
    fn test_single_covered_column() {
        let mut board = Board::EMPTY;
        board.set_cell(5, 0, 1);

        let analysis = BoardAnalysis::from_board(&board);
        assert_eq!(analysis.column_top(0), Some(5));
        assert_eq!(analysis.num_holes(), 5);
        assert_eq!(analysis.aggregate_height(), 5);
    }

    #[test]
    fn test_holes_count_all_empty_cells_below_top() {
        let mut board = Board::EMPTY;
        // Column 2: rows 0, 3 and 6 occupied, four empty cells under the top
        for row in [0, 3, 6] {
            board.set_cell(row, 2, 1);
        }
        // Column 7: solid stack, no holes
        for row in 0..4 {
            board.set_cell(row, 7, 1);
        }

        let analysis = BoardAnalysis::from_board(&board);
        assert_eq!(analysis.num_holes(), 4);
        assert_eq!(analysis.column_top(2), Some(6));
        assert_eq!(analysis.column_top(7), Some(3));
    }

    #[test]
    fn test_bumpiness_between_two_columns() {
        let mut board = Board::EMPTY;
        board.set_cell(3, 4, 1);
        board.set_cell(7, 5, 1);

        let analysis = BoardAnalysis::from_board(&board);
        // |(-1) - 3| + |3 - 7| + |7 - (-1)|
        assert_eq!(analysis.bumpiness(), 4 + 4 + 8);
    }

    #[test]
    fn test_full_rows_counted_not_cleared() {
        let mut board = Board::EMPTY;
        for row in 0..3 {
            for column in 0..COLS {
                board.set_cell(row, column, 1);
            }
        }

        let analysis = BoardAnalysis::from_board(&board);
        assert_eq!(analysis.num_full_rows(), 3);
        assert_eq!(analysis.aggregate_height(), 2 * 10);
        assert_eq!(analysis.bumpiness(), 0);
        assert_eq!(analysis.num_holes(), 0);
        assert!(board.is_row_full(0));
    }
}
