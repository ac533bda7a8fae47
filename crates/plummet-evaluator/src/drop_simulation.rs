//! Hypothetical drops of the current piece.
//!
//! [`simulate_drop`] applies gravity the same way the game does: the piece is rigid and
//! rests on the column that constrains it highest. The result is a private copy of the
//! board with the piece filled in. Full rows are left in place so that the `lines`
//! feature can see them.

use plummet_engine::{Board, Placement, TurnSnapshot};

/// Board after dropping the current piece at one placement, before any row clearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedField {
    placement: Placement,
    landing_row: usize,
    board: Board,
}

impl SimulatedField {
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Row the piece's bounding box rests on.
    #[must_use]
    pub fn landing_row(&self) -> usize {
        self.landing_row
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }
}

/// Drops the snapshot's piece at `placement` on a copy of its board.
///
/// Returns `None` if the piece would reach the top row, which would end the game. The
/// snapshot's board is never modified.
///
/// `placement` must be a legal move for the snapshot's piece.
///
/// # Example
///
/// ```
/// use plummet_engine::{Board, ColumnHeights, PieceKind, PieceTables, Placement, TurnSnapshot};
/// use plummet_evaluator::drop_simulation::simulate_drop;
///
/// let board = Board::EMPTY;
/// let heights = ColumnHeights::ZERO;
/// let snapshot = TurnSnapshot::new(&board, &heights, &PieceTables::STANDARD, PieceKind::O, 0);
///
/// let field = simulate_drop(&snapshot, Placement::new(0, 4)).unwrap();
/// assert_eq!(field.landing_row(), 0);
/// assert!(field.board().is_occupied(1, 5));
/// assert_eq!(board, Board::EMPTY);
/// ```
#[must_use]
pub fn simulate_drop(snapshot: &TurnSnapshot<'_>, placement: Placement) -> Option<SimulatedField> {
    let orientation = snapshot.orientation(placement);
    let column = placement.column();
    let landing_row = orientation.landing_row(snapshot.column_heights(), column);
    if !orientation.fits_at(landing_row) {
        return None;
    }

    let mut board = snapshot.board().clone();
    board.fill_piece(orientation, column, landing_row, snapshot.fill_marker());
    Some(SimulatedField {
        placement,
        landing_row,
        board,
    })
}

#[cfg(test)]
mod tests {
    use plummet_engine::{COLS, ColumnHeights, PieceKind, PieceTables, ROWS};

    use super::*;

    fn snapshot<'a>(
        board: &'a Board,
        heights: &'a ColumnHeights,
        piece: PieceKind,
    ) -> TurnSnapshot<'a> {
        TurnSnapshot::new(board, heights, &PieceTables::STANDARD, piece, 4)
    }

    #[test]
    fn test_drop_on_empty_board() {
        let board = Board::EMPTY;
        let heights = ColumnHeights::ZERO;
        let snapshot = snapshot(&board, &heights, PieceKind::I);

        let field = simulate_drop(&snapshot, Placement::new(1, 6)).unwrap();
        assert_eq!(field.placement(), Placement::new(1, 6));
        assert_eq!(field.landing_row(), 0);
        for column in 6..COLS {
            assert_eq!(field.board().cell(0, column), 5);
        }
        assert!(!field.board().is_occupied(0, 5));
        assert!(!field.board().is_occupied(1, 6));
    }

    #[test]
    fn test_piece_rests_on_highest_constraint() {
        let mut board = Board::EMPTY;
        for row in 0..3 {
            board.set_cell(row, 1, 1);
        }
        let heights = ColumnHeights::from_board(&board);
        let snapshot = snapshot(&board, &heights, PieceKind::O);

        let field = simulate_drop(&snapshot, Placement::new(0, 0)).unwrap();
        assert_eq!(field.landing_row(), 3);
        assert!(field.board().is_occupied(3, 0));
        assert!(field.board().is_occupied(4, 1));
        assert!(!field.board().is_occupied(0, 0));
    }

    #[test]
    fn test_full_rows_are_not_cleared() {
        let mut board = Board::EMPTY;
        for column in 0..COLS - 1 {
            board.set_cell(0, column, 1);
        }
        let heights = ColumnHeights::from_board(&board);
        let snapshot = snapshot(&board, &heights, PieceKind::I);

        let field = simulate_drop(&snapshot, Placement::new(0, COLS - 1)).unwrap();
        assert!(field.board().is_row_full(0));
        assert!(field.board().is_occupied(3, COLS - 1));
    }

    #[test]
    fn test_overflow_is_invalid() {
        let mut board = Board::EMPTY;
        for row in 0..17 {
            board.set_cell(row, 0, 1);
        }
        let heights = ColumnHeights::from_board(&board);
        let snapshot = snapshot(&board, &heights, PieceKind::I);

        // Vertical I would occupy rows 17-20; 17 + 4 reaches ROWS
        assert_eq!(17 + 4, ROWS);
        assert!(simulate_drop(&snapshot, Placement::new(0, 0)).is_none());
        // Elsewhere it still fits
        assert!(simulate_drop(&snapshot, Placement::new(0, 1)).is_some());
    }

    #[test]
    fn test_source_board_untouched() {
        let board = Board::EMPTY;
        let heights = ColumnHeights::ZERO;
        let snapshot = snapshot(&board, &heights, PieceKind::T);
        for placement in snapshot.legal_moves() {
            let _ = simulate_drop(&snapshot, placement);
        }
        assert_eq!(board, Board::EMPTY);
    }
}
