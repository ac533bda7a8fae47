use crate::core::{
    board::{Board, Cell, ColumnHeights},
    piece::{LegalMoves, PieceKind, PieceOrientation, PieceTables},
    placement::Placement,
};

/// Read-only view of one turn, as handed to a move evaluator.
///
/// Bundles the occupancy grid, its column heights, the piece geometry tables, the
/// piece being placed and the number of moves played so far. Nothing in the snapshot
/// is retained across turns.
///
/// # Example
///
/// ```
/// use plummet_engine::{Board, ColumnHeights, PieceKind, PieceTables, TurnSnapshot};
///
/// let board = Board::EMPTY;
/// let heights = ColumnHeights::from_board(&board);
/// let snapshot = TurnSnapshot::new(&board, &heights, &PieceTables::STANDARD, PieceKind::T, 0);
/// assert_eq!(snapshot.legal_moves().len(), 34);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TurnSnapshot<'a> {
    board: &'a Board,
    column_heights: &'a ColumnHeights,
    piece_tables: &'a PieceTables,
    piece: PieceKind,
    turn: u32,
}

impl<'a> TurnSnapshot<'a> {
    #[must_use]
    pub fn new(
        board: &'a Board,
        column_heights: &'a ColumnHeights,
        piece_tables: &'a PieceTables,
        piece: PieceKind,
        turn: u32,
    ) -> Self {
        Self {
            board,
            column_heights,
            piece_tables,
            piece,
            turn,
        }
    }

    #[must_use]
    pub fn board(&self) -> &'a Board {
        self.board
    }

    #[must_use]
    pub fn column_heights(&self) -> &'a ColumnHeights {
        self.column_heights
    }

    #[must_use]
    pub fn piece(&self) -> PieceKind {
        self.piece
    }

    /// Number of moves played before this turn.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Cell value the piece placed this turn is filled with.
    #[must_use]
    pub fn fill_marker(&self) -> Cell {
        self.turn.saturating_add(1)
    }

    #[must_use]
    pub fn orientation(&self, placement: Placement) -> &'a PieceOrientation {
        self.piece_tables
            .orientation(self.piece, placement.rotation())
    }

    #[must_use]
    pub fn legal_moves(&self) -> LegalMoves {
        self.piece_tables.legal_moves(self.piece)
    }
}
