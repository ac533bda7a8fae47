use crate::{
    MakeMoveError,
    core::{
        board::{Board, ColumnHeights},
        piece::{LegalMoves, PieceKind, PieceTables},
        placement::Placement,
    },
};

use super::{
    game_stats::GameStats,
    piece_generator::{PieceGenerator, PieceSeed},
    turn_snapshot::TurnSnapshot,
};

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    column_heights: ColumnHeights,
    piece_tables: &'static PieceTables,
    generator: PieceGenerator,
    current_piece: PieceKind,
    turn: u32,
    lost: bool,
    stats: GameStats,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::from_generator(PieceGenerator::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::from_generator(PieceGenerator::with_seed(seed))
    }

    fn from_generator(mut generator: PieceGenerator) -> Self {
        let current_piece = generator.next_piece();
        Self {
            board: Board::EMPTY,
            column_heights: ColumnHeights::ZERO,
            piece_tables: &PieceTables::STANDARD,
            generator,
            current_piece,
            turn: 0,
            lost: false,
            stats: GameStats::new(),
        }
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.generator.seed()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn column_heights(&self) -> &ColumnHeights {
        &self.column_heights
    }

    #[must_use]
    pub fn current_piece(&self) -> PieceKind {
        self.current_piece
    }

    /// Number of moves played so far, including a final move that ended the game.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn has_lost(&self) -> bool {
        self.lost
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn rows_cleared(&self) -> usize {
        self.stats.total_cleared_rows()
    }

    #[must_use]
    pub fn legal_moves(&self) -> LegalMoves {
        self.piece_tables.legal_moves(self.current_piece)
    }

    #[must_use]
    pub fn snapshot(&self) -> TurnSnapshot<'_> {
        TurnSnapshot::new(
            &self.board,
            &self.column_heights,
            self.piece_tables,
            self.current_piece,
            self.turn,
        )
    }

    /// Drops the current piece at `placement`, clears full rows and draws the next
    /// piece.
    ///
    /// Returns the number of rows cleared by the move.
    ///
    /// # Errors
    ///
    /// - [`MakeMoveError::IllegalPlacement`] if the rotation or column is out of range
    ///   for the current piece; the state is unchanged.
    /// - [`MakeMoveError::GameOver`] if the game was already lost.
    /// - [`MakeMoveError::Overflow`] if the piece would reach the top row. The move
    ///   still counts as a turn and the game is lost.
    pub fn make_move(&mut self, placement: Placement) -> Result<usize, MakeMoveError> {
        if self.lost {
            return Err(MakeMoveError::GameOver);
        }
        let piece = self.current_piece;
        let Some(orientation) = self
            .piece_tables
            .orientations(piece)
            .get(placement.rotation())
            .filter(|o| placement.column() + o.width() <= Board::COLS)
        else {
            return Err(MakeMoveError::IllegalPlacement { placement, piece });
        };

        self.turn += 1;
        let column = placement.column();
        let landing_row = orientation.landing_row(&self.column_heights, column);
        if !orientation.fits_at(landing_row) {
            self.lost = true;
            return Err(MakeMoveError::Overflow);
        }

        self.board
            .fill_piece(orientation, column, landing_row, self.turn);
        let cleared_rows = self
            .board
            .clear_full_rows(landing_row..landing_row + orientation.height());
        self.column_heights = if cleared_rows > 0 {
            ColumnHeights::from_board(&self.board)
        } else {
            let mut heights = *self.column_heights.as_array();
            for (dx, top) in orientation.top().iter().enumerate() {
                heights[column + dx] = landing_row + top;
            }
            ColumnHeights::new(heights)
        };

        self.stats.complete_move(cleared_rows);
        self.current_piece = self.generator.next_piece();
        Ok(cleared_rows)
    }
}
