use serde::{Deserialize, Serialize};

/// Game statistics tracking pieces placed and rows cleared.
///
/// # Example
///
/// ```
/// use plummet_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_move(4);
/// stats.complete_move(0);
///
/// assert_eq!(stats.completed_pieces(), 2);
/// assert_eq!(stats.total_cleared_rows(), 4);
/// assert_eq!(stats.row_clear_counter()[4], 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    completed_pieces: usize,
    total_cleared_rows: usize,
    row_clear_counter: [usize; 5],
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            completed_pieces: 0,
            total_cleared_rows: 0,
            row_clear_counter: [0; 5],
        }
    }

    /// Returns the total number of pieces that have been placed.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_rows(&self) -> usize {
        self.total_cleared_rows
    }

    /// Returns a histogram of moves by the number of rows they cleared.
    ///
    /// Index `n` counts the moves that cleared exactly `n` rows (0-4).
    #[must_use]
    pub const fn row_clear_counter(&self) -> &[usize; 5] {
        &self.row_clear_counter
    }

    /// Updates statistics after a piece is placed.
    pub const fn complete_move(&mut self, cleared_rows: usize) {
        self.completed_pieces += 1;
        self.total_cleared_rows += cleared_rows;
        if cleared_rows < self.row_clear_counter.len() {
            self.row_clear_counter[cleared_rows] += 1;
        }
    }
}
