//! Move selection: choosing the placement for the current turn.
//!
//! [`MoveEvaluator`] looks one piece ahead. Each candidate placement is dropped on a
//! private copy of the board, the resulting field is scored, and the best candidate
//! wins:
//!
//! 1. **Simulate** - [`simulate_drop`] the current piece at the candidate placement
//! 2. **Score** - hand the field to the [`PlacementEvaluator`]; a drop that would
//!    overflow the board scores [`f64::NEG_INFINITY`]
//! 3. **Select** - keep the first candidate with the highest score
//!
//! Selection is stable: a later candidate replaces the current best only when its score
//! is strictly higher. If every candidate overflows, the first one is returned so that
//! a non-empty candidate list always yields a move.
//!
//! The evaluator holds no per-game state, so a single instance can drive any number of
//! games from any number of threads.

use plummet_engine::{GameState, Placement, TurnSnapshot};
use serde::Serialize;

use crate::{
    board_feature::BoardFeatures,
    drop_simulation::simulate_drop,
    placement_evaluator::{FeatureWeights, LinearPlacementEvaluator, PlacementEvaluator},
};

/// Score of one candidate placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveScore {
    pub placement: Placement,
    /// Features of the simulated field, `None` if the drop would overflow the board.
    pub features: Option<BoardFeatures>,
    pub score: f64,
}

impl MoveScore {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.features.is_some()
    }
}

/// Evaluates and selects the best placement for the current turn.
#[derive(Debug)]
pub struct MoveEvaluator<'a> {
    placement_evaluator: Box<dyn PlacementEvaluator + 'a>,
}

impl Default for MoveEvaluator<'static> {
    fn default() -> Self {
        Self::with_weights(FeatureWeights::DEFAULT)
    }
}

impl MoveEvaluator<'static> {
    #[must_use]
    pub fn with_weights(weights: FeatureWeights) -> Self {
        Self::new(Box::new(LinearPlacementEvaluator::new(weights)))
    }
}

impl<'a> MoveEvaluator<'a> {
    #[must_use]
    pub fn new(placement_evaluator: Box<dyn PlacementEvaluator + 'a>) -> Self {
        Self {
            placement_evaluator,
        }
    }

    /// Scores the snapshot's piece dropped at `placement`.
    ///
    /// Returns [`f64::NEG_INFINITY`] if the drop would overflow the board.
    #[must_use]
    pub fn score_placement(&self, snapshot: &TurnSnapshot<'_>, placement: Placement) -> f64 {
        simulate_drop(snapshot, placement).map_or(f64::NEG_INFINITY, |field| {
            self.placement_evaluator.evaluate_placement(&field)
        })
    }

    /// Selects the best of `candidates` for the snapshot's piece.
    ///
    /// Returns `None` only if `candidates` is empty. Otherwise the result is always an
    /// element of `candidates`: the first one with the highest score, or the first one
    /// outright if every candidate would overflow the board.
    ///
    /// Every candidate must be a legal move for the snapshot's piece.
    ///
    /// # Example
    ///
    /// ```
    /// use plummet_engine::{Board, ColumnHeights, PieceKind, PieceTables, Placement, TurnSnapshot};
    /// use plummet_evaluator::move_evaluator::MoveEvaluator;
    ///
    /// // Bottom row is full except for the last column
    /// let board: Board = "#########.".parse().unwrap();
    /// let heights = ColumnHeights::from_board(&board);
    /// let snapshot = TurnSnapshot::new(&board, &heights, &PieceTables::STANDARD, PieceKind::I, 9);
    ///
    /// let evaluator = MoveEvaluator::default();
    /// let chosen = evaluator.select_move(&snapshot, &snapshot.legal_moves());
    /// assert_eq!(chosen, Some(Placement::new(0, 9)));
    /// ```
    #[must_use]
    pub fn select_move(
        &self,
        snapshot: &TurnSnapshot<'_>,
        candidates: &[Placement],
    ) -> Option<Placement> {
        let mut best = *candidates.first()?;
        let mut best_score = f64::NEG_INFINITY;

        for &placement in candidates {
            let score = self.score_placement(snapshot, placement);
            if score > best_score {
                best_score = score;
                best = placement;
            }
        }

        Some(best)
    }

    /// Scores every candidate, in candidate order.
    ///
    /// Unlike [`Self::select_move`], this also reports the board features of each
    /// simulated field.
    #[must_use]
    pub fn evaluate(
        &self,
        snapshot: &TurnSnapshot<'_>,
        candidates: &[Placement],
    ) -> Vec<MoveScore> {
        candidates
            .iter()
            .map(|&placement| match simulate_drop(snapshot, placement) {
                Some(field) => MoveScore {
                    placement,
                    features: Some(BoardFeatures::from_board(field.board())),
                    score: self.placement_evaluator.evaluate_placement(&field),
                },
                None => MoveScore {
                    placement,
                    features: None,
                    score: f64::NEG_INFINITY,
                },
            })
            .collect()
    }

    /// Selects a placement for the current piece of `state` among all its legal moves.
    #[must_use]
    pub fn pick_move(&self, state: &GameState) -> Option<Placement> {
        self.select_move(&state.snapshot(), &state.legal_moves())
    }
}

#[cfg(test)]
mod tests {
    use plummet_engine::{Board, COLS, ColumnHeights, PieceKind, PieceSeed, PieceTables};

    use super::*;

    fn snapshot<'a>(
        board: &'a Board,
        heights: &'a ColumnHeights,
        piece: PieceKind,
    ) -> TurnSnapshot<'a> {
        TurnSnapshot::new(board, heights, &PieceTables::STANDARD, piece, 0)
    }

    fn gap_board() -> Board {
        let mut board = Board::EMPTY;
        for column in 0..COLS - 1 {
            board.set_cell(0, column, 1);
        }
        board
    }

    #[test]
    fn test_empty_candidates() {
        let board = Board::EMPTY;
        let heights = ColumnHeights::ZERO;
        let snapshot = snapshot(&board, &heights, PieceKind::T);
        assert_eq!(MoveEvaluator::default().select_move(&snapshot, &[]), None);
    }

    #[test]
    fn test_fills_gap_instead_of_stacking() {
        let board = gap_board();
        let heights = ColumnHeights::from_board(&board);
        let snapshot = snapshot(&board, &heights, PieceKind::I);
        let evaluator = MoveEvaluator::default();

        let fill = Placement::new(0, COLS - 1);
        let stack = Placement::new(1, 0);
        assert!(
            evaluator.score_placement(&snapshot, fill) > evaluator.score_placement(&snapshot, stack)
        );
        assert_eq!(evaluator.select_move(&snapshot, &[stack, fill]), Some(fill));
        assert_eq!(
            evaluator.select_move(&snapshot, &snapshot.legal_moves()),
            Some(fill)
        );
    }

    #[test]
    fn test_selection_is_deterministic_and_contained() {
        let board: Board = "\
            ..#.......
            .###..#...
            ####.###.#"
            .parse()
            .unwrap();
        let heights = ColumnHeights::from_board(&board);
        let evaluator = MoveEvaluator::default();

        for piece in PieceKind::ALL {
            let snapshot = snapshot(&board, &heights, piece);
            let candidates = snapshot.legal_moves();
            let first = evaluator.select_move(&snapshot, &candidates).unwrap();
            assert!(candidates.contains(&first));
            for _ in 0..3 {
                assert_eq!(evaluator.select_move(&snapshot, &candidates), Some(first));
            }
        }
    }

    #[test]
    fn test_overflowing_candidate_is_never_chosen() {
        let mut board = Board::EMPTY;
        for row in 0..17 {
            board.set_cell(row, 0, 1);
        }
        let heights = ColumnHeights::from_board(&board);
        let snapshot = snapshot(&board, &heights, PieceKind::I);
        let evaluator = MoveEvaluator::default();

        let overflow = Placement::new(0, 0);
        let valid = Placement::new(0, 5);
        assert!(evaluator.score_placement(&snapshot, overflow).is_infinite());
        assert_eq!(evaluator.select_move(&snapshot, &[overflow, valid]), Some(valid));
    }

    #[test]
    fn test_all_overflowing_falls_back_to_first() {
        let mut board = Board::EMPTY;
        for column in 0..COLS {
            board.set_cell(19, column, 1);
        }
        let heights = ColumnHeights::from_board(&board);
        let snapshot = snapshot(&board, &heights, PieceKind::O);
        let evaluator = MoveEvaluator::default();

        let candidates = snapshot.legal_moves();
        assert!(
            evaluator
                .evaluate(&snapshot, &candidates)
                .iter()
                .all(|s| !s.is_valid())
        );
        assert_eq!(evaluator.select_move(&snapshot, &candidates), Some(candidates[0]));

        let reversed = candidates.iter().rev().copied().collect::<Vec<_>>();
        assert_eq!(evaluator.select_move(&snapshot, &reversed), Some(reversed[0]));
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        let board = Board::EMPTY;
        let heights = ColumnHeights::ZERO;
        let snapshot = snapshot(&board, &heights, PieceKind::O);
        let evaluator = MoveEvaluator::default();

        // Mirror images score the same on an empty board
        let left = Placement::new(0, 0);
        let right = Placement::new(0, COLS - 2);
        assert_eq!(
            evaluator.score_placement(&snapshot, left),
            evaluator.score_placement(&snapshot, right)
        );
        assert_eq!(evaluator.select_move(&snapshot, &[left, right]), Some(left));
        assert_eq!(evaluator.select_move(&snapshot, &[right, left]), Some(right));
    }

    #[test]
    fn test_zero_weights_pick_first_valid() {
        let weights = FeatureWeights {
            lines: 0.0,
            height: 0.0,
            holes: 0.0,
            bumpiness: 0.0,
        };
        let evaluator = MoveEvaluator::with_weights(weights);
        let board = gap_board();
        let heights = ColumnHeights::from_board(&board);
        let snapshot = snapshot(&board, &heights, PieceKind::Z);

        let candidates = snapshot.legal_moves();
        assert_eq!(evaluator.select_move(&snapshot, &candidates), Some(candidates[0]));
    }

    #[test]
    fn test_evaluate_reports_features() {
        let board = gap_board();
        let heights = ColumnHeights::from_board(&board);
        let snapshot = snapshot(&board, &heights, PieceKind::I);
        let evaluator = MoveEvaluator::default();

        let scores = evaluator.evaluate(&snapshot, &[Placement::new(0, COLS - 1)]);
        assert_eq!(scores.len(), 1);
        let features = scores[0].features.unwrap();
        assert_eq!(features.lines, 1);
        assert_eq!(features.height, 3);
        assert_eq!(features.holes, 0);
        assert_eq!(features.bumpiness, 3);
        assert!((scores[0].score - FeatureWeights::DEFAULT.score(&features)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pick_move_plays_legal_moves() {
        let mut state = GameState::with_seed(PieceSeed::from_bytes([3; 16]));
        let evaluator = MoveEvaluator::default();
        for _ in 0..50 {
            let placement = evaluator.pick_move(&state).unwrap();
            assert!(state.legal_moves().contains(&placement));
            state.make_move(placement).unwrap();
        }
        assert_eq!(state.turn(), 50);
    }
}
