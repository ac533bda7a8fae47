//! Placement evaluation: scoring one simulated drop.
//!
//! A placement's score is a linear combination of the raw board features of its
//! simulated field:
//!
//! ```text
//! score = w_lines·lines + w_height·height + w_holes·holes + w_bumpiness·bumpiness
//! ```
//!
//! [`FeatureWeights::DEFAULT`] holds the fixed weights used for play. Only `lines` has a
//! positive weight; the other three penalize tall, holey and uneven stacks.
//!
//! Full rows in the simulated field are still present when it is scored, so a placement
//! that completes rows is rewarded through `lines` and not through a lower stack.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    board_feature::{BoardFeature, BoardFeatures},
    drop_simulation::SimulatedField,
};

/// One weight per board feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeights {
    pub lines: f64,
    pub height: f64,
    pub holes: f64,
    pub bumpiness: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FeatureWeights {
    pub const DEFAULT: Self = Self {
        lines: 0.510_066,
        height: -0.760_666,
        holes: -0.356_63,
        bumpiness: -0.184_483,
    };

    #[must_use]
    pub fn get(&self, feature: BoardFeature) -> f64 {
        match feature {
            BoardFeature::Lines => self.lines,
            BoardFeature::Height => self.height,
            BoardFeature::Holes => self.holes,
            BoardFeature::Bumpiness => self.bumpiness,
        }
    }

    /// Weighted sum of `features`, accumulated in [`BoardFeature::ALL`] order.
    #[must_use]
    pub fn score(&self, features: &BoardFeatures) -> f64 {
        BoardFeature::ALL
            .iter()
            .map(|&feature| self.get(feature) * f64::from(features.get(feature)))
            .sum()
    }
}

/// Evaluates piece placements by assigning scores.
///
/// Implementations only see the simulated field; a placement that could not be
/// simulated is never handed to them.
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    /// Evaluates a simulated placement and returns a score (higher is better).
    fn evaluate_placement(&self, field: &SimulatedField) -> f64;
}

/// Weighted sum of the four board features.
///
/// # Example
///
/// ```
/// use plummet_engine::{Board, ColumnHeights, PieceKind, PieceTables, Placement, TurnSnapshot};
/// use plummet_evaluator::{
///     drop_simulation::simulate_drop,
///     placement_evaluator::{LinearPlacementEvaluator, PlacementEvaluator},
/// };
///
/// let board = Board::EMPTY;
/// let heights = ColumnHeights::ZERO;
/// let snapshot = TurnSnapshot::new(&board, &heights, &PieceTables::STANDARD, PieceKind::O, 0);
/// let field = simulate_drop(&snapshot, Placement::new(0, 0)).unwrap();
///
/// let evaluator = LinearPlacementEvaluator::default();
/// assert!(evaluator.evaluate_placement(&field) < 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinearPlacementEvaluator {
    weights: FeatureWeights,
}

impl LinearPlacementEvaluator {
    #[must_use]
    pub fn new(weights: FeatureWeights) -> Self {
        Self { weights }
    }
}

impl PlacementEvaluator for LinearPlacementEvaluator {
    #[inline]
    fn evaluate_placement(&self, field: &SimulatedField) -> f64 {
        self.weights.score(&BoardFeatures::from_board(field.board()))
    }
}
