//! Scored board features.
//!
//! Four raw features describe a board:
//!
//! | Feature     | Raw value                                                      |
//! |-------------|----------------------------------------------------------------|
//! | `lines`     | rows with every column occupied (not cleared)                  |
//! | `height`    | sum of column top row indices, 0 for empty columns             |
//! | `holes`     | empty cells below the topmost occupied cell of their column    |
//! | `bumpiness` | sum of adjacent column top differences, empty top at row -1    |
//!
//! All four are total over any board and never negative.

use std::fmt;

use plummet_engine::Board;
use serde::{Deserialize, Serialize};

use crate::board_analysis::BoardAnalysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardFeature {
    Lines,
    Height,
    Holes,
    Bumpiness,
}

impl BoardFeature {
    /// All features, in weight-vector order.
    pub const ALL: [Self; 4] = [Self::Lines, Self::Height, Self::Holes, Self::Bumpiness];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Height => "height",
            Self::Holes => "holes",
            Self::Bumpiness => "bumpiness",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lines => "Full Lines",
            Self::Height => "Aggregate Height",
            Self::Holes => "Holes",
            Self::Bumpiness => "Bumpiness",
        }
    }

    #[must_use]
    pub fn extract_raw(self, analysis: &BoardAnalysis) -> u32 {
        match self {
            Self::Lines => analysis.num_full_rows(),
            Self::Height => analysis.aggregate_height(),
            Self::Holes => analysis.num_holes(),
            Self::Bumpiness => analysis.bumpiness(),
        }
    }
}

impl fmt::Display for BoardFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Raw feature values of one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardFeatures {
    pub lines: u32,
    pub height: u32,
    pub holes: u32,
    pub bumpiness: u32,
}

impl BoardFeatures {
    #[must_use]
    pub fn from_analysis(analysis: &BoardAnalysis) -> Self {
        Self {
            lines: BoardFeature::Lines.extract_raw(analysis),
            height: BoardFeature::Height.extract_raw(analysis),
            holes: BoardFeature::Holes.extract_raw(analysis),
            bumpiness: BoardFeature::Bumpiness.extract_raw(analysis),
        }
    }

    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self::from_analysis(&BoardAnalysis::from_board(board))
    }

    #[must_use]
    pub fn get(&self, feature: BoardFeature) -> u32 {
        match feature {
            BoardFeature::Lines => self.lines,
            BoardFeature::Height => self.height,
            BoardFeature::Holes => self.holes,
            BoardFeature::Bumpiness => self.bumpiness,
        }
    }
}
