//! Game-state engine for the plummet falling-block agent.
//!
//! The engine owns everything the move evaluator treats as an outside collaborator:
//! the occupancy grid, column heights, the static piece geometry tables, legal-move
//! enumeration, move application with row clearing, loss detection, and seeded piece
//! generation.
//!
//! - [`core`] - board, column heights, piece geometry and placements
//! - [`engine`] - game state, piece generation and per-game statistics

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum MakeMoveError {
    #[display("piece does not fit below the top of the board")]
    Overflow,
    #[display("game is already over")]
    GameOver,
    #[display("placement {placement} is not legal for piece {piece}")]
    IllegalPlacement {
        placement: Placement,
        piece: PieceKind,
    },
}
