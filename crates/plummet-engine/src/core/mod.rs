//! Core data structures: the occupancy grid and the piece geometry it is filled with.
//!
//! # Coordinate System
//!
//! - Row 0 is the bottom of the board; row indices grow upward
//! - Column 0 is the leftmost column
//! - A piece is positioned by the leftmost column it covers and its rotation index
//!
//! The board has [`ROWS`] rows, but the topmost row is never filled: a piece whose
//! top would reach it ends the game instead.

pub use self::{board::*, piece::*, placement::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod placement;

/// Number of rows on the board.
pub const ROWS: usize = 21;

/// Number of columns on the board.
pub const COLS: usize = 10;
