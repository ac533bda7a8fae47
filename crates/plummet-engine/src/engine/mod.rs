//! Game engine logic and state management.
//!
//! This module drives the core data structures through a game:
//!
//! - [`GameState`] - Authoritative game state (board, column heights, current piece, turn)
//! - [`TurnSnapshot`] - Read-only per-turn view handed to move evaluators
//! - [`GameStats`] - Per-game statistics (pieces placed, rows cleared)
//! - [`PieceGenerator`] - Uniform random piece generation
//! - [`PieceSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Initialize [`GameState`] (optionally with a [`PieceSeed`])
//! 2. Choose one of [`GameState::legal_moves`] for the current piece
//! 3. Apply it with [`GameState::make_move`]: full rows clear, the next piece is drawn
//! 4. Repeat until a piece no longer fits below the top row
//!
//! # Example
//!
//! ```
//! use plummet_engine::GameState;
//!
//! let mut state = GameState::new();
//! while !state.has_lost() && state.turn() < 10 {
//!     let placement = state.legal_moves()[0];
//!     if state.make_move(placement).is_err() {
//!         println!("Game over!");
//!     }
//! }
//! ```

pub use self::{game_state::*, game_stats::*, piece_generator::*, turn_snapshot::*};

mod game_state;
mod game_stats;
mod piece_generator;
mod turn_snapshot;
