//! Move selection for the plummet falling-block agent.
//!
//! This crate implements a one-ply, greedy evaluator: for every legal placement of
//! the current piece it simulates the drop, measures the resulting board, and picks
//! the placement with the highest weighted score. There is no lookahead past the
//! current piece and no hold.
//!
//! # Architecture
//!
//! ```text
//! Benchmark (many games in parallel, averaged)
//!     ↓ uses
//! Session (drive one game to completion)
//!     ↓ uses
//! Move Evaluation (select the best placement for a turn)
//!     ↓ uses
//! Drop Simulation + Placement Evaluation (score a single placement)
//! ```
//!
//! - [`board_analysis`] - One-pass column scan (tops, holes, full rows)
//! - [`board_feature`] - The four scored features: lines, height, holes, bumpiness
//! - [`drop_simulation`] - Hypothetical drop onto a copy of the board
//! - [`placement_evaluator`] - Fixed linear weights over the features
//! - [`move_evaluator`] - Best-placement selection for a turn
//! - [`session`] - Driver loop playing one game
//! - [`benchmark`] - Independent games on scoped threads, reduced to summary statistics
//!
//! # Example
//!
//! ```
//! use plummet_engine::GameState;
//! use plummet_evaluator::move_evaluator::MoveEvaluator;
//!
//! let evaluator = MoveEvaluator::default();
//! let mut state = GameState::new();
//! for _ in 0..10 {
//!     let placement = evaluator.pick_move(&state).unwrap();
//!     if state.make_move(placement).is_err() {
//!         break;
//!     }
//! }
//! ```
//!
//! # Design Notes
//!
//! - **Pre-clear scoring**: simulated boards are scored before full rows are cleared.
//!   The `lines` feature rewards a board that is about to clear instead.
//! - **Holes** are covered empty cells: scanning each column from the top down, every
//!   empty cell below the first occupied one counts.
//! - **Stateless**: evaluators hold only immutable weights and can be shared across
//!   threads; every evaluation works on its own board copy.

pub mod benchmark;
pub mod board_analysis;
pub mod board_feature;
pub mod drop_simulation;
pub mod move_evaluator;
pub mod placement_evaluator;
pub mod session;
