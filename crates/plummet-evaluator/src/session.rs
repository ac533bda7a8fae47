//! Driver loop: playing a whole game with a move evaluator.

use std::ops::ControlFlow;

use plummet_engine::{GameState, PieceSeed};
use serde::{Deserialize, Serialize};

use crate::move_evaluator::MoveEvaluator;

/// When to stop a game that has not been lost yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLimits {
    /// Stop once this many moves have been played. `None` plays until the game is lost.
    pub max_turns: Option<u32>,
}

impl GameLimits {
    pub const UNLIMITED: Self = Self { max_turns: None };

    #[must_use]
    pub fn with_max_turns(max_turns: u32) -> Self {
        Self {
            max_turns: Some(max_turns),
        }
    }

    #[must_use]
    pub fn allows_turn(&self, turn: u32) -> bool {
        self.max_turns.is_none_or(|max| turn < max)
    }
}

/// Final result of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub seed: PieceSeed,
    pub rows_cleared: usize,
    pub turns: u32,
    pub lost: bool,
    /// Moves that cleared 0, 1, 2, 3 and 4 rows.
    pub row_clear_counter: [usize; 5],
}

impl GameOutcome {
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        Self {
            seed: state.seed(),
            rows_cleared: state.rows_cleared(),
            turns: state.turn(),
            lost: state.has_lost(),
            row_clear_counter: *state.stats().row_clear_counter(),
        }
    }
}

/// Plays `state` with `evaluator` until the game is lost, the limits are reached, or
/// `observer` breaks.
///
/// `observer` sees the state after every move, including the move that lost the game.
///
/// # Example
///
/// ```
/// use std::ops::ControlFlow;
///
/// use plummet_engine::{GameState, PieceSeed};
/// use plummet_evaluator::{
///     move_evaluator::MoveEvaluator,
///     session::{GameLimits, play_game},
/// };
///
/// let mut state = GameState::with_seed(PieceSeed::from_bytes([1; 16]));
/// let evaluator = MoveEvaluator::default();
/// let outcome = play_game(&evaluator, &mut state, GameLimits::with_max_turns(30), |_| {
///     ControlFlow::Continue(())
/// });
/// assert_eq!(outcome.turns, 30);
/// assert!(!outcome.lost);
/// ```
pub fn play_game<F>(
    evaluator: &MoveEvaluator<'_>,
    state: &mut GameState,
    limits: GameLimits,
    mut observer: F,
) -> GameOutcome
where
    F: FnMut(&GameState) -> ControlFlow<()>,
{
    while !state.has_lost() && limits.allows_turn(state.turn()) {
        let Some(placement) = evaluator.pick_move(state) else {
            break;
        };
        let result = state.make_move(placement);
        if observer(state).is_break() || result.is_err() {
            break;
        }
    }
    GameOutcome::from_state(state)
}
