//! Parallel multi-game benchmark.
//!
//! [`run_benchmark`] plays one independent game per seed, each on its own scoped thread
//! with its own [`GameState`], and summarizes the rows cleared across all games. The
//! evaluator is shared read-only between the threads.

use std::{ops::ControlFlow, thread};

use plummet_engine::{GameState, PieceSeed};
use serde::{Deserialize, Serialize};

use crate::{
    move_evaluator::MoveEvaluator,
    session::{GameLimits, GameOutcome, play_game},
};

/// Descriptive statistics of rows cleared per game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowsClearedStats {
    pub games: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    /// Upper median for an even number of games.
    pub median: usize,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl RowsClearedStats {
    /// Summarizes `values`. Returns `None` if there are none.
    ///
    /// ```
    /// use plummet_evaluator::benchmark::RowsClearedStats;
    ///
    /// let stats = RowsClearedStats::new([5, 2, 4, 1, 3]).unwrap();
    /// assert_eq!(stats.min, 1);
    /// assert_eq!(stats.max, 5);
    /// assert_eq!(stats.median, 3);
    /// assert!((stats.mean - 3.0).abs() < f64::EPSILON);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_unstable();

        let min = *values.first()?;
        let max = *values.last()?;
        let n = values.len() as f64;
        let mean = values.iter().sum::<usize>() as f64 / n;
        let median = values[values.len() / 2];
        let variance = values
            .iter()
            .map(|&v| (v as f64 - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            games: values.len(),
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// One outcome per seed, in seed order.
    pub games: Vec<GameOutcome>,
    pub stats: Option<RowsClearedStats>,
}

/// Plays one game per seed in parallel and collects the outcomes.
///
/// `on_game_finished` is called from the game's thread with the seed index as soon as
/// that game ends, so completion order is not seed order.
///
/// # Example
///
/// ```
/// use plummet_engine::PieceSeed;
/// use plummet_evaluator::{
///     benchmark::run_benchmark, move_evaluator::MoveEvaluator, session::GameLimits,
/// };
///
/// let seeds = PieceSeed::from_bytes([9; 16]).derive_seeds(3);
/// let limits = GameLimits::with_max_turns(20);
/// let result = run_benchmark(&MoveEvaluator::default(), &seeds, limits, |_, _| {});
/// assert_eq!(result.games.len(), 3);
/// assert_eq!(result.stats.unwrap().games, 3);
/// ```
pub fn run_benchmark<F>(
    evaluator: &MoveEvaluator<'_>,
    seeds: &[PieceSeed],
    limits: GameLimits,
    on_game_finished: F,
) -> BenchmarkResult
where
    F: Fn(usize, &GameOutcome) + Sync,
{
    let mut outcomes = vec![None; seeds.len()];

    thread::scope(|s| {
        let on_game_finished = &on_game_finished;
        for (i, (slot, &seed)) in outcomes.iter_mut().zip(seeds).enumerate() {
            s.spawn(move || {
                let mut state = GameState::with_seed(seed);
                let outcome =
                    play_game(evaluator, &mut state, limits, |_| ControlFlow::Continue(()));
                on_game_finished(i, &outcome);
                *slot = Some(outcome);
            });
        }
    });

    let games = outcomes.into_iter().flatten().collect::<Vec<_>>();
    let stats = RowsClearedStats::new(games.iter().map(|game| game.rows_cleared));
    BenchmarkResult { games, stats }
}
