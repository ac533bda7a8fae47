use std::{path::PathBuf, time::Instant};

use chrono::{DateTime, Utc};
use plummet_engine::PieceSeed;
use plummet_evaluator::{
    benchmark::{RowsClearedStats, run_benchmark},
    move_evaluator::MoveEvaluator,
    placement_evaluator::FeatureWeights,
    session::{GameLimits, GameOutcome},
};
use rand::Rng as _;
use serde::Serialize;

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BenchArg {
    /// Number of games to play in parallel
    #[clap(long, default_value_t = 5)]
    games: usize,
    /// Base seed as 32 hex digits; per-game seeds are derived from it (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Stop each game after this many moves
    #[clap(long)]
    max_turns: Option<u32>,
    /// Output file path for the JSON report (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BenchmarkReport {
    started_at: DateTime<Utc>,
    base_seed: PieceSeed,
    weights: FeatureWeights,
    limits: GameLimits,
    games: Vec<GameOutcome>,
    stats: Option<RowsClearedStats>,
}

pub(crate) fn run(arg: &BenchArg) -> anyhow::Result<()> {
    let BenchArg {
        games,
        seed,
        max_turns,
        output,
    } = arg;

    let base_seed = seed.unwrap_or_else(|| rand::rng().random());
    let seeds = base_seed.derive_seeds(*games);
    let limits = GameLimits {
        max_turns: *max_turns,
    };
    let weights = FeatureWeights::DEFAULT;
    let evaluator = MoveEvaluator::with_weights(weights);

    let started_at = Utc::now();
    let start = Instant::now();
    eprintln!("Playing {games} games (base seed {base_seed})...");
    let result = run_benchmark(&evaluator, &seeds, limits, |i, outcome| {
        let ending = if outcome.lost { "lost" } else { "stopped" };
        eprintln!(
            "  Game {i}: {} rows cleared, {ending} after {} moves",
            outcome.rows_cleared, outcome.turns
        );
    });
    eprintln!("Finished in {:.2?}", start.elapsed());

    if let Some(stats) = &result.stats {
        eprintln!(
            "Rows cleared: mean {:.1}, median {}, min {}, max {}, std dev {:.1}",
            stats.mean, stats.median, stats.min, stats.max, stats.std_dev
        );
    }

    let report = BenchmarkReport {
        started_at,
        base_seed,
        weights,
        limits,
        games: result.games,
        stats: result.stats,
    };
    Output::save_json(&report, output.clone())?;

    Ok(())
}
