use std::path::PathBuf;

use plummet_engine::{ColumnHeights, PieceKind, PieceTables, Placement, TurnSnapshot};
use plummet_evaluator::{
    board_feature::BoardFeature,
    move_evaluator::{MoveEvaluator, MoveScore},
};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SuggestArg {
    /// Board file: one line per row, top row first, `.` for empty cells
    board_path: PathBuf,
    /// Piece to place (one of O, I, L, J, T, S, Z)
    #[clap(long)]
    piece: PieceKind,
    /// Print the ranking as JSON
    #[clap(long, default_value_t = false)]
    json: bool,
}

pub(crate) fn run(arg: &SuggestArg) -> anyhow::Result<()> {
    let SuggestArg {
        board_path,
        piece,
        json,
    } = arg;

    let board = util::read_board_file(board_path)?;
    let heights = ColumnHeights::from_board(&board);
    let snapshot = TurnSnapshot::new(&board, &heights, &PieceTables::STANDARD, *piece, 0);
    let (selected, ranking) = rank(&MoveEvaluator::default(), &snapshot);

    if *json {
        return Output::save_json(&ranking, None);
    }

    println!("{board}");
    println!();
    println!("{}", header());
    for (rank, score) in ranking.iter().enumerate() {
        let marker = if Some(score.placement) == selected {
            "*"
        } else {
            " "
        };
        println!("{:>3}{marker}  {}", rank + 1, format_score(score));
    }
    println!();
    for feature in BoardFeature::ALL {
        println!("{:>10}: {}", feature.id(), feature.name());
    }
    Ok(())
}

/// Scores every legal move of the snapshot's piece, best first.
///
/// Returns the selected move along with the ranking. Moves with equal scores keep
/// their candidate order, so the selected move always comes first.
fn rank(
    evaluator: &MoveEvaluator<'_>,
    snapshot: &TurnSnapshot<'_>,
) -> (Option<Placement>, Vec<MoveScore>) {
    let candidates = snapshot.legal_moves();
    let selected = evaluator.select_move(snapshot, &candidates);
    let mut ranking = evaluator.evaluate(snapshot, &candidates);
    ranking.sort_by(|a, b| b.score.total_cmp(&a.score));
    (selected, ranking)
}

fn header() -> String {
    let mut header = format!("{:>4}  {:<8} {:>10}", "rank", "move", "score");
    for feature in BoardFeature::ALL {
        header.push_str(&format!(" {:>10}", feature.id()));
    }
    header
}

fn format_score(score: &MoveScore) -> String {
    let placement = score.placement.to_string();
    let Some(features) = score.features else {
        return format!("{placement:<8} {:>10}", "overflow");
    };
    let mut line = format!("{placement:<8} {:>10.4}", score.score);
    for feature in BoardFeature::ALL {
        line.push_str(&format!(" {:>10}", features.get(feature)));
    }
    line
}
