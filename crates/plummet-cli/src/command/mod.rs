use clap::{Parser, Subcommand};

use self::{bench::BenchArg, play::PlayArg, suggest::SuggestArg};

mod bench;
mod play;
mod suggest;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Watch the evaluator play one game
    Play(#[clap(flatten)] PlayArg),
    /// Play several games in parallel and summarize rows cleared
    Bench(#[clap(flatten)] BenchArg),
    /// Rank every placement of a piece on a board read from a file
    Suggest(#[clap(flatten)] SuggestArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Bench(arg) => bench::run(&arg)?,
        Mode::Suggest(arg) => suggest::run(&arg)?,
    }
    Ok(())
}
