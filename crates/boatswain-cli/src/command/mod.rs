use clap::{Parser, Subcommand};

use self::{
    score_board::ScoreBoardArg, simulate::SimulateArg, train_model::TrainModelArg,
};

mod score_board;
mod simulate;
mod train_model;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the agent against the built-in game simulator
    Simulate(#[clap(flatten)] SimulateArg),
    /// Re-fit a model from persisted run batches
    TrainModel(#[clap(flatten)] TrainModelArg),
    /// Score boards from a JSON file and report the best moves
    ScoreBoard(#[clap(flatten)] ScoreBoardArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::TrainModel(arg) => train_model::run(&arg)?,
        Mode::ScoreBoard(arg) => score_board::run(&arg)?,
    }
    Ok(())
}
