use std::path::PathBuf;

use boatswain_engine::{Board, generate_deltas, score_board};
use boatswain_evaluator::move_selector::{LearnedSelector, MoveSelector as _};
use serde::Serialize;

use crate::{
    model::ScoreModelFile,
    util::{Output, read_json_file},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoreBoardArg {
    /// Boards JSON file (array of board strings)
    input: PathBuf,
    /// Trained model file; adds the model's preferred move per board
    #[arg(long)]
    model: Option<PathBuf>,
    /// Report output path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BoardReport {
    board: Board,
    score: u32,
    matched_runs: usize,
    /// Move whose delta attains the highest true score, when positive.
    best_move: Option<String>,
    best_score: u32,
    /// Move the trained model would play, when a model was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    model_move: Option<String>,
}

pub(crate) fn run(arg: &ScoreBoardArg) -> anyhow::Result<()> {
    let boards: Vec<Board> = read_json_file("boards", &arg.input)?;
    let model: Option<ScoreModelFile> = arg
        .model
        .as_ref()
        .map(|path| read_json_file("model", path))
        .transpose()?;

    let reports: Vec<BoardReport> = boards
        .iter()
        .map(|board| {
            let result = score_board(board);

            let mut best_score = 0;
            let mut best_move = None;
            for delta in generate_deltas(board) {
                let score = score_board(delta.board()).score();
                if score > best_score {
                    best_score = score;
                    best_move = Some(delta.key());
                }
            }

            let model_move = model.as_ref().and_then(|m| {
                LearnedSelector::new(&m.regressor)
                    .choose(board)
                    .map(|game_move| game_move.to_string())
            });

            BoardReport {
                board: board.clone(),
                score: result.score(),
                matched_runs: result.runs().len(),
                best_move,
                best_score,
                model_move,
            }
        })
        .collect();

    Output::save_json(&reports, arg.output.clone())?;
    Ok(())
}
