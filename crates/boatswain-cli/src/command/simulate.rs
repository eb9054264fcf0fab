use std::path::PathBuf;

use boatswain_agent::{AgentConfig, AgentSession};
use boatswain_stats::descriptive::DescriptiveStats;
use boatswain_training::batch_store::JsonBatchStore;

use crate::{model::ScoreModelFile, sim::GameSimulator, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of runs to play
    #[arg(long, default_value_t = 30)]
    runs: u64,
    /// RNG seed shared by the agent and the simulator
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Decision frames per run
    #[arg(long, default_value_t = 50)]
    frames_per_run: u32,
    /// Directory for per-run training batches
    #[arg(long, default_value = "boatswain-data")]
    data_dir: PathBuf,
    /// Trained model output path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let store = JsonBatchStore::open(&arg.data_dir)?;
    let mut session = AgentSession::new(AgentConfig::default(), store, arg.seed);
    let mut sim = GameSimulator::new(arg.seed.wrapping_add(1), arg.frames_per_run);

    for run in 1..=arg.runs {
        let mode = session.mode();
        let mut game_score = 0;
        loop {
            let frame = sim.frame();
            let run_over = frame.context.is_game_over();
            if run_over {
                game_score = sim.score();
            }
            let commands = session.handle_frame(&frame)?;
            for command in &commands {
                sim.apply(command);
            }
            if run_over {
                break;
            }
        }
        let stats = session.stats();
        eprintln!(
            "Run #{run} ({mode}): {}/{} matched swaps, game score {game_score}",
            stats.last_matches, stats.last_attempts,
        );
    }

    let stats = session.stats();
    eprintln!();
    eprintln!("Session summary:");
    eprintln!("  Runs: {}", stats.runs_completed);
    eprintln!("  Record matches in one run: {}", stats.record_matches);
    if let Some(random) = DescriptiveStats::new(stats.random_match_rate.iter().copied()) {
        eprintln!(
            "  Random-mode match rate: mean {:.3}, min {:.3}, max {:.3}, stddev {:.3}",
            random.mean, random.min, random.max, random.std_dev,
        );
    }
    if let Some(predict) = DescriptiveStats::new(stats.predict_match_rate.iter().copied()) {
        eprintln!(
            "  Predict-mode match rate: mean {:.3}, min {:.3}, max {:.3}, stddev {:.3}",
            predict.mean, predict.min, predict.max, predict.std_dev,
        );
    }
    if stats.failed_batch_saves > 0 {
        eprintln!("  Failed batch saves: {}", stats.failed_batch_saves);
    }
    if stats.skipped_training_batches > 0 {
        eprintln!("  Skipped training batches: {}", stats.skipped_training_batches);
    }

    let model = ScoreModelFile::new("boatswain", session.model().clone());
    Output::save_json(&model, arg.output.clone())?;
    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Samples seen: {}", model.samples_seen);

    Ok(())
}
