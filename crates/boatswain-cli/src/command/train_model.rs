use std::path::{Path, PathBuf};

use anyhow::Context as _;
use boatswain_training::{
    batch_store::JsonBatchStore, regressor::SgdRegressor, trainer::fit_recent_runs,
};

use crate::{model::ScoreModelFile, util::Output};

const TRAIN_INTERVAL: u64 = 10;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainModelArg {
    /// Directory containing run batches
    #[arg(long, default_value = "boatswain-data")]
    data_dir: PathBuf,
    /// Model name stored in the output
    #[arg(long, default_value = "boatswain")]
    name: String,
    /// Trained model output path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Replays the online training schedule over the batches on disk: one
/// round per `TRAIN_INTERVAL` completed runs, plus a final round when the
/// last runs do not fill a whole interval.
pub(crate) fn run(arg: &TrainModelArg) -> anyhow::Result<()> {
    let latest = latest_run(&arg.data_dir)?;
    eprintln!("Found batches up to run {latest} in {}", arg.data_dir.display());

    let store = JsonBatchStore::open(&arg.data_dir)?;
    let mut model = SgdRegressor::new();

    let mut rounds: Vec<u64> = (1..=latest)
        .filter(|run| run.is_multiple_of(TRAIN_INTERVAL))
        .collect();
    if !latest.is_multiple_of(TRAIN_INTERVAL) {
        rounds.push(latest);
    }

    for completed_runs in rounds {
        let report = fit_recent_runs(&mut model, &store, completed_runs);
        eprintln!(
            "Round at run {completed_runs}: {} examples fitted",
            report.examples
        );
        for (run, err) in &report.skipped {
            eprintln!("  skipped run {run}: {err}");
        }
    }

    let model = ScoreModelFile::new(arg.name.clone(), model);
    Output::save_json(&model, arg.output.clone())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Samples seen: {}", model.samples_seen);

    Ok(())
}

/// Highest run number with a `run_<n>.json` batch in the data directory.
fn latest_run(dir: &Path) -> anyhow::Result<u64> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read data directory: {}", dir.display()))?;
    let mut latest = None;
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(run) = name
            .to_str()
            .and_then(|n| n.strip_prefix("run_"))
            .and_then(|n| n.strip_suffix(".json"))
            .and_then(|n| n.parse::<u64>().ok())
        else {
            continue;
        };
        latest = Some(latest.map_or(run, |l: u64| l.max(run)));
    }
    latest.with_context(|| format!("No run batches found in {}", dir.display()))
}
