use crate::{
    batch_store::{BatchStore, BatchStoreError},
    example::TrainingExample,
    regressor::SgdRegressor,
};

/// First training round consumes one batch fewer, matching a history that
/// began recording after the very first run started.
const FIRST_ROUND_WINDOW: u64 = 9;
const ROUND_WINDOW: u64 = 10;

/// Outcome of one training round, for the caller to log.
#[derive(Debug, Default)]
pub struct FitReport {
    /// Examples actually fed to the regressor.
    pub examples: usize,
    /// Runs whose batch could not be loaded, with the cause.
    pub skipped: Vec<(u64, BatchStoreError)>,
}

impl FitReport {
    /// Whether the round updated the model at all.
    #[must_use]
    pub fn fitted(&self) -> bool {
        self.examples > 0
    }
}

/// Runs one training round over the most recent run batches.
///
/// Loads the batches of the last 9 runs on the first round
/// (`completed_runs <= 10`), 10 on every later round, and feeds every
/// example that loads into one `partial_fit` pass. Unreadable batches cost
/// only their own run and are listed in the report. When nothing loads the
/// model is left untouched.
pub fn fit_recent_runs(
    model: &mut SgdRegressor,
    store: &impl BatchStore,
    completed_runs: u64,
) -> FitReport {
    let window = if completed_runs <= ROUND_WINDOW {
        FIRST_ROUND_WINDOW
    } else {
        ROUND_WINDOW
    };
    let first = completed_runs.saturating_sub(window) + 1;

    let mut report = FitReport::default();
    let mut examples: Vec<TrainingExample> = Vec::new();
    for run in first..=completed_runs {
        match store.load_batch(run) {
            Ok(batch) => examples.extend(batch),
            Err(err) => report.skipped.push((run, err)),
        }
    }

    if !examples.is_empty() {
        model.partial_fit(&examples);
        report.examples = examples.len();
    }
    report
}
