use boatswain_engine::PLANE_FEATURES;
use boatswain_evaluator::score_model::ScoreModel;
use serde::{Deserialize, Serialize};

use crate::example::TrainingExample;

/// Initial learning rate.
const ETA0: f32 = 0.01;
/// Inverse-scaling exponent: eta = eta0 / t^POWER_T.
const POWER_T: f32 = 0.25;
/// L2 penalty strength.
const ALPHA: f32 = 1e-4;

/// Incremental linear regressor trained with squared-loss SGD.
///
/// One weight per plane feature plus an intercept. The learning rate decays
/// by inverse scaling over the lifetime sample counter `t`, and an L2
/// penalty shrinks the weights on every update, so repeated `partial_fit`
/// calls across process restarts behave like one long fit as long as the
/// serialized state is carried over.
///
/// A freshly constructed regressor has all-zero weights and predicts 0.0
/// for every input. The learned selector reads that as "no beneficial
/// move", which keeps an untrained model safe to query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SgdRegressor {
    weights: Vec<f32>,
    intercept: f32,
    /// Lifetime sample counter; drives the learning-rate schedule.
    t: u64,
}

impl Default for SgdRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl SgdRegressor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            weights: vec![0.0; PLANE_FEATURES],
            intercept: 0.0,
            t: 1,
        }
    }

    /// Number of samples consumed so far.
    #[must_use]
    pub fn samples_seen(&self) -> u64 {
        self.t - 1
    }

    /// Predicted score for one flattened plane.
    #[must_use]
    pub fn predict(&self, features: &[f32]) -> f32 {
        debug_assert_eq!(features.len(), self.weights.len());
        let dot: f32 = self
            .weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum();
        dot + self.intercept
    }

    /// Runs one SGD pass over `examples`, in order.
    ///
    /// Per sample: `eta = eta0 / t^power_t`, gradient of the squared loss is
    /// `predict(x) - y`, weights take the L2 shrinkage before the gradient
    /// step. The sample counter advances by one per example.
    #[expect(clippy::cast_precision_loss)]
    pub fn partial_fit(&mut self, examples: &[TrainingExample]) {
        for example in examples {
            let features = example.features();
            let eta = ETA0 / (self.t as f32).powf(POWER_T);
            let residual = self.predict(&features) - example.target();
            for (w, x) in self.weights.iter_mut().zip(features) {
                *w = *w * (1.0 - eta * ALPHA) - eta * residual * x;
            }
            self.intercept -= eta * residual;
            self.t += 1;
        }
    }
}

impl ScoreModel for SgdRegressor {
    fn predict(&self, features: &[f32]) -> f32 {
        Self::predict(self, features)
    }
}
