use chrono::{DateTime, Utc};
use boatswain_training::regressor::SgdRegressor;
use serde::{Deserialize, Serialize};

/// Persisted trained model: the regressor state plus provenance metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreModelFile {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub samples_seen: u64,
    pub regressor: SgdRegressor,
}

impl ScoreModelFile {
    pub fn new(name: impl Into<String>, regressor: SgdRegressor) -> Self {
        Self {
            name: name.into(),
            trained_at: Utc::now(),
            samples_seen: regressor.samples_seen(),
            regressor,
        }
    }
}
