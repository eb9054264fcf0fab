//! Online learning for the board-delta engine.
//!
//! The learner never sees a whole board: training flows per tile plane. At
//! the end of a game run the agent turns a handful of sampled boards into
//! `(plane, score)` examples, persists them as one batch per run, and every
//! training round re-fits an incremental SGD regressor on the most recent
//! batches. The regressor implements the evaluator's `ScoreModel` seam, so
//! a partially trained model can drive move selection immediately.
//!
//! - [`regressor`]: incremental squared-loss SGD linear model
//! - [`example`]: training example construction from boards
//! - [`batch_store`]: per-run batch persistence (JSON files or in-memory)
//! - [`trainer`]: the recent-window training round

pub mod batch_store;
pub mod example;
pub mod regressor;
pub mod trainer;
