//! The per-frame decision loop of the match-3 agent.
//!
//! A session consumes perception frames (a game-state label plus the raw
//! cell matrix) and answers each one with a short list of commands for the
//! action collaborator: reveal taps, at most one tile swap, or a run
//! restart. All learning happens at run boundaries; within a run the
//! session only collects board samples and counts outcomes.
//!
//! The session alternates between two play modes. Most runs use uniform
//! random moves to keep gathering unbiased training history; every
//! `train_interval`-th run re-fits the regressor on the recent batches and
//! plays that run with the learned selector.

pub use self::{command::*, frame::*, session::*};

mod command;
mod frame;
mod session;
