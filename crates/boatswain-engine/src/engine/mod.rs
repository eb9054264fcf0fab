//! Move simulation and match scoring.
//!
//! This module provides the decision-cycle machinery built on top of the
//! core grid types:
//!
//! - [`delta`] - Enumerates legal moves and simulates each one against a
//!   private copy of the board, producing [`BoardDelta`] snapshots.
//! - [`matching`] - Detects matched runs on a board and computes the
//!   numeric match score used for both move selection and training labels.
//!
//! # Decision flow
//!
//! ```text
//! Board (from perception)
//!     -> generate_deltas (candidate moves + resulting boards)
//!     -> score_board per candidate
//!     -> selection (boatswain-evaluator)
//! ```
//!
//! Deltas never alias the source board; for a fixed board the candidate set
//! and its order are fully deterministic.

pub use self::{delta::*, matching::*};

mod delta;
mod matching;
