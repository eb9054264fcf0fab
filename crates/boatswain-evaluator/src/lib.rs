//! Move selection strategies for the board-delta engine.
//!
//! This crate implements the decision half of a decision cycle: given the
//! candidate deltas produced by `boatswain-engine`, pick the one move to
//! play. Three interchangeable strategies share a single capability:
//!
//! - [`RandomSelector`](move_selector::RandomSelector) - uniform random
//!   axis-aligned move, used while gathering training history.
//! - [`GreedyMatchedSelector`](move_selector::GreedyMatchedSelector) -
//!   heuristic bot play: largest matching span class first (5, 4, 3),
//!   random within the class.
//! - [`LearnedSelector`](move_selector::LearnedSelector) - ranks every
//!   exhaustive delta with a [`ScoreModel`](score_model::ScoreModel)
//!   prediction per tile plane and plays the strict maximum.
//!
//! The [`ScoreModel`](score_model::ScoreModel) trait is the read-only seam
//! to the online learner: selectors query predictions but never mutate the
//! model.

pub mod move_selector;
pub mod score_model;
