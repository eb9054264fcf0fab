use std::fmt;

/// Predicts the expected match score of one encoded tile plane.
///
/// Implementations must tolerate being queried before any training has
/// happened by returning a neutral (non-positive) value instead of
/// failing; the learned selector treats non-positive predictions as "no
/// beneficial move".
pub trait ScoreModel: fmt::Debug {
    /// Returns the expected match score for a flattened boolean plane.
    fn predict(&self, features: &[f32]) -> f32;
}

impl<M: ScoreModel + ?Sized> ScoreModel for &M {
    fn predict(&self, features: &[f32]) -> f32 {
        (**self).predict(features)
    }
}
