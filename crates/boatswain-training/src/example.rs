use boatswain_engine::{Board, PLANE_FEATURES, TILE_KINDS, TilePlane, generate_deltas, score_plane};
use serde::{Deserialize, Serialize};

/// One labeled observation: a tile plane and its match score.
///
/// The learner never sees a whole board; every sampled board is decomposed
/// into 7 planes and every simulated delta contributes 7 more, each labeled
/// by the plane scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    plane: TilePlane,
    score: u32,
}

impl TrainingExample {
    #[must_use]
    pub fn new(plane: TilePlane, score: u32) -> Self {
        Self { plane, score }
    }

    #[must_use]
    pub fn plane(&self) -> &TilePlane {
        &self.plane
    }

    #[must_use]
    pub fn features(&self) -> [f32; PLANE_FEATURES] {
        self.plane.to_feature_vec()
    }

    /// The regression target.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn target(&self) -> f32 {
        self.score as f32
    }
}

/// Builds the full example set for one sampled board: every exhaustive
/// delta crossed with every tile plane, labeled by the plane scorer.
///
/// For a 6x8 board this yields 576 * 7 = 4032 examples.
#[must_use]
pub fn examples_from_board(board: &Board) -> Vec<TrainingExample> {
    let mut examples = Vec::with_capacity(576 * usize::from(TILE_KINDS));
    for delta in generate_deltas(board) {
        for tile in 1..=TILE_KINDS {
            let plane = delta.board().plane(tile);
            let score = score_plane(&plane);
            examples.push(TrainingExample::new(plane, score));
        }
    }
    examples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_count_per_board() {
        let board = Board::from_ascii(
            "
            12345671
            34567123
            56712345
            71234567
            23456712
            45671234
            ",
        );
        let examples = examples_from_board(&board);
        assert_eq!(examples.len(), 576 * 7);
    }

    #[test]
    fn test_labels_match_plane_scorer() {
        let board = Board::from_ascii(
            "
            44412121
            21212121
            12121212
            21212121
            12121212
            21212121
            ",
        );
        for example in examples_from_board(&board) {
            assert_eq!(example.score, score_plane(example.plane()));
        }
    }

    #[test]
    fn test_example_serde_round_trip() {
        let board = Board::from_ascii(
            "
            555.....
            ........
            ........
            ........
            ........
            .......5
            ",
        );
        let plane = board.plane(5);
        let example = TrainingExample::new(plane, score_plane(&plane));
        let json = serde_json::to_string(&example).unwrap();
        let back: TrainingExample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, example);
    }
}
