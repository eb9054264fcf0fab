use boatswain_engine::{
    BOARD_COLS, BOARD_ROWS, Board, CellPos, GameMove, TILE_KINDS, generate_deltas,
    matching_moves_with_span,
};
use rand::{Rng, seq::IndexedRandom as _};

use crate::score_model::ScoreModel;

/// Span classes the greedy strategy probes, largest first. The first class
/// with at least one matching move wins.
const GREEDY_SPANS: [usize; 3] = [5, 4, 3];

/// Picks one move for the current board, or `None` when no legal or
/// beneficial candidate exists. Callers treat `None` as "no move this
/// cycle" rather than an error.
pub trait MoveSelector {
    fn choose(&mut self, board: &Board) -> Option<GameMove>;
}

/// Uniform-random strategy used while gathering training history.
///
/// Picks either a row move (random row, starting at column 1, random span
/// 1..=7) or a column move (random column, starting at row A, random span
/// 1..=5), each axis with equal probability. Always returns a move.
#[derive(Debug)]
pub struct RandomSelector<R> {
    rng: R,
}

impl<R> RandomSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MoveSelector for RandomSelector<R> {
    fn choose(&mut self, _board: &Board) -> Option<GameMove> {
        let game_move = if self.rng.random_bool(0.5) {
            let row = self.rng.random_range(0..BOARD_ROWS);
            let end_col = self.rng.random_range(1..BOARD_COLS);
            GameMove::new(CellPos::new(row, 0), CellPos::new(row, end_col))
        } else {
            let col = self.rng.random_range(0..BOARD_COLS);
            let end_row = self.rng.random_range(1..BOARD_ROWS);
            GameMove::new(CellPos::new(0, col), CellPos::new(end_row, col))
        };
        Some(game_move.expect("endpoints differ and share an axis by construction"))
    }
}

/// Greedy heuristic strategy ("bot" play).
///
/// Probes span classes 5, 4, 3 in that order and stops at the first class
/// containing a move whose delta produces a match, choosing uniformly at
/// random within the class. Returns `None` when no probed span matches.
#[derive(Debug)]
pub struct GreedyMatchedSelector<R> {
    rng: R,
}

impl<R> GreedyMatchedSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MoveSelector for GreedyMatchedSelector<R> {
    fn choose(&mut self, board: &Board) -> Option<GameMove> {
        for span in GREEDY_SPANS {
            let candidates = matching_moves_with_span(board, span);
            if let Some(game_move) = candidates.choose(&mut self.rng) {
                return Some(*game_move);
            }
        }
        None
    }
}

/// Learned strategy ("predict" play).
///
/// Generates the exhaustive delta set, encodes every tile plane of every
/// resulting board and asks the score model for a prediction. The move
/// with the strictly greatest prediction wins; on exact ties the first
/// candidate in enumeration order is kept, which makes the choice fully
/// deterministic for a fixed model and board. Returns `None` when every
/// prediction is non-positive or no candidates exist.
#[derive(Debug)]
pub struct LearnedSelector<M> {
    model: M,
}

impl<M> LearnedSelector<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }
}

impl<M: ScoreModel> MoveSelector for LearnedSelector<M> {
    fn choose(&mut self, board: &Board) -> Option<GameMove> {
        let mut top_score = 0.0_f32;
        let mut top_move = None;

        for delta in generate_deltas(board) {
            for tile in 1..=TILE_KINDS {
                let features = delta.board().plane(tile).to_feature_vec();
                let score = self.model.predict(&features);
                if score > top_score {
                    top_score = score;
                    top_move = Some(delta.game_move());
                }
            }
        }

        top_move
    }
}

#[cfg(test)]
mod tests {
    use boatswain_engine::{score_board, score_plane};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(0x0ddba11)
    }

    #[test]
    fn test_random_selector_always_returns_legal_move() {
        let board = Board::from_ascii(
            "
            12121212
            21212121
            12121212
            21212121
            12121212
            21212121
            ",
        );
        let mut selector = RandomSelector::new(rng());
        for _ in 0..200 {
            let m = selector.choose(&board).unwrap();
            match m.axis() {
                boatswain_engine::Axis::Row => {
                    assert_eq!(m.start().col(), 0);
                    assert!(m.span() <= 7);
                }
                boatswain_engine::Axis::Column => {
                    assert_eq!(m.start().row(), 0);
                    assert!(m.span() <= 5);
                }
            }
        }
    }

    /// Board engineered so that exactly one span-5 move (`A1 to A6`) lines
    /// up a match and no span-4 or span-3 move does.
    fn span_5_only_board() -> Board {
        Board::from_ascii(
            "
            12345611
            34567423
            56712345
            71234567
            23456712
            45671234
            ",
        )
    }

    #[test]
    fn test_greedy_returns_the_only_span_5_match() {
        let board = span_5_only_board();
        let expected: GameMove = "A1 to A6".parse().unwrap();

        assert_eq!(matching_moves_with_span(&board, 5), vec![expected]);
        assert!(matching_moves_with_span(&board, 4).is_empty());
        assert!(matching_moves_with_span(&board, 3).is_empty());

        let mut selector = GreedyMatchedSelector::new(rng());
        assert_eq!(selector.choose(&board), Some(expected));
    }

    #[test]
    fn test_greedy_returns_none_without_matching_span() {
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
        let mut selector = GreedyMatchedSelector::new(rng());
        assert_eq!(selector.choose(&board), None);
    }

    /// Model that strictly prefers one target plane over everything else.
    #[derive(Debug)]
    struct TargetModel {
        target: Vec<f32>,
    }

    impl ScoreModel for TargetModel {
        fn predict(&self, features: &[f32]) -> f32 {
            if features == self.target.as_slice() { 10.0 } else { 0.0 }
        }
    }

    #[test]
    fn test_learned_returns_strictly_preferred_candidate() {
        let board = span_5_only_board();
        // target the tile-1 plane of the board produced by "A1 to A6";
        // pick the first delta carrying that exact plane so uniqueness of
        // the plane is not assumed.
        let target_move: GameMove = "A1 to A6".parse().unwrap();
        let target = target_move.apply_to(&board).plane(1).to_feature_vec();
        let expected = generate_deltas(&board)
            .into_iter()
            .find(|d| d.board().plane(1).to_feature_vec() == target)
            .unwrap()
            .game_move();

        let mut selector = LearnedSelector::new(TargetModel {
            target: target.to_vec(),
        });
        assert_eq!(selector.choose(&board), Some(expected));
    }

    /// Model returning a constant score for every plane.
    #[derive(Debug)]
    struct ConstModel(f32);

    impl ScoreModel for ConstModel {
        fn predict(&self, _features: &[f32]) -> f32 {
            self.0
        }
    }

    #[test]
    fn test_learned_returns_none_on_non_positive_predictions() {
        let board = span_5_only_board();
        assert_eq!(LearnedSelector::new(ConstModel(0.0)).choose(&board), None);
        assert_eq!(LearnedSelector::new(ConstModel(-1.5)).choose(&board), None);
    }

    #[test]
    fn test_learned_tie_break_keeps_first_candidate() {
        let board = span_5_only_board();
        let mut selector = LearnedSelector::new(ConstModel(1.0));
        // all candidates tie at 1.0; the first delta in enumeration order wins
        let first = generate_deltas(&board)[0].game_move();
        assert_eq!(selector.choose(&board), Some(first));
    }

    /// Oracle that scores a plane by decoding it and re-running the match
    /// scorer, i.e. a model "trained" to perfection.
    #[derive(Debug)]
    struct OracleModel;

    impl ScoreModel for OracleModel {
        #[expect(clippy::cast_precision_loss)]
        fn predict(&self, features: &[f32]) -> f32 {
            let mut grid = [[0_u8; BOARD_COLS]; BOARD_ROWS];
            for (i, pos) in Board::positions().enumerate() {
                if features[i] > 0.5 {
                    grid[pos.row()][pos.col()] = 1;
                }
            }
            let board = Board::from_grid(grid).unwrap();
            score_plane(&board.plane(1)) as f32
        }
    }

    #[test]
    fn test_end_to_end_learned_play_on_single_run_board() {
        // fully revealed board with a single horizontal run of four 5s at
        // row C, columns 3-6, and no other run
        let board = Board::from_ascii(
            "
            12345671
            34567123
            56555545
            71234567
            23456712
            45671234
            ",
        );
        let result = score_board(&board);
        assert!(result.score() > 0);
        assert_eq!(result.runs().len(), 1);
        assert_eq!(result.runs()[0].len, 4);

        let mut selector = LearnedSelector::new(OracleModel);
        let chosen = selector.choose(&board).unwrap();

        // the oracle-guided choice is exactly the first candidate whose
        // delta attains the maximum per-plane score
        let best = generate_deltas(&board)
            .iter()
            .flat_map(|d| (1..=TILE_KINDS).map(move |t| score_plane(&d.board().plane(t))))
            .max()
            .unwrap();
        assert!(best > 0);
        let chosen_best = (1..=TILE_KINDS)
            .map(|t| score_plane(&chosen.apply_to(&board).plane(t)))
            .max()
            .unwrap();
        assert_eq!(chosen_best, best);
    }
}
