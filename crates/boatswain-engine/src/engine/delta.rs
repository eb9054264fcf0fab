use crate::core::{BOARD_COLS, BOARD_ROWS, Board, CellPos, GameMove};

use super::matching::score_board;

/// A candidate move paired with the board it produces.
///
/// The board is a full snapshot created by applying the move to a private
/// copy of the source board; it never aliases the source's storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDelta {
    game_move: GameMove,
    board: Board,
}

impl BoardDelta {
    #[must_use]
    pub fn game_move(&self) -> GameMove {
        self.game_move
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Canonical `"<start> to <end>"` identifier of the underlying move.
    #[must_use]
    pub fn key(&self) -> String {
        self.game_move.to_string()
    }
}

/// Every legal move on the 6x8 grid, in deterministic order: for each row
/// all ordered (start, end) column pairs, then for each column all ordered
/// (start, end) row pairs. Rotating an interval start-to-end differs from
/// end-to-start, so both orderings of a pair are distinct moves.
pub fn all_moves() -> impl Iterator<Item = GameMove> {
    let row_moves = (0..BOARD_ROWS).flat_map(|r| {
        (0..BOARD_COLS).flat_map(move |start| {
            (0..BOARD_COLS).filter_map(move |end| {
                GameMove::new(CellPos::new(r, start), CellPos::new(r, end)).ok()
            })
        })
    });
    let col_moves = (0..BOARD_COLS).flat_map(|c| {
        (0..BOARD_ROWS).flat_map(move |start| {
            (0..BOARD_ROWS).filter_map(move |end| {
                GameMove::new(CellPos::new(start, c), CellPos::new(end, c)).ok()
            })
        })
    });
    row_moves.chain(col_moves)
}

/// Exhaustive mode: simulates every legal move against `board` and returns
/// the resulting deltas in the order of [`all_moves`].
///
/// The source board is never mutated. For 6x8 this always yields
/// 6*(8*7) + 8*(6*5) = 576 deltas.
#[must_use]
pub fn generate_deltas(board: &Board) -> Vec<BoardDelta> {
    all_moves()
        .map(|game_move| BoardDelta {
            game_move,
            board: game_move.apply_to(board),
        })
        .collect()
}

/// Bounded mode support: all moves of exactly `span` cells whose resulting
/// board contains at least one match, in enumeration order.
///
/// The span-class priority loop (5, then 4, then 3) and the random
/// tie-break within a class belong to the greedy selector; this function
/// only answers "which moves of this span match".
#[must_use]
pub fn matching_moves_with_span(board: &Board, span: usize) -> Vec<GameMove> {
    all_moves()
        .filter(|m| m.span() == span)
        .filter(|m| score_board(&m.apply_to(board)).has_match())
        .collect()
}
