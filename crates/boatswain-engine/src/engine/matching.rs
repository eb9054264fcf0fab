use arrayvec::ArrayVec;

use crate::core::{Axis, BOARD_COLS, BOARD_ROWS, Board, CellPos, TILE_KINDS, TilePlane};

/// Minimum contiguous same-type sequence that counts as a match.
pub const MIN_RUN_LEN: usize = 3;

/// Value of a matched run by length.
///
/// Zero below [`MIN_RUN_LEN`], then strictly increasing with super-linear
/// increments over the threshold:
/// - 3 tiles: 3 points
/// - 4 tiles: 8 points
/// - 5 tiles: 15 points
/// - 6 tiles: 24 points
///
/// The curve only looks at the cell pattern; the tile-type code never
/// influences the value.
#[must_use]
pub const fn run_value(len: usize) -> u32 {
    if len < MIN_RUN_LEN {
        return 0;
    }
    (len * (len - 2)) as u32
}

/// One maximal matched run: `len` collinear cells of the same tile type
/// starting at `start` and extending along `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRun {
    pub axis: Axis,
    pub start: CellPos,
    pub len: usize,
    pub tile: u8,
}

/// Match outcome for one board: the total score and the runs behind it.
///
/// A cell sitting at the intersection of a row run and a column run
/// contributes to both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    score: u32,
    runs: Vec<MatchRun>,
}

impl MatchResult {
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn runs(&self) -> &[MatchRun] {
        &self.runs
    }

    #[must_use]
    pub fn has_match(&self) -> bool {
        self.score > 0
    }
}

/// Scores a board by reducing it to one boolean plane per tile type and
/// summing the plane scores.
#[must_use]
pub fn score_board(board: &Board) -> MatchResult {
    let mut result = MatchResult::default();
    for tile in 1..=TILE_KINDS {
        let plane = board.plane(tile);
        for run in plane_runs(&plane, tile) {
            result.score += run_value(run.len);
            result.runs.push(run);
        }
    }
    result
}

/// Scores a single boolean plane. Used both for candidate evaluation and
/// for labeling historical planes during training-example generation.
#[must_use]
pub fn score_plane(plane: &TilePlane) -> u32 {
    plane_runs(plane, 0).map(|run| run_value(run.len)).sum()
}

fn plane_runs(plane: &TilePlane, tile: u8) -> impl Iterator<Item = MatchRun> + '_ {
    let rows = (0..BOARD_ROWS).flat_map(move |r| {
        line_runs((0..BOARD_COLS).map(move |c| plane.is_set(CellPos::new(r, c))))
            .into_iter()
            .map(move |(start, len)| MatchRun {
                axis: Axis::Row,
                start: CellPos::new(r, start),
                len,
                tile,
            })
    });
    let cols = (0..BOARD_COLS).flat_map(move |c| {
        line_runs((0..BOARD_ROWS).map(move |r| plane.is_set(CellPos::new(r, c))))
            .into_iter()
            .map(move |(start, len)| MatchRun {
                axis: Axis::Column,
                start: CellPos::new(start, c),
                len,
                tile,
            })
    });
    rows.chain(cols)
}

/// Maximal runs of set cells with length >= [`MIN_RUN_LEN`] along one line,
/// as (start offset, length) pairs. At most two such runs fit on a line of
/// up to 8 cells.
fn line_runs(cells: impl Iterator<Item = bool>) -> ArrayVec<(usize, usize), 2> {
    let mut runs = ArrayVec::new();
    let mut current: Option<(usize, usize)> = None;
    for (i, set) in cells.enumerate() {
        match (&mut current, set) {
            (Some((_, len)), true) => *len += 1,
            (None, true) => current = Some((i, 1)),
            (Some((start, len)), false) => {
                if *len >= MIN_RUN_LEN {
                    runs.push((*start, *len));
                }
                current = None;
            }
            (None, false) => {}
        }
    }
    if let Some((start, len)) = current
        && len >= MIN_RUN_LEN
    {
        runs.push((start, len));
    }
    runs
}
