pub use self::{board::*, game_move::*, plane::*};

pub(crate) mod board;
pub(crate) mod game_move;
pub(crate) mod plane;

/// Number of rows on the puzzle grid (`A`..`F`).
pub const BOARD_ROWS: usize = 6;
/// Number of columns on the puzzle grid (`1`..`8`).
pub const BOARD_COLS: usize = 8;
/// Number of distinct tile types. Cell code 0 means "unknown".
pub const TILE_KINDS: u8 = 7;
