use std::fmt::Write as _;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{BOARD_COLS, BOARD_ROWS, TILE_KINDS, board::Board, board::CellPos};

/// Number of features produced by flattening one plane (6 x 8 cells).
pub const PLANE_FEATURES: usize = BOARD_ROWS * BOARD_COLS;

/// Boolean mask isolating the cells of one tile type.
///
/// Each row is stored as a `u8` bitmask where bit `c` is set when the cell
/// in column `c` holds the isolated tile type. This is the unit fed to the
/// regression model, both for training labels and for prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePlane {
    rows: [u8; BOARD_ROWS],
}

impl TilePlane {
    pub const EMPTY: Self = Self {
        rows: [0; BOARD_ROWS],
    };

    /// Builds the plane of `tile` from a board.
    ///
    /// # Panics
    ///
    /// Panics if `tile` is not a tile-type code (`1..=7`). Unknown cells
    /// (code 0) are never part of any plane.
    #[must_use]
    pub fn from_board(board: &Board, tile: u8) -> Self {
        assert!(
            (1..=TILE_KINDS).contains(&tile),
            "tile code {tile} is not a tile type"
        );
        let mut rows = [0_u8; BOARD_ROWS];
        for pos in Board::positions() {
            if board.cell(pos) == tile {
                rows[pos.row()] |= 1 << pos.col();
            }
        }
        Self { rows }
    }

    /// Checks whether the cell at the given position belongs to the plane.
    #[inline]
    #[must_use]
    pub fn is_set(&self, pos: CellPos) -> bool {
        (self.rows[pos.row()] >> pos.col()) & 1 != 0
    }

    /// Flattens the plane into the fixed-length feature vector consumed by
    /// the regression model (row-major, 1.0 for set cells).
    #[must_use]
    pub fn to_feature_vec(&self) -> [f32; PLANE_FEATURES] {
        let mut features = [0.0; PLANE_FEATURES];
        for (i, pos) in Board::positions().enumerate() {
            if self.is_set(pos) {
                features[i] = 1.0;
            }
        }
        features
    }

    /// Decodes the plane back into a board holding `tile` on set cells and
    /// unknown (0) everywhere else. Re-encoding the result with
    /// [`Board::plane`] yields this plane again.
    #[must_use]
    pub fn to_board(&self, tile: u8) -> Board {
        assert!(
            (1..=TILE_KINDS).contains(&tile),
            "tile code {tile} is not a tile type"
        );
        let mut grid = [[0; BOARD_COLS]; BOARD_ROWS];
        for pos in Board::positions() {
            if self.is_set(pos) {
                grid[pos.row()][pos.col()] = tile;
            }
        }
        Board::from_grid(grid).unwrap()
    }
}

impl Serialize for TilePlane {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Format: "1f,00,c3,..." (two hex chars per row)
        let mut hex = String::with_capacity(BOARD_ROWS * 3);
        for (r, bits) in self.rows.iter().enumerate() {
            if r > 0 {
                hex.push(',');
            }
            write!(&mut hex, "{bits:02x}").unwrap();
        }
        serializer.serialize_str(&hex)
    }
}

impl<'de> Deserialize<'de> for TilePlane {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != BOARD_ROWS {
            return Err(serde::de::Error::custom(format!(
                "expected {BOARD_ROWS} comma-separated hex values, got {}",
                parts.len()
            )));
        }
        let mut rows = [0_u8; BOARD_ROWS];
        for (r, hex) in parts.iter().enumerate() {
            rows[r] = u8::from_str_radix(hex, 16).map_err(|e| {
                serde::de::Error::custom(format!("invalid hex at row {r}: {hex} ({e})"))
            })?;
        }
        Ok(Self { rows })
    }
}
