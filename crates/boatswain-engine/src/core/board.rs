use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::MalformedBoard;

use super::{BOARD_COLS, BOARD_ROWS, TILE_KINDS, plane::TilePlane};

/// Axis a move travels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

/// A cell coordinate on the 6x8 grid.
///
/// Displays in the external `<row letter><column number>` convention
/// (`A1`..`F8`) used by the action collaborator, and parses back from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    row: usize,
    col: usize,
}

impl CellPos {
    /// Creates a cell position.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        assert!(
            row < BOARD_ROWS && col < BOARD_COLS,
            "cell ({row}, {col}) out of bounds for {BOARD_ROWS}x{BOARD_COLS} board"
        );
        Self { row, col }
    }

    #[must_use]
    pub fn row(self) -> usize {
        self.row
    }

    #[must_use]
    pub fn col(self) -> usize {
        self.col
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = char::from(b'A' + u8::try_from(self.row).unwrap());
        write!(f, "{}{}", letter, self.col + 1)
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid cell identifier: {_0:?}")]
pub struct ParseCellError(#[error(not(source))] pub(crate) String);

impl FromStr for CellPos {
    type Err = ParseCellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCellError(s.to_owned());
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(err)?;
        let row = match letter {
            'A'..='F' => (letter as usize) - ('A' as usize),
            _ => return Err(err()),
        };
        let col: usize = chars.as_str().parse().map_err(|_| err())?;
        if !(1..=BOARD_COLS).contains(&col) {
            return Err(err());
        }
        Ok(Self { row, col: col - 1 })
    }
}

/// Snapshot of the puzzle grid for one decision cycle.
///
/// Cell codes are `0..=7`: 0 is an unknown/unrevealed tile, `1..=7` identify
/// a tile type. Boards are value-like: no public mutation exists, and every
/// simulated move produces a fresh board via
/// [`GameMove::apply_to`](super::GameMove::apply_to).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[u8; BOARD_COLS]; BOARD_ROWS],
}

impl Board {
    /// Builds a board from a raw row-major matrix supplied by perception.
    ///
    /// Rejects wrong dimensions and out-of-range cell codes; a rejected
    /// frame aborts only the cycle that received it.
    pub fn from_matrix(rows: &[Vec<u8>]) -> Result<Self, MalformedBoard> {
        if rows.len() != BOARD_ROWS || rows.iter().any(|r| r.len() != BOARD_COLS) {
            return Err(MalformedBoard::WrongDimensions {
                rows: rows.len(),
                cols: rows.first().map_or(0, Vec::len),
                expected_rows: BOARD_ROWS,
                expected_cols: BOARD_COLS,
            });
        }
        let mut cells = [[0; BOARD_COLS]; BOARD_ROWS];
        for (r, row) in rows.iter().enumerate() {
            for (c, &code) in row.iter().enumerate() {
                if code > TILE_KINDS {
                    return Err(MalformedBoard::CodeOutOfRange {
                        cell: CellPos::new(r, c),
                        code,
                        max_code: TILE_KINDS,
                    });
                }
                cells[r][c] = code;
            }
        }
        Ok(Self { cells })
    }

    /// Like [`Self::from_matrix`], but from a fixed-size grid.
    pub fn from_grid(cells: [[u8; BOARD_COLS]; BOARD_ROWS]) -> Result<Self, MalformedBoard> {
        for (r, row) in cells.iter().enumerate() {
            for (c, &code) in row.iter().enumerate() {
                if code > TILE_KINDS {
                    return Err(MalformedBoard::CodeOutOfRange {
                        cell: CellPos::new(r, c),
                        code,
                        max_code: TILE_KINDS,
                    });
                }
            }
        }
        Ok(Self { cells })
    }

    /// Creates a `Board` from ASCII art for testing.
    ///
    /// Digits `1`-`7` are tile codes, `.` is an unknown cell. The art must
    /// have exactly 6 rows of 8 cells.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert_eq!(lines.len(), BOARD_ROWS, "board art must have {BOARD_ROWS} rows");

        let mut cells = [[0; BOARD_COLS]; BOARD_ROWS];
        for (r, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line
                .chars()
                .filter(|c| *c == '.' || c.is_ascii_digit())
                .collect();
            assert_eq!(
                chars.len(),
                BOARD_COLS,
                "each row must have exactly {BOARD_COLS} cells, got {} at row {r}",
                chars.len(),
            );
            for (c, &ch) in chars.iter().enumerate() {
                let code = if ch == '.' {
                    0
                } else {
                    u8::try_from(ch.to_digit(10).unwrap()).unwrap()
                };
                assert!(code <= TILE_KINDS, "tile code {code} out of range at row {r}");
                cells[r][c] = code;
            }
        }
        Self { cells }
    }

    /// Returns the cell code at the given position.
    #[must_use]
    pub fn cell(&self, pos: CellPos) -> u8 {
        self.cells[pos.row()][pos.col()]
    }

    pub(crate) fn set_cell(&mut self, pos: CellPos, code: u8) {
        self.cells[pos.row()][pos.col()] = code;
    }

    /// Iterates over all cell positions in row-major order.
    pub fn positions() -> impl Iterator<Item = CellPos> {
        (0..BOARD_ROWS).flat_map(|r| (0..BOARD_COLS).map(move |c| CellPos::new(r, c)))
    }

    /// Iterates over unknown (code 0) cells in row-major order.
    pub fn unknown_cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        Self::positions().filter(|pos| self.cell(*pos) == 0)
    }

    /// Number of unknown cells on the board.
    #[must_use]
    pub fn unknown_count(&self) -> usize {
        self.unknown_cells().count()
    }

    /// Isolates the cells of one tile type into a boolean plane.
    #[must_use]
    pub fn plane(&self, tile: u8) -> TilePlane {
        TilePlane::from_board(self, tile)
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Format: "12345670,00112233,..." (one digit string per row)
        let mut s = String::with_capacity(BOARD_ROWS * (BOARD_COLS + 1));
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                s.push(',');
            }
            for code in row {
                s.push(char::from(b'0' + code));
            }
        }
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != BOARD_ROWS {
            return Err(serde::de::Error::custom(format!(
                "expected {BOARD_ROWS} comma-separated rows, got {}",
                parts.len()
            )));
        }
        let mut cells = [[0; BOARD_COLS]; BOARD_ROWS];
        for (r, part) in parts.iter().enumerate() {
            if part.len() != BOARD_COLS {
                return Err(serde::de::Error::custom(format!(
                    "expected {BOARD_COLS} digits at row {r}, got {}",
                    part.len()
                )));
            }
            for (c, ch) in part.chars().enumerate() {
                let code = ch
                    .to_digit(10)
                    .filter(|d| *d <= u32::from(TILE_KINDS))
                    .ok_or_else(|| {
                        serde::de::Error::custom(format!("invalid cell code at row {r}: {ch:?}"))
                    })?;
                cells[r][c] = u8::try_from(code).unwrap();
            }
        }
        Ok(Self { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_pos_display_round_trip() {
        for pos in Board::positions() {
            let parsed: CellPos = pos.to_string().parse().unwrap();
            assert_eq!(parsed, pos);
        }
        assert_eq!(CellPos::new(0, 0).to_string(), "A1");
        assert_eq!(CellPos::new(5, 7).to_string(), "F8");
    }

    #[test]
    fn test_cell_pos_parse_rejects_garbage() {
        assert!("G1".parse::<CellPos>().is_err());
        assert!("A0".parse::<CellPos>().is_err());
        assert!("A9".parse::<CellPos>().is_err());
        assert!("A".parse::<CellPos>().is_err());
        assert!("".parse::<CellPos>().is_err());
    }

    #[test]
    fn test_from_matrix_accepts_valid_board() {
        let rows: Vec<Vec<u8>> = (0..6).map(|_| vec![1, 2, 3, 4, 5, 6, 7, 0]).collect();
        let board = Board::from_matrix(&rows).unwrap();
        assert_eq!(board.cell(CellPos::new(0, 0)), 1);
        assert_eq!(board.cell(CellPos::new(5, 7)), 0);
        assert_eq!(board.unknown_count(), 6);
    }

    #[test]
    fn test_from_matrix_rejects_wrong_dimensions() {
        let rows: Vec<Vec<u8>> = (0..5).map(|_| vec![1; 8]).collect();
        assert!(matches!(
            Board::from_matrix(&rows),
            Err(MalformedBoard::WrongDimensions { rows: 5, .. })
        ));

        let rows: Vec<Vec<u8>> = (0..6).map(|_| vec![1; 7]).collect();
        assert!(matches!(
            Board::from_matrix(&rows),
            Err(MalformedBoard::WrongDimensions { cols: 7, .. })
        ));
    }

    #[test]
    fn test_from_matrix_rejects_out_of_range_code() {
        let mut rows: Vec<Vec<u8>> = (0..6).map(|_| vec![1; 8]).collect();
        rows[2][3] = 8;
        let err = Board::from_matrix(&rows).unwrap_err();
        match err {
            MalformedBoard::CodeOutOfRange { cell, code, .. } => {
                assert_eq!(cell, CellPos::new(2, 3));
                assert_eq!(code, 8);
            }
            MalformedBoard::WrongDimensions { .. } => panic!("wrong error: {err}"),
        }
    }

    #[test]
    fn test_unknown_cells_in_row_major_order() {
        let board = Board::from_ascii(
            "
            .1111111
            11111111
            1111.111
            11111111
            11111111
            1111111.
            ",
        );
        let unknown: Vec<CellPos> = board.unknown_cells().collect();
        assert_eq!(
            unknown,
            vec![CellPos::new(0, 0), CellPos::new(2, 4), CellPos::new(5, 7)]
        );
        assert_eq!(board.unknown_count(), 3);
    }

    #[test]
    fn test_board_serde_round_trip() {
        let board = Board::from_ascii(
            "
            12345671
            23456712
            34567123
            45671234
            5671.345
            67123456
            ",
        );
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.contains("12345671"));
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_board_deserialize_rejects_bad_input() {
        assert!(serde_json::from_str::<Board>("\"12345678\"").is_err());
        let short = "\"1234567,1234567,1234567,1234567,1234567,1234567\"";
        assert!(serde_json::from_str::<Board>(short).is_err());
        let bad_code = "\"12345678,12345678,12345678,12345678,12345678,1234567x\"";
        assert!(serde_json::from_str::<Board>(bad_code).is_err());
        // 8 is not a valid tile code
        let out_of_range = "\"12345678,11111111,11111111,11111111,11111111,11111111\"";
        assert!(serde_json::from_str::<Board>(out_of_range).is_err());
    }
}
