use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::InvalidMove;

use super::board::{Axis, Board, CellPos, ParseCellError};

/// One legal tile-swap move: drag the tile at `start` to `end` along a
/// shared row or column.
///
/// Applying a move rotates the closed `start..=end` interval by one
/// position: the dragged tile lands on `end` and every tile it passed
/// shifts one cell toward `start`. The canonical string identifier is
/// `"<start> to <end>"` (e.g. `"A1 to A4"`), produced by `Display` and
/// parsed by `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameMove {
    start: CellPos,
    end: CellPos,
}

impl GameMove {
    /// Creates a move, validating that both endpoints share exactly one
    /// axis and differ.
    pub fn new(start: CellPos, end: CellPos) -> Result<Self, InvalidMove> {
        if start == end {
            return Err(InvalidMove::SameCell(start));
        }
        if start.row() != end.row() && start.col() != end.col() {
            return Err(InvalidMove::AxisMismatch(start, end));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(self) -> CellPos {
        self.start
    }

    #[must_use]
    pub fn end(self) -> CellPos {
        self.end
    }

    /// Axis the move travels along.
    #[must_use]
    pub fn axis(self) -> Axis {
        if self.start.row() == self.end.row() {
            Axis::Row
        } else {
            Axis::Column
        }
    }

    /// Number of cells the dragged tile travels (1..=7 on a row,
    /// 1..=5 on a column).
    #[must_use]
    pub fn span(self) -> usize {
        match self.axis() {
            Axis::Row => self.start.col().abs_diff(self.end.col()),
            Axis::Column => self.start.row().abs_diff(self.end.row()),
        }
    }

    /// Applies the move to a copy of `board` and returns the resulting
    /// board. The input is never mutated.
    #[must_use]
    pub fn apply_to(self, board: &Board) -> Board {
        let mut next = board.clone();
        let moved = board.cell(self.start);
        match self.axis() {
            Axis::Row => {
                let row = self.start.row();
                let (from, to) = (self.start.col(), self.end.col());
                if from < to {
                    for c in from..to {
                        next.set_cell(CellPos::new(row, c), board.cell(CellPos::new(row, c + 1)));
                    }
                } else {
                    for c in (to + 1..=from).rev() {
                        next.set_cell(CellPos::new(row, c), board.cell(CellPos::new(row, c - 1)));
                    }
                }
            }
            Axis::Column => {
                let col = self.start.col();
                let (from, to) = (self.start.row(), self.end.row());
                if from < to {
                    for r in from..to {
                        next.set_cell(CellPos::new(r, col), board.cell(CellPos::new(r + 1, col)));
                    }
                } else {
                    for r in (to + 1..=from).rev() {
                        next.set_cell(CellPos::new(r, col), board.cell(CellPos::new(r - 1, col)));
                    }
                }
            }
        }
        next.set_cell(self.end, moved);
        next
    }
}

impl fmt::Display for GameMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid move key: {_0:?}")]
pub struct ParseMoveError(#[error(not(source))] String);

impl From<ParseCellError> for ParseMoveError {
    fn from(err: ParseCellError) -> Self {
        Self(err.0)
    }
}

impl FromStr for GameMove {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(" to ")
            .ok_or_else(|| ParseMoveError(s.to_owned()))?;
        let start: CellPos = start.parse()?;
        let end: CellPos = end.parse()?;
        Self::new(start, end).map_err(|_| ParseMoveError(s.to_owned()))
    }
}

impl Serialize for GameMove {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for GameMove {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
