pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum MalformedBoard {
    #[display("board has {rows}x{cols} cells, expected {expected_rows}x{expected_cols}")]
    WrongDimensions {
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },
    #[display("cell {cell} holds code {code}, valid codes are 0..={max_code}")]
    CodeOutOfRange { cell: CellPos, code: u8, max_code: u8 },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum InvalidMove {
    #[display("move start and end are the same cell ({_0})")]
    SameCell(#[error(not(source))] CellPos),
    #[display("move endpoints {_0} and {_1} share no axis")]
    AxisMismatch(#[error(not(source))] CellPos, #[error(not(source))] CellPos),
}
