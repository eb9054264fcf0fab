/// Game state reported by perception for one frame.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameContext {
    /// In a level; the label is the raw perception state name.
    Level(String),
    /// The current run has ended.
    GameOver,
}

/// One perception frame: the recognized game state plus the raw cell
/// matrix. Cells are row-major codes as perception read them; the session
/// validates them into a board, so a garbled frame costs one cycle only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub context: GameContext,
    pub cells: Vec<Vec<u8>>,
}

impl Frame {
    #[must_use]
    pub fn level(label: impl Into<String>, cells: Vec<Vec<u8>>) -> Self {
        Self {
            context: GameContext::Level(label.into()),
            cells,
        }
    }

    #[must_use]
    pub fn game_over() -> Self {
        Self {
            context: GameContext::GameOver,
            cells: Vec::new(),
        }
    }
}
