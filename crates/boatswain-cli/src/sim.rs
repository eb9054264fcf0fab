use boatswain_agent::{Command, Frame};
use boatswain_engine::{BOARD_COLS, BOARD_ROWS, Board, CellPos, GameMove, TILE_KINDS, score_board};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

/// Unrevealed cells seeded into every fresh run.
const INITIAL_HIDDEN: usize = 3;

/// Deterministic stand-in for the real game, driven by the same commands
/// the action collaborator would receive.
///
/// Keeps the true board internally and masks hidden cells to code 0 in the
/// frames it produces, so the agent's reveal and sampling paths run exactly
/// as against the real game. Swaps rotate the board, matched runs clear and
/// refill with random tiles until the board settles. A run ends after a
/// fixed budget of decision frames, so it terminates even when the agent
/// chooses not to move.
#[derive(Debug)]
pub struct GameSimulator {
    board: Board,
    hidden: [[bool; BOARD_COLS]; BOARD_ROWS],
    rng: Pcg32,
    frames_per_run: u32,
    frames_left: u32,
    score: u32,
}

impl GameSimulator {
    pub fn new(seed: u64, frames_per_run: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let board = settled_board(&mut rng);
        let hidden = pick_hidden(&mut rng);
        Self {
            board,
            hidden,
            rng,
            frames_per_run,
            frames_left: frames_per_run,
            score: 0,
        }
    }

    /// Total score cleared in the current run.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The frame perception would capture right now. Serving a level frame
    /// consumes one unit of the run budget.
    pub fn frame(&mut self) -> Frame {
        if self.frames_left == 0 {
            return Frame::game_over();
        }
        self.frames_left -= 1;
        let cells = (0..BOARD_ROWS)
            .map(|r| {
                (0..BOARD_COLS)
                    .map(|c| {
                        if self.hidden[r][c] {
                            0
                        } else {
                            self.board.cell(CellPos::new(r, c))
                        }
                    })
                    .collect()
            })
            .collect();
        Frame::level("level_1", cells)
    }

    /// Performs one agent command against the game state.
    pub fn apply(&mut self, command: &Command) {
        match command {
            Command::RevealTile { cell } => {
                self.hidden[cell.row()][cell.col()] = false;
            }
            Command::Swap { from, to, .. } => {
                let Ok(game_move) = GameMove::new(*from, *to) else {
                    return;
                };
                self.board = game_move.apply_to(&self.board);
                self.score += settle(&mut self.board, &mut self.rng);
            }
            Command::RestartRun => {
                self.board = settled_board(&mut self.rng);
                self.hidden = pick_hidden(&mut self.rng);
                self.frames_left = self.frames_per_run;
                self.score = 0;
            }
        }
    }
}

/// Clears matched runs and refills with random tiles until no run remains.
/// Returns the total score cleared, cascades included.
fn settle(board: &mut Board, rng: &mut Pcg32) -> u32 {
    let mut total = 0;
    loop {
        let result = score_board(board);
        if !result.has_match() {
            return total;
        }
        total += result.score();

        let mut grid = [[0_u8; BOARD_COLS]; BOARD_ROWS];
        for pos in Board::positions() {
            grid[pos.row()][pos.col()] = board.cell(pos);
        }
        for run in result.runs() {
            for i in 0..run.len {
                let (r, c) = match run.axis {
                    boatswain_engine::Axis::Row => (run.start.row(), run.start.col() + i),
                    boatswain_engine::Axis::Column => (run.start.row() + i, run.start.col()),
                };
                grid[r][c] = 0;
            }
        }
        for row in &mut grid {
            for cell in row {
                if *cell == 0 {
                    *cell = rng.random_range(1..=TILE_KINDS);
                }
            }
        }
        *board = Board::from_grid(grid).expect("refilled codes are valid tile types");
    }
}

/// A random board with no pre-existing match.
fn settled_board(rng: &mut Pcg32) -> Board {
    let mut grid = [[0_u8; BOARD_COLS]; BOARD_ROWS];
    for row in &mut grid {
        for cell in row {
            *cell = rng.random_range(1..=TILE_KINDS);
        }
    }
    let mut board = Board::from_grid(grid).expect("generated codes are valid tile types");
    let _ = settle(&mut board, rng);
    board
}

fn pick_hidden(rng: &mut Pcg32) -> [[bool; BOARD_COLS]; BOARD_ROWS] {
    let mut hidden = [[false; BOARD_COLS]; BOARD_ROWS];
    let mut placed = 0;
    while placed < INITIAL_HIDDEN {
        let r = rng.random_range(0..BOARD_ROWS);
        let c = rng.random_range(0..BOARD_COLS);
        if !hidden[r][c] {
            hidden[r][c] = true;
            placed += 1;
        }
    }
    hidden
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_opening_frame() {
        let a = GameSimulator::new(99, 10).frame();
        let b = GameSimulator::new(99, 10).frame();
        assert_eq!(a, b);
    }

    #[test]
    fn test_opening_board_has_no_match_and_hidden_cells() {
        let mut sim = GameSimulator::new(7, 10);
        assert!(!score_board(&sim.board).has_match());
        let frame = sim.frame();
        let unknowns: usize = frame
            .cells
            .iter()
            .flatten()
            .filter(|&&code| code == 0)
            .count();
        assert_eq!(unknowns, INITIAL_HIDDEN);
    }

    #[test]
    fn test_reveal_unmasks_cell() {
        let mut sim = GameSimulator::new(7, 10);
        let frame = sim.frame();
        let board = Board::from_matrix(&frame.cells).unwrap();
        let cell = board.unknown_cells().next().unwrap();
        sim.apply(&Command::RevealTile { cell });
        let after = Board::from_matrix(&sim.frame().cells).unwrap();
        assert_ne!(after.cell(cell), 0);
        assert_eq!(after.unknown_count(), INITIAL_HIDDEN - 1);
    }

    #[test]
    fn test_run_ends_after_frame_budget() {
        let mut sim = GameSimulator::new(3, 2);
        assert!(sim.frame().context.is_level());
        assert!(sim.frame().context.is_level());
        assert!(sim.frame().context.is_game_over());
        // game over frames repeat until the run restarts
        assert!(sim.frame().context.is_game_over());
        sim.apply(&Command::RestartRun);
        assert!(sim.frame().context.is_level());
        assert_eq!(sim.score(), 0);
    }

    #[test]
    fn test_board_always_settled_after_swap() {
        let mut sim = GameSimulator::new(11, 20);
        for c in 1..8 {
            let key = format!("A{c} to A{}", c + 1);
            sim.apply(&Command::swap(key.parse().unwrap()));
            assert!(!score_board(&sim.board).has_match());
        }
    }
}
