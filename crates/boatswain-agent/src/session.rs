use std::time::{Duration, Instant};

use boatswain_engine::{Board, MalformedBoard, score_board};
use boatswain_evaluator::move_selector::{LearnedSelector, MoveSelector as _, RandomSelector};
use boatswain_stats::rolling::RollingWindow;
use boatswain_training::{
    batch_store::BatchStore,
    example::examples_from_board,
    regressor::SgdRegressor,
    trainer::fit_recent_runs,
};
use rand::{SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;

use crate::{
    command::Command,
    frame::{Frame, GameContext},
};

/// Play mode for the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Mode {
    /// Uniform random moves, gathering unbiased training history.
    #[display("random")]
    Random,
    /// Learned moves from the regressor's predictions.
    #[display("predict")]
    Predict,
}

/// Failure of one decision cycle. Never fatal to the session; the caller
/// drops the cycle and waits for the next frame.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CycleError {
    #[display("frame rejected: {_0}")]
    MalformedBoard(MalformedBoard),
}

/// Session tunables, defaulting to the thresholds the agent was tuned with.
#[derive(Debug, Clone, Copy)]
pub struct AgentConfig {
    /// Sample the board into the run history when fewer unknown cells
    /// than this remain.
    pub sample_threshold: usize,
    /// Emit reveal taps when at most this many cells are unknown.
    pub reveal_threshold: usize,
    /// Every Nth run trains the model and plays in predict mode.
    pub train_interval: u64,
    /// Boards sampled into training examples per completed run.
    pub boards_per_run: usize,
    /// Capacity of the per-mode match-rate history windows.
    pub record_window: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            sample_threshold: 5,
            reveal_threshold: 10,
            train_interval: 10,
            boards_per_run: 3,
            record_window: 1000,
        }
    }
}

/// Aggregate outcome tracking across runs.
#[derive(Debug)]
pub struct SessionStats {
    pub runs_completed: u64,
    pub last_attempts: u32,
    pub last_matches: u32,
    pub last_duration: Duration,
    /// Most matches achieved in any single run.
    pub record_matches: u32,
    /// Per-run match rate history of random-mode runs.
    pub random_match_rate: RollingWindow,
    /// Per-run match rate history of predict-mode runs.
    pub predict_match_rate: RollingWindow,
    /// Batches lost to persistence failures. Accepted data loss.
    pub failed_batch_saves: u64,
    /// Batches skipped during training rounds because they failed to load.
    pub skipped_training_batches: u64,
}

impl SessionStats {
    fn new(record_window: usize) -> Self {
        Self {
            runs_completed: 0,
            last_attempts: 0,
            last_matches: 0,
            last_duration: Duration::ZERO,
            record_matches: 0,
            random_match_rate: RollingWindow::new(record_window),
            predict_match_rate: RollingWindow::new(record_window),
            failed_batch_saves: 0,
            skipped_training_batches: 0,
        }
    }
}

/// The frame-driven agent: one `handle_frame` call per perception cycle,
/// strictly sequential. Holds the online model, the batch store, and all
/// per-run state; the model is mutated only inside the end-of-run commit.
#[derive(Debug)]
pub struct AgentSession<S> {
    config: AgentConfig,
    mode: Mode,
    model: SgdRegressor,
    store: S,
    rng: Pcg32,
    attempts: u32,
    matches: u32,
    sampled: Vec<Board>,
    run_started: Instant,
    stats: SessionStats,
}

impl<S: BatchStore> AgentSession<S> {
    #[must_use]
    pub fn new(config: AgentConfig, store: S, seed: u64) -> Self {
        let stats = SessionStats::new(config.record_window);
        Self {
            config,
            mode: Mode::Random,
            model: SgdRegressor::new(),
            store,
            rng: Pcg32::seed_from_u64(seed),
            attempts: 0,
            matches: 0,
            sampled: Vec::new(),
            run_started: Instant::now(),
            stats,
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn model(&self) -> &SgdRegressor {
        &self.model
    }

    /// Handles one perception frame and returns the commands to perform.
    ///
    /// A malformed board aborts only this cycle; session state carries
    /// over to the next frame unchanged.
    pub fn handle_frame(&mut self, frame: &Frame) -> Result<Vec<Command>, CycleError> {
        match &frame.context {
            GameContext::Level(_) => self.handle_level(&frame.cells),
            GameContext::GameOver => Ok(self.handle_game_over()),
        }
    }

    fn handle_level(&mut self, cells: &[Vec<u8>]) -> Result<Vec<Command>, CycleError> {
        let board = Board::from_matrix(cells)?;
        self.attempts += 1;

        let mut commands = Vec::new();

        let unknown = board.unknown_count();
        if unknown > 0 && unknown <= self.config.reveal_threshold {
            commands.extend(
                board
                    .unknown_cells()
                    .map(|cell| Command::RevealTile { cell }),
            );
        }
        if unknown < self.config.sample_threshold {
            self.sampled.push(board.clone());
        }

        let chosen = match self.mode {
            Mode::Random => RandomSelector::new(&mut self.rng).choose(&board),
            Mode::Predict => LearnedSelector::new(&self.model).choose(&board),
        };
        if let Some(game_move) = chosen {
            if score_board(&game_move.apply_to(&board)).has_match() {
                self.matches += 1;
            }
            commands.push(Command::swap(game_move));
        }

        Ok(commands)
    }

    /// End-of-run commit: persist the batch, fold the run into the stats,
    /// pick the next mode (training first when due), reset run state.
    #[expect(clippy::cast_precision_loss)]
    fn handle_game_over(&mut self) -> Vec<Command> {
        let run = self.stats.runs_completed + 1;

        if self.sampled.len() >= self.config.boards_per_run {
            let boards: Vec<&Board> = self
                .sampled
                .choose_multiple(&mut self.rng, self.config.boards_per_run)
                .collect();
            let mut examples = Vec::new();
            for board in boards {
                examples.extend(examples_from_board(board));
            }
            if self.store.save_batch(run, &examples).is_err() {
                self.stats.failed_batch_saves += 1;
            }
        }

        let match_rate = if self.attempts > 0 {
            self.matches as f32 / self.attempts as f32
        } else {
            0.0
        };
        match self.mode {
            Mode::Random => self.stats.random_match_rate.push(match_rate),
            Mode::Predict => self.stats.predict_match_rate.push(match_rate),
        }
        self.stats.last_attempts = self.attempts;
        self.stats.last_matches = self.matches;
        self.stats.last_duration = self.run_started.elapsed();
        self.stats.record_matches = self.stats.record_matches.max(self.matches);
        self.stats.runs_completed = run;

        if run % self.config.train_interval == 0 {
            let report = fit_recent_runs(&mut self.model, &self.store, run);
            self.stats.skipped_training_batches += report.skipped.len() as u64;
            self.mode = Mode::Predict;
        } else {
            self.mode = Mode::Random;
        }

        self.attempts = 0;
        self.matches = 0;
        self.sampled.clear();
        self.run_started = Instant::now();

        vec![Command::RestartRun]
    }
}

#[cfg(test)]
mod tests {
    use boatswain_engine::CellPos;
    use boatswain_training::batch_store::MemoryBatchStore;

    use super::*;

    fn session() -> AgentSession<MemoryBatchStore> {
        AgentSession::new(AgentConfig::default(), MemoryBatchStore::new(), 42)
    }

    fn cells_of(art: &str) -> Vec<Vec<u8>> {
        let board = Board::from_ascii(art);
        (0..6)
            .map(|r| (0..8).map(|c| board.cell(CellPos::new(r, c))).collect())
            .collect()
    }

    fn rainbow() -> Vec<Vec<u8>> {
        cells_of(
            "
            12345671
            34567123
            56712345
            71234567
            23456712
            45671234
            ",
        )
    }

    #[test]
    fn test_mode_switch_schedule() {
        let mut session = session();
        for run in 1..=20_u64 {
            session.handle_frame(&Frame::level("level_1", rainbow())).unwrap();
            let commands = session.handle_frame(&Frame::game_over()).unwrap();
            assert_eq!(commands, vec![Command::RestartRun]);
            let expect_predict = run.is_multiple_of(10);
            assert_eq!(session.mode().is_predict(), expect_predict, "after run {run}");
        }
        assert_eq!(session.stats().runs_completed, 20);
    }

    #[test]
    fn test_reveal_commands_for_few_unknowns() {
        let mut session = session();
        let cells = cells_of(
            "
            .2345671
            34567123
            567.2345
            71234567
            23456712
            4567123.
            ",
        );
        let commands = session.handle_frame(&Frame::level("level_1", cells)).unwrap();
        let reveals: Vec<CellPos> = commands
            .iter()
            .filter_map(|c| match c {
                Command::RevealTile { cell } => Some(*cell),
                _ => None,
            })
            .collect();
        assert_eq!(
            reveals,
            vec![CellPos::new(0, 0), CellPos::new(2, 3), CellPos::new(5, 7)]
        );
    }

    #[test]
    fn test_no_reveal_above_threshold() {
        let mut session = session();
        // 16 unknown cells, over the reveal threshold of 10
        let cells = cells_of(
            "
            ........
            ........
            56712345
            71234567
            23456712
            45671234
            ",
        );
        let commands = session.handle_frame(&Frame::level("level_1", cells)).unwrap();
        assert!(
            !commands
                .iter()
                .any(|c| matches!(c, Command::RevealTile { .. }))
        );
    }

    #[test]
    fn test_sampling_threshold() {
        let mut session = session();
        // 4 unknowns: below the sample threshold of 5, sampled
        let four = cells_of(
            "
            ....5671
            34567123
            56712345
            71234567
            23456712
            45671234
            ",
        );
        session.handle_frame(&Frame::level("level_1", four)).unwrap();
        assert_eq!(session.sampled.len(), 1);

        // 5 unknowns: at the threshold, not sampled
        let five = cells_of(
            "
            .....671
            34567123
            56712345
            71234567
            23456712
            45671234
            ",
        );
        session.handle_frame(&Frame::level("level_1", five)).unwrap();
        assert_eq!(session.sampled.len(), 1);
    }

    #[test]
    fn test_malformed_frame_costs_one_cycle() {
        let mut session = session();
        let mut cells = rainbow();
        cells.pop();
        let err = session
            .handle_frame(&Frame::level("level_1", cells))
            .unwrap_err();
        assert!(matches!(err, CycleError::MalformedBoard(_)));
        // the session keeps working on the next frame
        assert!(session.handle_frame(&Frame::level("level_1", rainbow())).is_ok());
        assert_eq!(session.attempts, 1);
    }

    #[test]
    fn test_match_counting_per_cycle() {
        let mut session = session();
        // uniform board: every possible swap still scores
        let uniform = cells_of(
            "
            11111111
            11111111
            11111111
            11111111
            11111111
            11111111
            ",
        );
        session.handle_frame(&Frame::level("level_1", uniform)).unwrap();
        assert_eq!(session.matches, 1);

        // rainbow board: no single move can create a run
        session.handle_frame(&Frame::level("level_1", rainbow())).unwrap();
        assert_eq!(session.matches, 1);
        assert_eq!(session.attempts, 2);
    }

    #[test]
    fn test_batch_persisted_after_enough_samples() {
        let mut session = session();
        for _ in 0..3 {
            session.handle_frame(&Frame::level("level_1", rainbow())).unwrap();
        }
        session.handle_frame(&Frame::game_over()).unwrap();
        let batch = session.store.load_batch(1).unwrap();
        // 3 boards, 576 deltas each, 7 planes per delta
        assert_eq!(batch.len(), 3 * 576 * 7);
        assert_eq!(session.stats().failed_batch_saves, 0);
    }

    #[test]
    fn test_no_batch_with_too_few_samples() {
        let mut session = session();
        session.handle_frame(&Frame::level("level_1", rainbow())).unwrap();
        session.handle_frame(&Frame::game_over()).unwrap();
        assert!(session.store.load_batch(1).is_err());
    }

    #[test]
    fn test_untrained_predict_mode_emits_no_swap() {
        let mut session = session();
        session.mode = Mode::Predict;
        let commands = session
            .handle_frame(&Frame::level("level_1", rainbow()))
            .unwrap();
        assert!(commands.is_empty());
    }

    #[test]
    fn test_random_mode_always_swaps() {
        let mut session = session();
        for _ in 0..20 {
            let commands = session
                .handle_frame(&Frame::level("level_1", rainbow()))
                .unwrap();
            assert!(
                commands
                    .iter()
                    .any(|c| matches!(c, Command::Swap { .. }))
            );
        }
    }
}
