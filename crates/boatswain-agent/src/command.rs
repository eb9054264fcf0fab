use std::time::Duration;

use boatswain_engine::{CellPos, GameMove};

/// Milliseconds of drag time per cell of span.
const DRAG_MS_PER_CELL: u64 = 100;
/// Shortest drag the action collaborator performs reliably.
const MIN_DRAG: Duration = Duration::from_millis(300);

/// One instruction for the action collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Tap an unrevealed tile so the next frame can read it.
    RevealTile { cell: CellPos },
    /// Drag the tile at `from` to `to` over `duration`.
    Swap {
        from: CellPos,
        to: CellPos,
        duration: Duration,
    },
    /// Start the next run.
    RestartRun,
}

impl Command {
    /// Builds the swap command for a move, scaling the drag duration with
    /// the span and clamping it to the minimum reliable drag.
    #[must_use]
    pub fn swap(game_move: GameMove) -> Self {
        let span = u64::try_from(game_move.span()).unwrap_or(u64::MAX);
        let duration = Duration::from_millis(span * DRAG_MS_PER_CELL).max(MIN_DRAG);
        Self::Swap {
            from: game_move.start(),
            to: game_move.end(),
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_duration_scales_with_span() {
        let short: GameMove = "A1 to A2".parse().unwrap();
        let long: GameMove = "A1 to A8".parse().unwrap();
        let Command::Swap { duration, .. } = Command::swap(short) else {
            panic!("expected swap");
        };
        assert_eq!(duration, Duration::from_millis(300));
        let Command::Swap { duration, .. } = Command::swap(long) else {
            panic!("expected swap");
        };
        assert_eq!(duration, Duration::from_millis(700));
    }
}
