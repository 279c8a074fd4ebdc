//! Presentation hooks for round-by-round progress.

use crate::grid::Grid;

/// Receives notifications as transposition rounds complete.
///
/// The engine never touches the console; anything that wants to show
/// intermediate grids or per-round text implements this and is handed in by
/// the caller. All methods default to doing nothing, so an observer only
/// implements what it cares about.
pub trait RoundObserver {
    /// Called once a round's grid is fully populated, before it is read out.
    fn on_grid_ready(&mut self, grid: &Grid) {
        let _ = grid;
    }

    /// Called with each round's output text, 1-based.
    fn on_round_result(&mut self, round: usize, text: &str) {
        let _ = (round, text);
    }
}

/// The no-op observer, for callers that only want the final result.
impl RoundObserver for () {}
