//! Rule-chain move selection (Medium tier)
//!
//! Also the fallback for every remote tier, so it must always produce an
//! empty cell when one exists.

use protocol::{Board, Evaluator, Mark, CENTER, CORNERS, EDGES};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Win / block / center / corner / edge selector
pub struct HeuristicSelector;

impl HeuristicSelector {
    /// Pick a move for `mark`.
    ///
    /// Priority, first match wins:
    /// 1. a cell that wins immediately (lowest index)
    /// 2. a cell that blocks the opponent's immediate win (lowest index)
    /// 3. the center
    /// 4. a random empty corner
    /// 5. a random empty edge
    /// 6. the lowest empty cell
    ///
    /// Returns `None` only for a full board.
    pub fn select<R: Rng + ?Sized>(board: &Board, mark: Mark, rng: &mut R) -> Option<usize> {
        if let Some(index) = Self::winning_cell(board, mark) {
            debug!("Heuristic: win at {}", index);
            return Some(index);
        }

        if let Some(index) = Self::winning_cell(board, mark.opponent()) {
            debug!("Heuristic: block at {}", index);
            return Some(index);
        }

        if board.is_empty_cell(CENTER) {
            debug!("Heuristic: center");
            return Some(CENTER);
        }

        if let Some(index) = Self::random_empty(board, &CORNERS, rng) {
            debug!("Heuristic: corner {}", index);
            return Some(index);
        }

        if let Some(index) = Self::random_empty(board, &EDGES, rng) {
            debug!("Heuristic: edge {}", index);
            return Some(index);
        }

        board.empty_cells().first().copied()
    }

    /// First empty cell (ascending) where `mark` completes a line
    pub fn winning_cell(board: &Board, mark: Mark) -> Option<usize> {
        board
            .empty_cells()
            .into_iter()
            .find(|&index| Evaluator::wins_with(board, index, mark))
    }

    fn random_empty<R: Rng + ?Sized>(board: &Board, cells: &[usize], rng: &mut R) -> Option<usize> {
        let empty: Vec<usize> = cells
            .iter()
            .copied()
            .filter(|&i| board.is_empty_cell(i))
            .collect();
        empty.choose(rng).copied()
    }
}
