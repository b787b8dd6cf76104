//! Board geometry and game-wide constants

use crate::mark::Mark;

/// Cells per row/column
pub const BOARD_SIZE: usize = 3;

/// Total number of cells
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Center cell
pub const CENTER: usize = 4;

/// Corner cells, in scan order
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Edge cells, in scan order
pub const EDGES: [usize; 4] = [1, 3, 5, 7];

/// The eight winning lines: rows, then columns, then diagonals.
///
/// The order is part of the contract: when several lines are complete the
/// evaluator reports the first one listed here.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// The human always plays X and moves first
pub const HUMAN_MARK: Mark = Mark::X;

/// The computer opponent always plays O
pub const AI_MARK: Mark = Mark::O;

/// Maximum number of few-shot examples handed to the Trained tier
pub const MAX_TRAINING_EXAMPLES: usize = 3;

/// Training corpus format version
pub const CORPUS_VERSION: &str = "1.0";
