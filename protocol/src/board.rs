//! Board snapshot

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, CELL_COUNT};
use crate::error::GameError;
use crate::mark::Mark;

/// 3x3 board, index = row * 3 + col.
///
/// Boards are values: playing a move returns a new snapshot and leaves the
/// original untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Mark>; CELL_COUNT],
}

impl Board {
    /// Empty board
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from raw cells
    pub fn from_cells(cells: [Option<Mark>; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Replay a move sequence from the empty board, X first
    pub fn replay(moves: &[usize]) -> Result<Self, GameError> {
        moves
            .iter()
            .enumerate()
            .try_fold(Self::empty(), |board, (ply, &index)| {
                board.with_mark(index, Mark::for_ply(ply))
            })
    }

    /// Mark at `index`, `None` for empty or out-of-range cells
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    /// Whether `index` is a valid, empty cell
    pub fn is_empty_cell(&self, index: usize) -> bool {
        index < CELL_COUNT && self.cells[index].is_none()
    }

    /// New board with `mark` placed at `index`
    pub fn with_mark(&self, index: usize, mark: Mark) -> Result<Self, GameError> {
        if index >= CELL_COUNT {
            return Err(GameError::CellOutOfRange { index });
        }
        if self.cells[index].is_some() {
            return Err(GameError::CellOccupied { index });
        }

        let mut next = *self;
        next.cells[index] = Some(mark);
        Ok(next)
    }

    /// Empty cell indices in ascending order
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELL_COUNT).filter(|&i| self.cells[i].is_none()).collect()
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Whether every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Raw cells
    pub fn cells(&self) -> &[Option<Mark>; CELL_COUNT] {
        &self.cells
    }

    /// Rows of the board, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Mark>]> {
        self.cells.chunks(BOARD_SIZE)
    }
}

/// Compact notation, one character per cell: `X`, `O`, `_` (or `.`/`-`).
/// Whitespace, `/` and `|` are ignored, so `"XO_ _X_ __O"` and
/// `"XO_/_X_/__O"` are the same board.
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [None; CELL_COUNT];
        let mut count = 0;

        for ch in s.chars() {
            if ch.is_whitespace() || ch == '/' || ch == '|' {
                continue;
            }
            if count >= CELL_COUNT {
                return Err(GameError::InvalidNotation {
                    reason: format!("more than {} cells", CELL_COUNT),
                });
            }
            cells[count] = match ch {
                '_' | '.' | '-' => None,
                other => Some(Mark::from_char(other).ok_or_else(|| GameError::InvalidNotation {
                    reason: format!("unexpected character '{}'", other),
                })?),
            };
            count += 1;
        }

        if count != CELL_COUNT {
            return Err(GameError::InvalidNotation {
                reason: format!("expected {} cells, got {}", CELL_COUNT, count),
            });
        }

        Ok(Self { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            for cell in row {
                let ch = cell.map(|m| m.to_char()).unwrap_or('_');
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}
