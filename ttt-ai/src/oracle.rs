//! Move-suggestion capability backed by an external reasoning service

use async_trait::async_trait;
use protocol::{Board, CELL_COUNT};
use thiserror::Error;

/// Why a suggested move could not be used
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    /// Transport, authentication or service-side failure
    #[error("Remote service error: {0}")]
    Service(String),

    /// Response was not the expected JSON shape
    #[error("Malformed response: {0}")]
    Parse(String),

    /// Suggested cell is outside 0..=8
    #[error("Suggested cell {cell} is out of range")]
    OutOfRange { cell: i64 },

    /// Suggested cell already holds a mark
    #[error("Suggested cell {cell} is occupied")]
    Occupied { cell: usize },

    /// No answer within the deadline
    #[error("Remote service timed out after {secs}s")]
    Timeout { secs: u64 },

    /// No service configured for this tier
    #[error("Remote service unavailable: {0}")]
    Unavailable(String),
}

/// Something that can suggest a move for the current position.
///
/// Implementations may be wrong or slow; callers validate every answer and
/// apply their own deadline.
#[async_trait]
pub trait MoveOracle: Send + Sync {
    async fn suggest_move(&self, board: &Board, history: &[usize]) -> Result<usize, OracleError>;
}

/// Accept `cell` only if it is in range and empty on `board`
pub fn validate_cell(cell: i64, board: &Board) -> Result<usize, OracleError> {
    let index = usize::try_from(cell)
        .ok()
        .filter(|&i| i < CELL_COUNT)
        .ok_or(OracleError::OutOfRange { cell })?;

    if !board.is_empty_cell(index) {
        return Err(OracleError::Occupied { cell: index });
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_cell() {
        let board: Board = "X__ _O_ ___".parse().unwrap();

        assert_eq!(validate_cell(2, &board), Ok(2));
        assert_eq!(validate_cell(0, &board), Err(OracleError::Occupied { cell: 0 }));
        assert_eq!(validate_cell(4, &board), Err(OracleError::Occupied { cell: 4 }));
        assert_eq!(validate_cell(9, &board), Err(OracleError::OutOfRange { cell: 9 }));
        assert_eq!(validate_cell(-1, &board), Err(OracleError::OutOfRange { cell: -1 }));
    }
}
