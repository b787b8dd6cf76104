//! Remote-assisted move selection
//!
//! Asks a [`MoveOracle`] for a move, re-validates it, and falls back to the
//! heuristic on any failure, so a move is always produced.

use std::sync::Arc;
use std::time::Duration;

use protocol::{Board, Mark};
use rand::Rng;
use tracing::{info, warn};

use crate::heuristic::HeuristicSelector;
use crate::oracle::{validate_cell, MoveOracle, OracleError};

/// Remote-assisted selector with heuristic fallback
pub struct LlmEngine {
    oracle: Arc<dyn MoveOracle>,
    /// Overall deadline for all attempts
    timeout: Duration,
    /// Oracle calls per move before giving up
    max_attempts: u32,
}

impl LlmEngine {
    pub fn new(oracle: Arc<dyn MoveOracle>, timeout: Duration) -> Self {
        Self {
            oracle,
            timeout,
            max_attempts: 2,
        }
    }

    pub fn set_max_attempts(&mut self, attempts: u32) {
        self.max_attempts = attempts.max(1);
    }

    /// Pick a move for `mark`. Returns `None` only for a full board.
    pub async fn select_move<R: Rng + ?Sized>(
        &self,
        board: &Board,
        history: &[usize],
        mark: Mark,
        rng: &mut R,
    ) -> Option<usize> {
        if board.empty_cells().is_empty() {
            return None;
        }

        match self.ask_oracle(board, history).await {
            Ok(index) => {
                info!("Remote move accepted: {}", index);
                Some(index)
            }
            Err(e) => {
                warn!("Remote move unavailable, falling back to heuristic: {}", e);
                HeuristicSelector::select(board, mark, rng)
            }
        }
    }

    async fn ask_oracle(&self, board: &Board, history: &[usize]) -> Result<usize, OracleError> {
        let attempts = async {
            let mut last_error = OracleError::Unavailable("no attempts made".to_string());

            for attempt in 1..=self.max_attempts {
                let result = self
                    .oracle
                    .suggest_move(board, history)
                    .await
                    .and_then(|index| validate_cell(index as i64, board));

                match result {
                    Ok(index) => return Ok(index),
                    Err(e) => {
                        warn!("Remote move attempt {}/{} failed: {}", attempt, self.max_attempts, e);
                        last_error = e;
                    }
                }
            }

            Err(last_error)
        };

        tokio::time::timeout(self.timeout, attempts)
            .await
            .map_err(|_| OracleError::Timeout {
                secs: self.timeout.as_secs(),
            })?
    }
}
