//! Recorded-game corpus format
//!
//! JSON shape:
//! ```json
//! { "version": "1.0", "games": [ { "winner": "O", "moves": [4, 0, 8, 2, 1, 6, 7, 3, 5] } ] }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::constants::CORPUS_VERSION;
use crate::error::{ProtocolError, Result};
use crate::mark::Mark;
use crate::rules::{Evaluator, GameOutcome};

/// One complete recorded game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Mark that won the game
    pub winner: Mark,
    /// Cell indices in play order, X first
    pub moves: Vec<usize>,
}

impl TrainingRecord {
    pub fn new(winner: Mark, moves: Vec<usize>) -> Self {
        Self { winner, moves }
    }

    /// Whether `history` is an exact positional prefix of this game
    pub fn starts_with(&self, history: &[usize]) -> bool {
        self.moves.starts_with(history)
    }

    /// Check that the record is a legal game that ends on the recorded
    /// winner's winning move.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let Some((&last, prefix)) = self.moves.split_last() else {
            return Err("no moves".to_string());
        };

        let mut board = Board::empty();
        for (ply, &index) in prefix.iter().enumerate() {
            board = board
                .with_mark(index, Mark::for_ply(ply))
                .map_err(|e| format!("move {}: {}", ply + 1, e))?;
            if Evaluator::evaluate(&board).is_finished() {
                return Err(format!("game already decided after move {}", ply + 1));
            }
        }

        let ply = prefix.len();
        let mover = Mark::for_ply(ply);
        board = board
            .with_mark(last, mover)
            .map_err(|e| format!("move {}: {}", ply + 1, e))?;

        match Evaluator::evaluate(&board) {
            GameOutcome::Win { mark, .. } if mark == self.winner => Ok(()),
            GameOutcome::Win { mark, .. } => Err(format!(
                "recorded winner {} but {} completed a line",
                self.winner, mark
            )),
            GameOutcome::Draw => Err("game ends in a draw".to_string()),
            GameOutcome::InProgress => Err("game is not finished".to_string()),
        }
    }
}

/// Static table of recorded games, loaded once and never mutated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingCorpus {
    pub version: String,
    pub games: Vec<TrainingRecord>,
}

impl TrainingCorpus {
    /// Build from records, validating each
    pub fn new(games: Vec<TrainingRecord>) -> Result<Self> {
        let corpus = Self {
            version: CORPUS_VERSION.to_string(),
            games,
        };
        corpus.validate()?;
        Ok(corpus)
    }

    /// Corpus with no games
    pub fn empty() -> Self {
        Self {
            version: CORPUS_VERSION.to_string(),
            games: Vec::new(),
        }
    }

    /// Parse and validate a JSON corpus
    pub fn from_json(json: &str) -> Result<Self> {
        let corpus: Self = serde_json::from_str(json)?;

        if corpus.version != CORPUS_VERSION {
            return Err(ProtocolError::VersionMismatch {
                expected: CORPUS_VERSION.to_string(),
                actual: corpus.version,
            });
        }

        corpus.validate()?;
        debug!("Loaded training corpus: {} games", corpus.games.len());
        Ok(corpus)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        for (index, record) in self.games.iter().enumerate() {
            record
                .validate()
                .map_err(|reason| ProtocolError::InvalidRecord { index, reason })?;
        }
        Ok(())
    }

    pub fn records(&self) -> &[TrainingRecord] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
