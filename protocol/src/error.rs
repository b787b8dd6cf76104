//! Error types

use thiserror::Error;

/// Game rule violations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// Index outside 0..=8
    #[error("Cell index out of range: {index}")]
    CellOutOfRange { index: usize },

    /// Target cell already holds a mark
    #[error("Cell {index} is already occupied")]
    CellOccupied { index: usize },

    /// Board text notation could not be parsed
    #[error("Invalid board notation: {reason}")]
    InvalidNotation { reason: String },
}

/// Errors raised while loading shared data
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A training record is not a legal, finished game
    #[error("Invalid training record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// Corpus version not understood
    #[error("Unsupported corpus version: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

/// Result alias for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
