//! Tic-tac-toe AI opponent
//!
//! Contains:
//! - Uniform random selection (Easy)
//! - Win / block / center / corner / edge heuristic (Medium)
//! - Language-model move oracles with heuristic fallback (Hard, Trained)
//! - Few-shot retrieval from recorded games
//! - Post-move commentary

mod heuristic;
mod oracle;
mod player;
mod random;
mod training;

pub mod llm;

pub use heuristic::HeuristicSelector;
pub use oracle::{validate_cell, MoveOracle, OracleError};
pub use player::{AiConfig, AiPlayer};
pub use random::RandomSelector;
pub use training::{builtin_corpus, TrainingRetriever};
