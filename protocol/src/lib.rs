//! Shared tic-tac-toe types
//!
//! Contains:
//! - Marks and the 3x3 board snapshot
//! - Win/draw evaluation
//! - Difficulty tiers and presentation intents
//! - Recorded-game corpus format

mod board;
mod constants;
mod error;
mod mark;
mod message;
mod record;
mod rules;

pub use board::Board;
pub use constants::*;
pub use error::{GameError, ProtocolError, Result};
pub use mark::Mark;
pub use message::{ClientIntent, Difficulty};
pub use record::{TrainingCorpus, TrainingRecord};
pub use rules::{Evaluator, GameOutcome};
