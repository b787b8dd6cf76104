//! Tic-tac-toe terminal client
//!
//! Line-oriented front end for playing against the AI

pub mod game;
pub mod render;
pub mod settings;
pub mod storage;
pub mod theme;

pub use game::{GameSession, SessionControl};
pub use settings::GameSettings;
pub use storage::{ScoreBoard, StorageManager};
pub use theme::ColorTheme;
