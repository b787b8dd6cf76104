//! Difficulty tiers and presentation-layer intents

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// AI difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// Uniform random empty cell
    Easy,
    /// Win / block / center / corner / edge rule chain
    #[default]
    Medium,
    /// Remote language model, heuristic fallback
    Hard,
    /// Remote language model with few-shot examples from recorded games
    Trained,
}

impl Difficulty {
    /// All tiers in menu order
    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Trained,
        ]
    }

    /// Whether this tier asks the remote service for moves and commentary
    pub fn is_remote(&self) -> bool {
        matches!(self, Difficulty::Hard | Difficulty::Trained)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Trained => "Trained",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Trained,
            Difficulty::Trained => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "e" => Ok(Difficulty::Easy),
            "medium" | "m" => Ok(Difficulty::Medium),
            "hard" | "h" => Ok(Difficulty::Hard),
            "trained" | "t" => Ok(Difficulty::Trained),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

/// Intents forwarded by the presentation layer to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientIntent {
    /// Human clicked a cell
    PlayCell { index: usize },
    /// Switch tier; resets the board
    SelectDifficulty { difficulty: Difficulty },
    /// Clear the board and start over
    Restart,
    /// Flip between light and dark theme
    ToggleTheme,
    /// Leave the game
    Quit,
}
