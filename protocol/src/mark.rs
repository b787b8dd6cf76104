//! Player marks

use std::fmt;

use serde::{Deserialize, Serialize};

/// A player's mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Moves first
    X,
    /// Moves second
    O,
}

impl Mark {
    /// The other player's mark
    pub fn opponent(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Display character
    pub fn to_char(&self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    /// Parse from a display character (case-insensitive)
    pub fn from_char(c: char) -> Option<Mark> {
        match c {
            'X' | 'x' => Some(Mark::X),
            'O' | 'o' => Some(Mark::O),
            _ => None,
        }
    }

    /// Mark of the player making the `ply`-th move (0-based); X always starts
    pub fn for_ply(ply: usize) -> Mark {
        if ply % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
    }

    #[test]
    fn test_char_conversion() {
        assert_eq!(Mark::from_char('x'), Some(Mark::X));
        assert_eq!(Mark::from_char('O'), Some(Mark::O));
        assert_eq!(Mark::from_char('_'), None);
        assert_eq!(Mark::O.to_string(), "O");
    }

    #[test]
    fn test_for_ply() {
        assert_eq!(Mark::for_ply(0), Mark::X);
        assert_eq!(Mark::for_ply(1), Mark::O);
        assert_eq!(Mark::for_ply(8), Mark::X);
    }
}
