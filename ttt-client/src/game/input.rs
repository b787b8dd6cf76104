//! Input handling: terminal lines to intents

use protocol::{ClientIntent, Difficulty, CELL_COUNT};
use thiserror::Error;

/// One parsed input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Intent(ClientIntent),
    Help,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Enter a cell number 0-{}, or 'help'", CELL_COUNT - 1)]
    Empty,

    #[error("Cell {0} is out of range (0-{max})", max = CELL_COUNT - 1)]
    CellOutOfRange(usize),

    #[error("{0}")]
    Difficulty(String),

    #[error("Unknown command '{0}', type 'help'")]
    Unknown(String),
}

pub const HELP_TEXT: &str = "\
Commands:
  0-8                 play that cell
  d, difficulty <d>   easy | medium | hard | trained (starts a new game)
  r, restart          start a new game
  t, theme            toggle light/dark theme
  h, help             show this help
  q, quit             leave";

/// Parse one line typed by the player
pub fn parse_line(line: &str) -> Result<InputCommand, InputError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Err(InputError::Empty);
    };

    if let Ok(index) = command.parse::<usize>() {
        if index >= CELL_COUNT {
            return Err(InputError::CellOutOfRange(index));
        }
        return Ok(InputCommand::Intent(ClientIntent::PlayCell { index }));
    }

    let intent = match command.to_ascii_lowercase().as_str() {
        "d" | "difficulty" => {
            let difficulty = words
                .next()
                .ok_or_else(|| InputError::Difficulty("Which difficulty? easy, medium, hard or trained".into()))?
                .parse::<Difficulty>()
                .map_err(InputError::Difficulty)?;
            ClientIntent::SelectDifficulty { difficulty }
        }
        "r" | "restart" | "new" => ClientIntent::Restart,
        "t" | "theme" => ClientIntent::ToggleTheme,
        "q" | "quit" | "exit" => ClientIntent::Quit,
        "h" | "help" | "?" => return Ok(InputCommand::Help),
        _ => return Err(InputError::Unknown(command.to_string())),
    };

    Ok(InputCommand::Intent(intent))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(line: &str) -> ClientIntent {
        match parse_line(line) {
            Ok(InputCommand::Intent(intent)) => intent,
            other => panic!("expected intent for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(intent("4"), ClientIntent::PlayCell { index: 4 });
        assert_eq!(intent("  0 "), ClientIntent::PlayCell { index: 0 });
        assert_eq!(parse_line("9"), Err(InputError::CellOutOfRange(9)));
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(
            intent("d hard"),
            ClientIntent::SelectDifficulty {
                difficulty: Difficulty::Hard
            }
        );
        assert_eq!(
            intent("difficulty Trained"),
            ClientIntent::SelectDifficulty {
                difficulty: Difficulty::Trained
            }
        );
        assert!(matches!(parse_line("d"), Err(InputError::Difficulty(_))));
        assert!(matches!(parse_line("d nightmare"), Err(InputError::Difficulty(_))));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(intent("r"), ClientIntent::Restart);
        assert_eq!(intent("THEME"), ClientIntent::ToggleTheme);
        assert_eq!(intent("quit"), ClientIntent::Quit);
        assert_eq!(parse_line("help"), Ok(InputCommand::Help));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_line("   "), Err(InputError::Empty));
        assert_eq!(parse_line("castle"), Err(InputError::Unknown("castle".into())));
    }
}
