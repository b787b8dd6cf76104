//! Response parsing
//!
//! Extracts the `move` field from a model response and validates it against
//! the board. Also cleans up free-text commentary.

use protocol::Board;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::oracle::{validate_cell, OracleError};

/// Move response shape
#[derive(Debug, Deserialize)]
pub struct LlmMove {
    #[serde(rename = "move")]
    pub cell: i64,
    /// Logged only, so any JSON shape is accepted
    #[serde(default)]
    pub reasoning: Option<Value>,
}

/// Response parser
pub struct MoveParser;

impl MoveParser {
    /// Parse a move object, either bare or embedded in prose
    pub fn parse_response(response: &str) -> Result<LlmMove, OracleError> {
        if let Ok(mv) = serde_json::from_str::<LlmMove>(response) {
            return Ok(mv);
        }

        let json = Self::extract_json(response)?;
        serde_json::from_str(&json).map_err(|e| OracleError::Parse(e.to_string()))
    }

    /// First balanced `{...}` object in `text`
    fn extract_json(text: &str) -> Result<String, OracleError> {
        let start = text
            .find('{')
            .ok_or_else(|| OracleError::Parse("no JSON object found".to_string()))?;

        let mut depth = 0;
        let mut in_string = false;
        let mut escaped = false;

        for (i, ch) in text[start..].char_indices() {
            if in_string {
                match ch {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }

            match ch {
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(text[start..start + i + 1].to_string());
                    }
                }
                _ => {}
            }
        }

        Err(OracleError::Parse("unbalanced braces in JSON".to_string()))
    }

    /// Strip common wrapping: `<think>` blocks, markdown fences, line comments
    pub fn try_fix_response(response: &str) -> String {
        let mut fixed = response.to_string();

        if let Some(think_end) = fixed.find("</think>") {
            fixed = fixed[think_end + "</think>".len()..].to_string();
        }

        fixed = fixed.replace("```json", "").replace("```", "");

        let lines: Vec<&str> = fixed
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect();

        lines.join("\n").trim().to_string()
    }

    /// Parse and check the move is an empty cell on `board`
    pub fn parse_and_validate(response: &str, board: &Board) -> Result<usize, OracleError> {
        let llm_move = Self::parse_response(response)?;
        debug!("Parsed model move: {:?}", llm_move);

        match &llm_move.reasoning {
            Some(Value::String(reasoning)) => debug!("Model reasoning: {}", reasoning),
            Some(reasoning) => debug!("Model reasoning: {}", reasoning),
            None => {}
        }

        validate_cell(llm_move.cell, board)
    }

    /// Parse after cleanup, retrying on the raw text if cleanup broke it
    pub fn parse_with_fix(response: &str, board: &Board) -> Result<usize, OracleError> {
        let fixed = Self::try_fix_response(response);

        match Self::parse_and_validate(&fixed, board) {
            Ok(index) => Ok(index),
            Err(e @ (OracleError::OutOfRange { .. } | OracleError::Occupied { .. })) => Err(e),
            Err(_) => Self::parse_and_validate(response, board),
        }
    }

    /// Tidy a commentary line: first non-empty line, wrapping quotes removed.
    /// `None` when nothing usable is left.
    pub fn clean_commentary(response: &str) -> Option<String> {
        let fixed = Self::try_fix_response(response);
        let line = fixed.lines().map(str::trim).find(|l| !l.is_empty())?;

        let quotes: &[char] = &['"', '\'', '“', '”', '‘', '’', '`'];
        let cleaned = line.trim_matches(quotes).trim();

        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned.to_string())
        }
    }
}
