//! Prompt templates
//!
//! Covers:
//! - system prompts per remote tier
//! - board and move-history formatting
//! - move request with output schema
//! - post-move commentary request

use protocol::{Board, Mark, TrainingRecord, BOARD_SIZE};
use serde_json::{json, Value};

/// Which remote tier a prompt is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteTier {
    /// Plain expert prompt, asks for reasoning too
    Hard,
    /// Few-shot prompt built from recorded games
    Trained,
}

/// Prompt builder
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the move request
    pub fn system_prompt(tier: RemoteTier) -> &'static str {
        match tier {
            RemoteTier::Hard => {
                r#"You are an expert Tic-Tac-Toe player. You must never lose.

Rules of thumb:
- If you can complete three in a row, do it.
- If the opponent can complete three in a row next turn, block it.
- Prefer the center, then corners, then edges.
- Create forks (two threats at once) and prevent the opponent's forks.

Cells are numbered 0-8, left to right, top to bottom.
Answer strictly in the requested JSON format."#
            }
            RemoteTier::Trained => {
                r#"You are a Tic-Tac-Toe player who learns from recorded games.
Study the example games that continue from the current position and pick the
move that leads toward the winning side's play.

Cells are numbered 0-8, left to right, top to bottom.
Answer strictly in the requested JSON format."#
            }
        }
    }

    /// Human-readable grid; empty cells show their index
    pub fn format_board(board: &Board) -> String {
        let mut result = String::new();

        for (row_index, row) in board.rows().enumerate() {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell {
                    Some(mark) => mark.to_string(),
                    None => (row_index * BOARD_SIZE + col).to_string(),
                })
                .collect();
            result.push_str(&format!(" {} \n", cells.join(" | ")));
            if row_index + 1 < BOARD_SIZE {
                result.push_str("---+---+---\n");
            }
        }

        result
    }

    /// Numbered move list, e.g. `1. X->4, 2. O->0`
    pub fn format_move_history(history: &[usize]) -> String {
        if history.is_empty() {
            return "Moves so far: none\n".to_string();
        }

        let moves: Vec<String> = history
            .iter()
            .enumerate()
            .map(|(ply, index)| format!("{}. {}->{}", ply + 1, Mark::for_ply(ply), index))
            .collect();
        format!("Moves so far: {}\n", moves.join(", "))
    }

    /// Few-shot block for the Trained tier
    pub fn format_examples(examples: &[&TrainingRecord]) -> String {
        if examples.is_empty() {
            return String::new();
        }

        let mut result = String::from("Recorded games that continue from this position:\n");
        for (i, record) in examples.iter().enumerate() {
            let moves: Vec<String> = record.moves.iter().map(|m| m.to_string()).collect();
            result.push_str(&format!(
                "Example {} (winner {}): {}\n",
                i + 1,
                record.winner,
                moves.join(", ")
            ));
        }
        result
    }

    /// Move request prompt
    pub fn move_request_prompt(
        board: &Board,
        history: &[usize],
        mark: Mark,
        tier: RemoteTier,
        examples: &[&TrainingRecord],
    ) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!("You play {}. Current board:\n", mark));
        prompt.push_str(&Self::format_board(board));
        prompt.push('\n');
        prompt.push_str(&Self::format_move_history(history));

        let empty: Vec<String> = board.empty_cells().iter().map(|i| i.to_string()).collect();
        prompt.push_str(&format!("Empty cells: {}\n", empty.join(", ")));

        if tier == RemoteTier::Trained {
            let block = Self::format_examples(examples);
            if !block.is_empty() {
                prompt.push('\n');
                prompt.push_str(&block);
            }
        }

        prompt.push_str("\nChoose your next move. Return JSON only:\n");
        match tier {
            RemoteTier::Hard => {
                prompt.push_str(r#"{"move": <empty cell 0-8>, "reasoning": "<one sentence>"}"#)
            }
            RemoteTier::Trained => prompt.push_str(r#"{"move": <empty cell 0-8>}"#),
        }
        prompt.push('\n');

        prompt
    }

    /// JSON schema for the move response
    pub fn move_schema(tier: RemoteTier) -> Value {
        let cell = json!({ "type": "integer", "minimum": 0, "maximum": 8 });
        match tier {
            RemoteTier::Hard => json!({
                "type": "object",
                "properties": {
                    "move": cell,
                    "reasoning": { "type": "string" }
                },
                "required": ["move", "reasoning"]
            }),
            RemoteTier::Trained => json!({
                "type": "object",
                "properties": { "move": cell },
                "required": ["move"]
            }),
        }
    }

    /// Commentary prompt for the move just played
    pub fn commentary_prompt(board: &Board, index: usize, mark: Mark) -> String {
        let mut prompt = String::new();

        prompt.push_str("You are a playful Tic-Tac-Toe opponent.\n");
        prompt.push_str(&format!(
            "You just placed {} at cell {} (row {}, column {}). The board is now:\n",
            mark,
            index,
            index / BOARD_SIZE + 1,
            index % BOARD_SIZE + 1
        ));
        prompt.push_str(&Self::format_board(board));
        prompt.push_str("\nWrite one short, witty remark about your move, at most 10 words. ");
        prompt.push_str("Reply with the remark only.\n");

        prompt
    }
}
