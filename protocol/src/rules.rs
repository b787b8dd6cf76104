//! Win/draw evaluation

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::WINNING_LINES;
use crate::mark::Mark;

/// State of a game after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Neither side has won and empty cells remain
    InProgress,
    /// `mark` completed `line`
    Win { mark: Mark, line: [usize; 3] },
    /// Board full with no completed line
    Draw,
}

impl GameOutcome {
    /// Win or draw
    pub fn is_finished(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// Winning mark, if any
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameOutcome::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// Winning line, if any
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        match self {
            GameOutcome::Win { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Terminal-state detection shared by the game loop and the AI
pub struct Evaluator;

impl Evaluator {
    /// Evaluate a board.
    ///
    /// Lines are tested rows, columns, diagonals; the first complete line
    /// wins. A full board with a complete line is a win, not a draw.
    pub fn evaluate(board: &Board) -> GameOutcome {
        for line in WINNING_LINES {
            let [a, b, c] = line;
            if let Some(mark) = board.get(a) {
                if board.get(b) == Some(mark) && board.get(c) == Some(mark) {
                    return GameOutcome::Win { mark, line };
                }
            }
        }

        if board.is_full() {
            GameOutcome::Draw
        } else {
            GameOutcome::InProgress
        }
    }

    /// Whether placing `mark` at `index` would win immediately
    pub fn wins_with(board: &Board, index: usize, mark: Mark) -> bool {
        board
            .with_mark(index, mark)
            .map(|next| Self::evaluate(&next).winner() == Some(mark))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(Evaluator::evaluate(&Board::empty()), GameOutcome::InProgress);
    }

    #[test]
    fn test_every_line_is_detected() {
        for line in WINNING_LINES {
            for mark in [Mark::X, Mark::O] {
                let mut cells = [None; 9];
                for i in line {
                    cells[i] = Some(mark);
                }
                let outcome = Evaluator::evaluate(&Board::from_cells(cells));
                assert_eq!(outcome, GameOutcome::Win { mark, line });
            }
        }
    }

    #[test]
    fn test_diagonal_win_with_empty_cells() {
        let outcome = Evaluator::evaluate(&board("XOX OXO __X"));
        assert_eq!(
            outcome,
            GameOutcome::Win {
                mark: Mark::X,
                line: [0, 4, 8]
            }
        );
    }

    #[test]
    fn test_full_board_with_line_is_win() {
        let outcome = Evaluator::evaluate(&board("XXX OOX XOO"));
        assert_eq!(outcome.winner(), Some(Mark::X));
        assert_eq!(outcome.winning_line(), Some([0, 1, 2]));
    }

    #[test]
    fn test_draw() {
        let outcome = Evaluator::evaluate(&board("XOX XOO OXX"));
        assert_eq!(outcome, GameOutcome::Draw);
        assert!(outcome.is_finished());
    }

    #[test]
    fn test_in_progress() {
        let outcome = Evaluator::evaluate(&board("XOX XO_ OX_"));
        assert_eq!(outcome, GameOutcome::InProgress);
        assert!(!outcome.is_finished());
    }

    #[test]
    fn test_first_line_in_order_is_reported() {
        // Row 0 and column 0 both complete; rows come first
        let outcome = Evaluator::evaluate(&board("XXX XOO XOO"));
        assert_eq!(outcome.winning_line(), Some([0, 1, 2]));
    }

    #[test]
    fn test_wins_with() {
        let b = board("OO_ XX_ ___");
        assert!(Evaluator::wins_with(&b, 2, Mark::O));
        assert!(Evaluator::wins_with(&b, 5, Mark::X));
        assert!(!Evaluator::wins_with(&b, 5, Mark::O));
        assert!(!Evaluator::wins_with(&b, 0, Mark::O));
    }
}
