//! Client-side game state

use protocol::{Board, Difficulty, Evaluator, GameOutcome, AI_MARK, HUMAN_MARK};
use tracing::{debug, info};

/// Whose turn it is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Waiting for the human's cell
    HumanTurn,
    /// Human has moved; the AI has not started
    AiTurn,
    /// AI move in progress
    AiThinking,
    /// Terminal until reset
    Finished(GameOutcome),
}

/// Board, history and turn for one game
#[derive(Debug, Clone)]
pub struct ClientGame {
    board: Board,
    /// Cell indices in play order, human first
    history: Vec<usize>,
    difficulty: Difficulty,
    turn: TurnState,
    last_move: Option<usize>,
}

impl Default for ClientGame {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl ClientGame {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            board: Board::empty(),
            history: Vec::new(),
            difficulty,
            turn: TurnState::HumanTurn,
            last_move: None,
        }
    }

    /// Clear the board, keep the difficulty
    pub fn reset(&mut self) {
        *self = Self::new(self.difficulty);
    }

    /// Switch tier and start a fresh game
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        info!("Difficulty set to {}", difficulty);
        *self = Self::new(difficulty);
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn is_my_turn(&self) -> bool {
        self.turn == TurnState::HumanTurn
    }

    pub fn should_ai_move(&self) -> bool {
        self.turn == TurnState::AiTurn
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.turn {
            TurnState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// `Some(true)` human won, `Some(false)` AI won, `None` otherwise
    pub fn is_player_win(&self) -> Option<bool> {
        self.outcome()
            .and_then(|outcome| outcome.winner())
            .map(|mark| mark == HUMAN_MARK)
    }

    pub fn total_moves(&self) -> usize {
        self.history.len()
    }

    /// Place the human's mark. Returns false, changing nothing, if it is
    /// not the human's turn or the cell is not empty.
    pub fn apply_human_move(&mut self, index: usize) -> bool {
        if !self.is_my_turn() {
            debug!("Ignoring cell {}: not the human's turn ({:?})", index, self.turn);
            return false;
        }

        match self.board.with_mark(index, HUMAN_MARK) {
            Ok(board) => {
                self.commit(board, index, TurnState::AiTurn);
                true
            }
            Err(e) => {
                debug!("Ignoring cell {}: {}", index, e);
                false
            }
        }
    }

    /// `AiTurn` -> `AiThinking`
    pub fn begin_ai_turn(&mut self) -> bool {
        if self.turn != TurnState::AiTurn {
            return false;
        }
        self.turn = TurnState::AiThinking;
        true
    }

    /// Place the AI's mark; only valid while `AiThinking`
    pub fn apply_ai_move(&mut self, index: usize) -> bool {
        if self.turn != TurnState::AiThinking {
            debug!("Dropping AI move {}: state is {:?}", index, self.turn);
            return false;
        }

        match self.board.with_mark(index, AI_MARK) {
            Ok(board) => {
                self.commit(board, index, TurnState::HumanTurn);
                true
            }
            Err(e) => {
                debug!("Dropping AI move {}: {}", index, e);
                false
            }
        }
    }

    fn commit(&mut self, board: Board, index: usize, next: TurnState) {
        self.board = board;
        self.history.push(index);
        self.last_move = Some(index);

        let outcome = Evaluator::evaluate(&self.board);
        self.turn = if outcome.is_finished() {
            info!("Game over after {} moves: {:?}", self.history.len(), outcome);
            TurnState::Finished(outcome)
        } else {
            next
        };
    }
}
