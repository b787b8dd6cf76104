//! Game logic
//!
//! Manages game state and turns intents into moves, AI replies, commentary
//! and persisted scores.

mod ai;
mod input;
mod state;

pub use ai::*;
pub use input::*;
pub use state::*;

use protocol::{ClientIntent, Difficulty, GameOutcome};
use tokio::sync::watch;
use tracing::info;
use ttt_ai::AiPlayer;

use crate::settings::GameSettings;
use crate::storage::{ScoreBoard, StorageManager};

/// Whether the input loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Quit,
}

/// One player's session: the current game plus everything that outlives it
pub struct GameSession {
    game: ClientGame,
    ai: AiPlayer,
    settings: GameSettings,
    scores: ScoreBoard,
    storage: StorageManager,
    commentary: CommentaryChannel,
}

impl GameSession {
    pub fn new(ai: AiPlayer, settings: GameSettings, scores: ScoreBoard, storage: StorageManager) -> Self {
        Self {
            game: ClientGame::new(settings.difficulty),
            ai,
            settings,
            scores,
            storage,
            commentary: CommentaryChannel::new(),
        }
    }

    pub fn game(&self) -> &ClientGame {
        &self.game
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn commentary(&self) -> Option<String> {
        self.commentary.current()
    }

    pub fn subscribe_commentary(&self) -> watch::Receiver<Commentary> {
        self.commentary.subscribe()
    }

    /// Apply one intent. Illegal intents change nothing.
    pub async fn handle_intent(&mut self, intent: ClientIntent) -> SessionControl {
        match intent {
            ClientIntent::PlayCell { index } => self.play_cell(index).await,
            ClientIntent::SelectDifficulty { difficulty } => self.select_difficulty(difficulty),
            ClientIntent::Restart => {
                info!("Restarting game");
                self.game.reset();
                self.commentary.invalidate();
            }
            ClientIntent::ToggleTheme => {
                self.settings.dark_mode = !self.settings.dark_mode;
                info!("Dark mode: {}", self.settings.dark_mode);
                self.storage.save_settings(&self.settings);
            }
            ClientIntent::Quit => return SessionControl::Quit,
        }
        SessionControl::Continue
    }

    async fn play_cell(&mut self, index: usize) {
        if !self.game.apply_human_move(index) {
            return;
        }
        if self.record_if_finished() {
            return;
        }

        let Some(ai_index) = run_ai_turn(&mut self.game, &mut self.ai).await else {
            return;
        };

        if self.game.difficulty().is_remote() {
            if let Some(generator) = self.ai.commentary() {
                self.commentary.request(generator.clone(), self.game.board(), ai_index);
            }
        }
        self.record_if_finished();
    }

    fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.game.select_difficulty(difficulty);
        self.commentary.invalidate();

        if self.settings.difficulty != difficulty {
            self.settings.difficulty = difficulty;
            self.storage.save_settings(&self.settings);
        }
    }

    fn record_if_finished(&mut self) -> bool {
        let Some(outcome) = self.game.outcome() else {
            return false;
        };

        self.scores.record(&outcome);
        self.storage.save_scores(&self.scores);

        match outcome {
            GameOutcome::Win { mark, line } => info!("{} wins on {:?}", mark, line),
            _ => info!("Draw"),
        }
        true
    }
}
