//! AI turn driving and background commentary
//!
//! Commentary runs as a spawned task. Its result only reaches the display if
//! no newer move, restart or difficulty change happened in the meantime.

use std::sync::Arc;
use std::time::Instant;

use protocol::Board;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use ttt_ai::llm::{CommentaryGenerator, COMMENTARY_PLACEHOLDER};
use ttt_ai::AiPlayer;

use super::ClientGame;

/// Latest commentary as seen by the display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commentary {
    /// Bumped on every new request and every invalidation
    pub generation: u64,
    pub text: Option<String>,
}

/// Publishes commentary, dropping results that arrive for a stale game
#[derive(Clone)]
pub struct CommentaryChannel {
    tx: Arc<watch::Sender<Commentary>>,
}

impl Default for CommentaryChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentaryChannel {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Commentary::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<Commentary> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> Option<String> {
        self.tx.borrow().text.clone()
    }

    /// Forget the displayed text; any pending request becomes stale
    pub fn invalidate(&self) {
        self.tx.send_modify(|c| {
            c.generation += 1;
            c.text = None;
        });
    }

    /// Request commentary for the AI's move at `index` on the post-move
    /// `board`. The placeholder shows until the result arrives.
    pub fn request(&self, generator: CommentaryGenerator, board: Board, index: usize) -> JoinHandle<()> {
        let mut generation = 0;
        self.tx.send_modify(|c| {
            c.generation += 1;
            c.text = Some(COMMENTARY_PLACEHOLDER.to_string());
            generation = c.generation;
        });

        let tx = self.tx.clone();
        tokio::spawn(async move {
            let text = generator.comment(&board, index).await;
            let delivered = tx.send_if_modified(|c| {
                if c.generation == generation {
                    c.text = Some(text);
                    true
                } else {
                    false
                }
            });
            if !delivered {
                debug!("Dropping stale commentary for generation {}", generation);
            }
        })
    }
}

/// Run the AI half of a turn, if one is due. Returns the cell played.
pub async fn run_ai_turn(game: &mut ClientGame, ai: &mut AiPlayer) -> Option<usize> {
    if !game.begin_ai_turn() {
        return None;
    }

    let difficulty = game.difficulty();
    let board = game.board();
    let started_at = Instant::now();
    info!("AI thinking... difficulty: {}", difficulty);

    let Some(index) = ai.choose_move(difficulty, &board, game.history()).await else {
        error!("AI found no move on a board that is not finished");
        return None;
    };

    if !game.apply_ai_move(index) {
        error!("AI move {} rejected", index);
        return None;
    }

    info!("AI played {} in {:?}", index, started_at.elapsed());
    Some(index)
}
