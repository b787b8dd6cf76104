//! Post-move flavor text
//!
//! Cosmetic only: every failure degrades to a fixed placeholder.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use protocol::{Board, Mark};
use tracing::{debug, warn};

use super::{GenerationRequest, MoveParser, PromptTemplate, TextGenerator};

/// Shown when commentary cannot be produced
pub const COMMENTARY_PLACEHOLDER: &str = "Thinking...";

/// Short remark generator
#[derive(Clone)]
pub struct CommentaryGenerator {
    generator: Arc<dyn TextGenerator>,
    mark: Mark,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl CommentaryGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, mark: Mark) -> Self {
        Self {
            generator,
            mark,
            temperature: 0.9,
            max_tokens: 24,
            timeout: Duration::from_secs(8),
        }
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Remark about the move at `index` on the post-move `board`
    pub async fn comment(&self, board: &Board, index: usize) -> String {
        match self.try_comment(board, index).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Commentary unavailable: {:#}", e);
                COMMENTARY_PLACEHOLDER.to_string()
            }
        }
    }

    async fn try_comment(&self, board: &Board, index: usize) -> Result<String> {
        let request = GenerationRequest::new(
            PromptTemplate::commentary_prompt(board, index, self.mark),
            self.temperature,
        )
        .with_max_tokens(self.max_tokens);

        let response = tokio::time::timeout(self.timeout, self.generator.generate(&request))
            .await
            .map_err(|_| anyhow!("timed out after {}s", self.timeout.as_secs()))??;

        let text = MoveParser::clean_commentary(&response)
            .ok_or_else(|| anyhow!("empty commentary"))?;
        debug!("Commentary: {}", text);
        Ok(text)
    }
}
