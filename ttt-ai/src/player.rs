//! Per-difficulty move selection

use std::sync::Arc;
use std::time::Duration;

use protocol::{Board, Difficulty, Mark, AI_MARK};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::heuristic::HeuristicSelector;
use crate::llm::{CommentaryGenerator, LlmEngine, LlmOracle, TextGenerator};
use crate::oracle::MoveOracle;
use crate::random::RandomSelector;
use crate::training::TrainingRetriever;

/// Remote-tier tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Near zero so identical positions tend to get identical answers
    pub move_temperature: f32,
    pub move_max_tokens: u32,
    pub commentary_temperature: f32,
    pub commentary_max_tokens: u32,
    /// Deadline for one remote move, all attempts included
    pub remote_timeout_secs: u64,
    pub max_attempts: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            move_temperature: 0.1,
            move_max_tokens: 256,
            commentary_temperature: 0.9,
            commentary_max_tokens: 24,
            remote_timeout_secs: 8,
            max_attempts: 2,
        }
    }
}

impl AiConfig {
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_secs.max(1))
    }
}

/// The computer opponent: dispatches to the selector for a difficulty
pub struct AiPlayer {
    mark: Mark,
    rng: ChaCha8Rng,
    hard: Option<LlmEngine>,
    trained: Option<LlmEngine>,
    commentary: Option<CommentaryGenerator>,
}

impl AiPlayer {
    /// Local selectors only; remote tiers use the heuristic
    pub fn offline() -> Self {
        Self {
            mark: AI_MARK,
            rng: ChaCha8Rng::from_entropy(),
            hard: None,
            trained: None,
            commentary: None,
        }
    }

    /// Wire both remote tiers and commentary to one text generator
    pub fn with_generator(
        generator: Arc<dyn TextGenerator>,
        retriever: TrainingRetriever,
        config: &AiConfig,
    ) -> Self {
        let hard = LlmOracle::hard(generator.clone(), AI_MARK)
            .with_sampling(config.move_temperature, config.move_max_tokens);
        let trained = LlmOracle::trained(generator.clone(), AI_MARK, retriever)
            .with_sampling(config.move_temperature, config.move_max_tokens);
        let commentary = CommentaryGenerator::new(generator, AI_MARK)
            .with_sampling(config.commentary_temperature, config.commentary_max_tokens)
            .with_timeout(config.remote_timeout());

        Self::with_oracles(Arc::new(hard), Arc::new(trained), config).with_commentary(commentary)
    }

    /// Remote tiers backed by arbitrary oracles, no commentary
    pub fn with_oracles(hard: Arc<dyn MoveOracle>, trained: Arc<dyn MoveOracle>, config: &AiConfig) -> Self {
        let engine = |oracle| {
            let mut engine = LlmEngine::new(oracle, config.remote_timeout());
            engine.set_max_attempts(config.max_attempts);
            engine
        };

        Self {
            hard: Some(engine(hard)),
            trained: Some(engine(trained)),
            ..Self::offline()
        }
    }

    pub fn with_commentary(mut self, commentary: CommentaryGenerator) -> Self {
        self.commentary = Some(commentary);
        self
    }

    /// Deterministic tie-breaks, for tests and replays
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Commentary source, if remote tiers are wired
    pub fn commentary(&self) -> Option<&CommentaryGenerator> {
        self.commentary.as_ref()
    }

    /// Choose a move. `None` only for a full board.
    pub async fn choose_move(&mut self, difficulty: Difficulty, board: &Board, history: &[usize]) -> Option<usize> {
        let index = match difficulty {
            Difficulty::Easy => RandomSelector::select(board, &mut self.rng),
            Difficulty::Medium => HeuristicSelector::select(board, self.mark, &mut self.rng),
            Difficulty::Hard | Difficulty::Trained => {
                let engine = if difficulty == Difficulty::Hard {
                    self.hard.as_ref()
                } else {
                    self.trained.as_ref()
                };

                match engine {
                    Some(engine) => engine.select_move(board, history, self.mark, &mut self.rng).await,
                    None => {
                        warn!("No remote service for {}, using heuristic", difficulty);
                        HeuristicSelector::select(board, self.mark, &mut self.rng)
                    }
                }
            }
        };

        if let Some(index) = index {
            info!("AI ({}) plays {}", difficulty, index);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{GenerationRequest, COMMENTARY_PLACEHOLDER};
    use crate::oracle::OracleError;
    use async_trait::async_trait;

    struct FixedOracle(Result<usize, OracleError>);

    #[async_trait]
    impl MoveOracle for FixedOracle {
        async fn suggest_move(&self, _board: &Board, _history: &[usize]) -> Result<usize, OracleError> {
            self.0.clone()
        }
    }

    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String> {
            if request.schema.is_some() {
                Ok(r#"{"move": 8, "reasoning": "corner"}"#.to_string())
            } else {
                Ok("'Corner taken.'".to_string())
            }
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    fn player() -> AiPlayer {
        AiPlayer::with_oracles(
            Arc::new(FixedOracle(Ok(8))),
            Arc::new(FixedOracle(Ok(2))),
            &AiConfig::default(),
        )
        .with_seed(11)
    }

    #[tokio::test]
    async fn test_medium_takes_center() {
        let board = Board::replay(&[0]).unwrap();
        let mut ai = player();
        assert_eq!(ai.choose_move(Difficulty::Medium, &board, &[0]).await, Some(4));
    }

    #[tokio::test]
    async fn test_easy_picks_empty_cell() {
        let board = Board::replay(&[0, 4, 8]).unwrap();
        let mut ai = player();
        for _ in 0..20 {
            let index = ai.choose_move(Difficulty::Easy, &board, &[0, 4, 8]).await.unwrap();
            assert!(board.is_empty_cell(index));
        }
    }

    #[tokio::test]
    async fn test_remote_tiers_use_their_oracles() {
        let board = Board::replay(&[4]).unwrap();
        let mut ai = player();
        assert_eq!(ai.choose_move(Difficulty::Hard, &board, &[4]).await, Some(8));
        assert_eq!(ai.choose_move(Difficulty::Trained, &board, &[4]).await, Some(2));
    }

    #[tokio::test]
    async fn test_offline_remote_tier_uses_heuristic() {
        let board: Board = "XX_ O__ ___".parse().unwrap();
        let mut ai = AiPlayer::offline().with_seed(1);
        assert_eq!(ai.choose_move(Difficulty::Hard, &board, &[0, 3, 1]).await, Some(2));
        assert!(ai.commentary().is_none());
    }

    #[tokio::test]
    async fn test_with_generator_wires_everything() {
        let retriever = TrainingRetriever::builtin().unwrap();
        let mut ai = AiPlayer::with_generator(Arc::new(EchoGenerator), retriever, &AiConfig::default());
        let board = Board::replay(&[4]).unwrap();

        assert_eq!(ai.choose_move(Difficulty::Hard, &board, &[4]).await, Some(8));
        assert_eq!(ai.choose_move(Difficulty::Trained, &board, &[4]).await, Some(8));

        let commentary = ai.commentary().unwrap().comment(&board, 8).await;
        assert_eq!(commentary, "Corner taken.");
        assert_ne!(commentary, COMMENTARY_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_full_board() {
        let board: Board = "XOX XOO OXX".parse().unwrap();
        let mut ai = player();
        for difficulty in Difficulty::all() {
            assert_eq!(ai.choose_move(*difficulty, &board, &[]).await, None);
        }
    }
}
