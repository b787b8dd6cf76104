//! Language-model backed move oracle

use std::sync::Arc;

use async_trait::async_trait;
use protocol::{Board, Mark};
use tracing::{debug, info};

use super::{GenerationRequest, MoveParser, PromptTemplate, RemoteTier, TextGenerator};
use crate::oracle::{MoveOracle, OracleError};
use crate::training::TrainingRetriever;

/// Asks a text generator for a move and parses the answer
pub struct LlmOracle {
    generator: Arc<dyn TextGenerator>,
    tier: RemoteTier,
    mark: Mark,
    retriever: Option<TrainingRetriever>,
    temperature: f32,
    max_tokens: u32,
}

impl LlmOracle {
    /// Hard tier: expert prompt, no examples
    pub fn hard(generator: Arc<dyn TextGenerator>, mark: Mark) -> Self {
        Self {
            generator,
            tier: RemoteTier::Hard,
            mark,
            retriever: None,
            temperature: 0.1,
            max_tokens: 256,
        }
    }

    /// Trained tier: few-shot examples from the recorded corpus
    pub fn trained(generator: Arc<dyn TextGenerator>, mark: Mark, retriever: TrainingRetriever) -> Self {
        Self {
            generator,
            tier: RemoteTier::Trained,
            mark,
            retriever: Some(retriever),
            temperature: 0.1,
            max_tokens: 64,
        }
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Build the generation request for a position
    pub fn build_request(&self, board: &Board, history: &[usize]) -> GenerationRequest {
        let examples = self
            .retriever
            .as_ref()
            .map(|r| r.matching(history))
            .unwrap_or_default();

        let prompt = PromptTemplate::move_request_prompt(board, history, self.mark, self.tier, &examples);
        debug!("Move prompt ({:?}): {} chars, {} examples", self.tier, prompt.len(), examples.len());

        GenerationRequest::new(prompt, self.temperature)
            .with_system(PromptTemplate::system_prompt(self.tier))
            .with_schema(PromptTemplate::move_schema(self.tier))
            .with_max_tokens(self.max_tokens)
    }
}

#[async_trait]
impl MoveOracle for LlmOracle {
    async fn suggest_move(&self, board: &Board, history: &[usize]) -> Result<usize, OracleError> {
        let request = self.build_request(board, history);

        let response = self
            .generator
            .generate(&request)
            .await
            .map_err(|e| OracleError::Service(format!("{:#}", e)))?;

        let index = MoveParser::parse_with_fix(&response, board)?;
        info!("Model ({}) suggested cell {}", self.generator.model(), index);
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{TrainingCorpus, TrainingRecord};
    use std::sync::Mutex;

    /// Returns a canned response and records the last request
    struct FakeGenerator {
        response: anyhow::Result<String>,
        last_request: Mutex<Option<GenerationRequest>>,
    }

    impl FakeGenerator {
        fn ok(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                last_request: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(anyhow::anyhow!("connection refused")),
                last_request: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String> {
            *self.last_request.lock().unwrap() = Some(request.clone());
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(anyhow::anyhow!("{}", e)),
            }
        }

        fn model(&self) -> &str {
            "fake"
        }
    }

    fn retriever() -> TrainingRetriever {
        let corpus = TrainingCorpus::new(vec![
            TrainingRecord::new(Mark::X, vec![4, 0, 2, 7, 6]),
            TrainingRecord::new(Mark::X, vec![0, 4, 1, 8, 2]),
        ])
        .unwrap();
        TrainingRetriever::new(Arc::new(corpus))
    }

    #[tokio::test]
    async fn test_hard_oracle_parses_move() {
        let generator = Arc::new(FakeGenerator::ok(r#"{"move": 4, "reasoning": "center"}"#));
        let oracle = LlmOracle::hard(generator.clone(), Mark::O);
        let board = Board::replay(&[0]).unwrap();

        assert_eq!(oracle.suggest_move(&board, &[0]).await, Ok(4));

        let request = generator.last_request.lock().unwrap().clone().unwrap();
        assert!(request.temperature < 0.2);
        assert_eq!(request.schema.unwrap()["required"][1], "reasoning");
    }

    #[tokio::test]
    async fn test_oracle_rejects_occupied_cell() {
        let generator = Arc::new(FakeGenerator::ok(r#"{"move": 0}"#));
        let oracle = LlmOracle::hard(generator, Mark::O);
        let board = Board::replay(&[0]).unwrap();

        assert_eq!(
            oracle.suggest_move(&board, &[0]).await,
            Err(OracleError::Occupied { cell: 0 })
        );
    }

    #[tokio::test]
    async fn test_oracle_maps_service_error() {
        let oracle = LlmOracle::hard(Arc::new(FakeGenerator::failing()), Mark::O);
        let result = oracle.suggest_move(&Board::empty(), &[]).await;

        assert!(matches!(result, Err(OracleError::Service(msg)) if msg.contains("connection refused")));
    }

    #[test]
    fn test_trained_request_includes_examples() {
        let generator = Arc::new(FakeGenerator::ok("{}"));
        let oracle = LlmOracle::trained(generator, Mark::O, retriever());
        let board = Board::replay(&[4]).unwrap();

        let request = oracle.build_request(&board, &[4]);
        assert!(request.prompt.contains("Example 1 (winner X): 4, 0, 2, 7, 6"));
        assert!(!request.prompt.contains("0, 4, 1, 8, 2"));
        assert_eq!(request.schema.unwrap()["required"], serde_json::json!(["move"]));
    }

    #[tokio::test]
    async fn test_trained_without_matching_history() {
        let generator = Arc::new(FakeGenerator::ok(r#"{"move": 4}"#));
        let oracle = LlmOracle::trained(generator.clone(), Mark::O, retriever());
        let board = Board::replay(&[8]).unwrap();

        assert_eq!(oracle.suggest_move(&board, &[8]).await, Ok(4));

        let request = generator.last_request.lock().unwrap().clone().unwrap();
        assert!(!request.prompt.contains("Recorded games"));
        assert!(!request.prompt.contains("Example 1"));
        assert_eq!(request.schema.unwrap()["required"], serde_json::json!(["move"]));
    }
}
