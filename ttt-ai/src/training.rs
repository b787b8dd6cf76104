//! Few-shot example retrieval from recorded games

use std::sync::Arc;

use protocol::{TrainingCorpus, TrainingRecord, MAX_TRAINING_EXAMPLES};
use tracing::debug;

/// Bundled corpus, loaded once at startup
const BUILTIN_CORPUS: &str = include_str!("../data/training_games.json");

/// Parse and validate the bundled corpus
pub fn builtin_corpus() -> protocol::Result<TrainingCorpus> {
    TrainingCorpus::from_json(BUILTIN_CORPUS)
}

/// Finds recorded games that continue the current move history
#[derive(Debug, Clone)]
pub struct TrainingRetriever {
    corpus: Arc<TrainingCorpus>,
}

impl TrainingRetriever {
    pub fn new(corpus: Arc<TrainingCorpus>) -> Self {
        Self { corpus }
    }

    /// Retriever over the bundled corpus
    pub fn builtin() -> protocol::Result<Self> {
        Ok(Self::new(Arc::new(builtin_corpus()?)))
    }

    /// Up to three games, in corpus order, whose moves start with `history`.
    /// An empty result just means no extra context.
    pub fn matching(&self, history: &[usize]) -> Vec<&TrainingRecord> {
        let matches: Vec<&TrainingRecord> = self
            .corpus
            .records()
            .iter()
            .filter(|record| record.starts_with(history))
            .take(MAX_TRAINING_EXAMPLES)
            .collect();

        debug!(
            "Training examples for history {:?}: {}",
            history,
            matches.len()
        );
        matches
    }

    pub fn corpus(&self) -> &TrainingCorpus {
        &self.corpus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::Mark;

    fn corpus() -> TrainingCorpus {
        TrainingCorpus::new(vec![
            TrainingRecord::new(Mark::X, vec![4, 0, 2, 7, 6]),
            TrainingRecord::new(Mark::X, vec![0, 4, 1, 8, 2]),
            TrainingRecord::new(Mark::O, vec![4, 0, 2, 6, 7, 3]),
            TrainingRecord::new(Mark::X, vec![4, 0, 1, 6, 2, 5, 7]),
            TrainingRecord::new(Mark::X, vec![4, 0, 6, 2, 8, 3, 7]),
            TrainingRecord::new(Mark::X, vec![4, 2, 8, 1, 0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_prefix_match_capped_at_three() {
        let retriever = TrainingRetriever::new(Arc::new(corpus()));
        let matches = retriever.matching(&[4, 0]);

        assert_eq!(matches.len(), MAX_TRAINING_EXAMPLES);
        for record in &matches {
            assert_eq!(&record.moves[..2], &[4, 0]);
        }
        // Corpus order is preserved
        assert_eq!(matches[0].moves, vec![4, 0, 2, 7, 6]);
        assert_eq!(matches[1].moves, vec![4, 0, 2, 6, 7, 3]);
        assert_eq!(matches[2].moves, vec![4, 0, 1, 6, 2, 5, 7]);
    }

    #[test]
    fn test_prefix_is_positional() {
        let retriever = TrainingRetriever::new(Arc::new(corpus()));
        let matches = retriever.matching(&[0, 4]);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].moves, vec![0, 4, 1, 8, 2]);
    }

    #[test]
    fn test_no_match() {
        let retriever = TrainingRetriever::new(Arc::new(corpus()));
        assert!(retriever.matching(&[5]).is_empty());
        assert!(retriever.matching(&[4, 2, 8, 1, 0, 3]).is_empty());
    }

    #[test]
    fn test_empty_history_matches_first_three() {
        let retriever = TrainingRetriever::new(Arc::new(corpus()));
        let matches = retriever.matching(&[]);
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].moves, vec![4, 0, 2, 7, 6]);
    }

    #[test]
    fn test_builtin_corpus_loads() {
        let retriever = TrainingRetriever::builtin().unwrap();
        assert!(!retriever.corpus().is_empty());

        let matches = retriever.matching(&[4, 0]);
        assert!(!matches.is_empty() && matches.len() <= MAX_TRAINING_EXAMPLES);
        assert!(matches.iter().all(|r| r.starts_with(&[4, 0])));
    }
}
