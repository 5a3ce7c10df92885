//! TextClassifier trait and common types

use async_trait::async_trait;
use biaslens_core::Result;
use serde::{Deserialize, Serialize};

/// One (label, probability) pair from a classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelScore {
    /// Classification label (e.g. `hate`, `toxic`, `negative`)
    pub label: String,

    /// Probability in [0.0, 1.0]
    pub score: f32,
}

impl LabelScore {
    /// Create a new label score
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Trait for all text classifiers.
///
/// The engine treats every classifier as an opaque capability: text in,
/// per-label probabilities out. Model-backed implementations are injected
/// by the enclosing service; this crate ships lexicon-based defaults.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classify the given text, returning all label scores
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>>;

    /// Classify a batch of texts. The default runs sequentially; batched
    /// implementations may override for throughput.
    async fn classify_batch(&self, texts: &[&str]) -> Result<Vec<Vec<LabelScore>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.classify(text).await?);
        }
        Ok(results)
    }

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Find the score for a label, matched case-insensitively
pub fn score_for<'a>(scores: &'a [LabelScore], label: &str) -> Option<&'a LabelScore> {
    scores
        .iter()
        .find(|entry| entry.label.eq_ignore_ascii_case(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_for_is_case_insensitive() {
        let scores = vec![
            LabelScore::new("LABEL_0", 0.8),
            LabelScore::new("LABEL_1", 0.2),
        ];
        assert_eq!(score_for(&scores, "label_0").unwrap().score, 0.8);
        assert!(score_for(&scores, "toxic").is_none());
    }
}
