//! Toxicity detection classifier (lexicon default)

use crate::classifier::{LabelScore, TextClassifier};
use aho_corasick::AhoCorasick;
use biaslens_core::{Error, Result};
use std::collections::HashSet;

/// Toxicity classifier.
///
/// Lexicon-based stand-in for a model-backed toxicity classifier, emitting
/// `toxic` / `non-toxic` label scores.
pub struct ToxicityLexiconClassifier {
    name: String,
    patterns: AhoCorasick,
}

impl ToxicityLexiconClassifier {
    /// Create a new toxicity classifier
    pub fn new() -> Result<Self> {
        let toxic_patterns = [
            "stupid", "idiot", "dumb", "kill", "die", "worst", "terrible", "awful", "sucks",
            "garbage", "trash", "shut up", "pathetic", "worthless", "disgusting", "moron",
            "loser",
        ];

        let patterns = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(toxic_patterns)
            .map_err(|e| Error::classifier(format!("Failed to build toxicity matcher: {e}")))?;

        Ok(Self {
            name: "toxicity".to_string(),
            patterns,
        })
    }

    fn score_with_patterns(&self, text: &str) -> f32 {
        let matched: HashSet<usize> = self
            .patterns
            .find_iter(text)
            .map(|m| m.pattern().as_usize())
            .collect();

        // Keep confidence bounded for lexicon-only approach.
        (matched.len() as f32 * 0.35).clamp(0.0, 0.95)
    }
}

#[async_trait::async_trait]
impl TextClassifier for ToxicityLexiconClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
        let score = self.score_with_patterns(text);

        Ok(vec![
            LabelScore::new("toxic", score),
            LabelScore::new("non-toxic", 1.0 - score),
        ])
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::score_for;

    #[tokio::test]
    async fn test_toxicity_classifier_clean() {
        let classifier = ToxicityLexiconClassifier::new().unwrap();

        let scores = classifier.classify("What a lovely day").await.unwrap();
        assert!(score_for(&scores, "toxic").unwrap().score < 0.4);
    }

    #[tokio::test]
    async fn test_toxicity_classifier_toxic() {
        let classifier = ToxicityLexiconClassifier::new().unwrap();

        let scores = classifier
            .classify("You stupid idiot, your work is garbage")
            .await
            .unwrap();
        assert!(score_for(&scores, "toxic").unwrap().score > 0.7);
    }
}
