//! Hate speech detection classifier (lexicon default)

use crate::classifier::{LabelScore, TextClassifier};
use aho_corasick::AhoCorasick;
use biaslens_core::{Error, Result};
use std::collections::HashSet;

/// Hate speech classifier.
///
/// This implementation is intentionally dependency-light: a bounded-score
/// lexicon matcher standing in for a model-backed classifier. It emits the
/// same label vocabulary (`hate` / `not-hate`) a transformer replacement
/// would, so the ensemble adapter needs no changes when one is injected.
pub struct HateLexiconClassifier {
    name: String,
    patterns: AhoCorasick,
}

impl HateLexiconClassifier {
    /// Create a new hate speech classifier
    pub fn new() -> Result<Self> {
        let hate_patterns = [
            "hate",
            "despise",
            "vermin",
            "subhuman",
            "inferior race",
            "not welcome here",
            "go back to your country",
            "get rid of them",
            "they don't belong",
            "those people are all",
        ];

        let patterns = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(hate_patterns)
            .map_err(|e| Error::classifier(format!("Failed to build hate matcher: {e}")))?;

        Ok(Self {
            name: "hate".to_string(),
            patterns,
        })
    }

    fn score_with_patterns(&self, text: &str) -> f32 {
        // Count distinct patterns, not occurrences, so repetition of one
        // term does not saturate the score.
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
impl TextClassifier for HateLexiconClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
        let score = self.score_with_patterns(text);

        Ok(vec![
            LabelScore::new("hate", score),
            LabelScore::new("not-hate", 1.0 - score),
        ])
    }

    fn name(&self) -> &str {
        &self.name
    }
}
