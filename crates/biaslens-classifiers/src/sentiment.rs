//! Lightweight sentiment classifier (lexicon default)
//!
//! Lexicon-based classifier used when no external sentiment model is
//! injected. Emits both `negative` and `positive` label scores so the
//! contextual analyzer's polarity mapping works unchanged against a
//! transformer replacement.

use crate::classifier::{LabelScore, TextClassifier};
use aho_corasick::AhoCorasick;
use biaslens_core::{Error, Result};

pub struct SentimentLexiconClassifier {
    name: String,
    positive: AhoCorasick,
    negative: AhoCorasick,
}

impl SentimentLexiconClassifier {
    pub fn new() -> Result<Self> {
        Self::with_name("sentiment")
    }

    pub fn with_name(name: impl Into<String>) -> Result<Self> {
        let positive = vec![
            "good",
            "great",
            "excellent",
            "love",
            "amazing",
            "wonderful",
            "happy",
            "fantastic",
            "respectful",
            "fair",
            "balanced",
            "inclusive",
        ];
        let negative = vec![
            "bad",
            "terrible",
            "awful",
            "hate",
            "horrible",
            "worst",
            "lazy",
            "entitled",
            "incompetent",
            "inferior",
            "useless",
            "weak",
            "spoiled",
            "naive",
            "outdated",
            "confused",
        ];

        let positive = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(positive)
            .map_err(|e| {
                Error::classifier(format!("Failed to build positive sentiment matcher: {e}"))
            })?;

        let negative = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(negative)
            .map_err(|e| {
                Error::classifier(format!("Failed to build negative sentiment matcher: {e}"))
            })?;

        Ok(Self {
            name: name.into(),
            positive,
            negative,
        })
    }
}

#[async_trait::async_trait]
impl TextClassifier for SentimentLexiconClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
        let positive_hits = self.positive.find_iter(text).count() as f32;
        let negative_hits = self.negative.find_iter(text).count() as f32;
        let total = positive_hits + negative_hits;

        let positive_score = if total == 0.0 {
            0.5
        } else {
            positive_hits / total
        };

        Ok(vec![
            LabelScore::new("negative", 1.0 - positive_score),
            LabelScore::new("positive", positive_score),
        ])
    }

    fn name(&self) -> &str {
        &self.name
    }
}
