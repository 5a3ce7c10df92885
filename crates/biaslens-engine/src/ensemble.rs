//! Classifier ensemble adapter
//!
//! Runs the hate and toxicity classifiers over the sentence batch and
//! thresholds their label probabilities into flags. Unlike the contextual
//! analyzer, these capabilities are mandatory: the score formula assumes
//! their signals are present, so classifier failure fails the whole
//! detection call rather than silently skewing the score.

use crate::config::DetectionConfig;
use biaslens_classifiers::TextClassifier;
use biaslens_core::{Flag, Result, Severity};
use std::sync::Arc;
use tracing::debug;

/// Output of one ensemble pass
#[derive(Debug, Default)]
pub struct EnsembleOutput {
    /// ML flags, per sentence: hate flags first, then toxicity flags
    pub flags: Vec<Flag>,

    /// Categories touched (`hate`, `toxicity`), in first-trigger order
    pub categories: Vec<String>,

    /// Raw above-threshold hate probabilities, retained for the aggregator
    pub hate_scores: Vec<f32>,

    /// Raw above-threshold toxicity probabilities
    pub toxicity_scores: Vec<f32>,
}

impl EnsembleOutput {
    fn add_category(&mut self, category: &str) {
        if !self.categories.iter().any(|c| c == category) {
            self.categories.push(category.to_string());
        }
    }
}

/// Fuses the hate and toxicity classifier signals
pub struct ClassifierEnsemble<'a> {
    config: &'a DetectionConfig,
}

impl<'a> ClassifierEnsemble<'a> {
    /// Create an ensemble over the given configuration
    pub fn new(config: &'a DetectionConfig) -> Self {
        Self { config }
    }

    /// Run both classifiers over the sentence batch and threshold results
    pub async fn run(
        &self,
        hate: Arc<dyn TextClassifier>,
        toxicity: Arc<dyn TextClassifier>,
        sentences: &[&str],
    ) -> Result<EnsembleOutput> {
        let (hate_preds, toxicity_preds) = tokio::try_join!(
            hate.classify_batch(sentences),
            toxicity.classify_batch(sentences)
        )?;

        let mut output = EnsembleOutput::default();

        for ((hate_pred, toxicity_pred), sentence) in hate_preds
            .iter()
            .zip(toxicity_preds.iter())
            .zip(sentences.iter())
        {
            for entry in hate_pred {
                if self.config.is_hate_label(&entry.label)
                    && entry.score > self.config.flag_threshold
                {
                    output.hate_scores.push(entry.score);
                    output.flags.push(Flag::ml(
                        "ml_hate",
                        *sentence,
                        self.severity_for(entry.score),
                        entry.score,
                    ));
                    output.add_category("hate");
                }
            }

            for entry in toxicity_pred {
                if self.config.is_toxic_label(&entry.label)
                    && entry.score > self.config.flag_threshold
                {
                    output.toxicity_scores.push(entry.score);
                    output.flags.push(Flag::ml(
                        "ml_toxicity",
                        *sentence,
                        self.severity_for(entry.score),
                        entry.score,
                    ));
                    output.add_category("toxicity");
                }
            }
        }

        debug!(
            sentences = sentences.len(),
            hate_flags = output.hate_scores.len(),
            toxicity_flags = output.toxicity_scores.len(),
            "ensemble pass complete"
        );

        Ok(output)
    }

    fn severity_for(&self, score: f32) -> Severity {
        if score > self.config.high_severity_threshold {
            Severity::High
        } else {
            Severity::Medium
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use biaslens_classifiers::LabelScore;
    use biaslens_core::Error;

    struct FixedClassifier {
        label: &'static str,
        score: f32,
    }

    #[async_trait]
    impl TextClassifier for FixedClassifier {
        async fn classify(&self, _text: &str) -> Result<Vec<LabelScore>> {
            Ok(vec![LabelScore::new(self.label, self.score)])
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct UnavailableClassifier;

    #[async_trait]
    impl TextClassifier for UnavailableClassifier {
        async fn classify(&self, _text: &str) -> Result<Vec<LabelScore>> {
            Err(Error::classifier("model unavailable"))
        }

        fn name(&self) -> &str {
            "unavailable"
        }
    }

    #[tokio::test]
    async fn test_threshold_gates_flags() {
        let config = DetectionConfig::default();
        let ensemble = ClassifierEnsemble::new(&config);

        // below the 0.4 threshold: nothing emitted
        let output = ensemble
            .run(
                Arc::new(FixedClassifier { label: "hate", score: 0.3 }),
                Arc::new(FixedClassifier { label: "toxic", score: 0.2 }),
                &["A sentence."],
            )
            .await
            .unwrap();
        assert!(output.flags.is_empty());
        assert!(output.hate_scores.is_empty());
    }

    #[tokio::test]
    async fn test_severity_cutoffs() {
        let config = DetectionConfig::default();
        let ensemble = ClassifierEnsemble::new(&config);

        let output = ensemble
            .run(
                Arc::new(FixedClassifier { label: "hate", score: 0.5 }),
                Arc::new(FixedClassifier { label: "toxic", score: 0.85 }),
                &["A sentence."],
            )
            .await
            .unwrap();

        assert_eq!(output.flags.len(), 2);
        let hate_flag = output.flags.iter().find(|f| f.kind == "ml_hate").unwrap();
        assert_eq!(hate_flag.severity, Severity::Medium);
        let toxicity_flag = output.flags.iter().find(|f| f.kind == "ml_toxicity").unwrap();
        assert_eq!(toxicity_flag.severity, Severity::High);
        assert_eq!(toxicity_flag.confidence, Some(0.85));

        assert_eq!(output.categories, vec!["hate", "toxicity"]);
        assert_eq!(output.hate_scores, vec![0.5]);
        assert_eq!(output.toxicity_scores, vec![0.85]);
    }

    #[tokio::test]
    async fn test_label_mapping_respects_config() {
        let config = DetectionConfig::default();
        let ensemble = ClassifierEnsemble::new(&config);

        // "LABEL_1" is a configured hate label alias
        let output = ensemble
            .run(
                Arc::new(FixedClassifier { label: "LABEL_1", score: 0.9 }),
                Arc::new(FixedClassifier { label: "non-toxic", score: 0.9 }),
                &["A sentence."],
            )
            .await
            .unwrap();

        assert_eq!(output.flags.len(), 1);
        assert_eq!(output.flags[0].kind, "ml_hate");
    }

    #[tokio::test]
    async fn test_classifier_failure_is_fatal() {
        let config = DetectionConfig::default();
        let ensemble = ClassifierEnsemble::new(&config);

        let result = ensemble
            .run(
                Arc::new(UnavailableClassifier),
                Arc::new(FixedClassifier { label: "toxic", score: 0.1 }),
                &["A sentence."],
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_ml_flags_carry_sentence_text() {
        let config = DetectionConfig::default();
        let ensemble = ClassifierEnsemble::new(&config);

        let output = ensemble
            .run(
                Arc::new(FixedClassifier { label: "hate", score: 0.8 }),
                Arc::new(FixedClassifier { label: "safe", score: 0.8 }),
                &["First sentence.", "Second sentence."],
            )
            .await
            .unwrap();

        assert_eq!(output.flags.len(), 2);
        assert_eq!(output.flags[0].text.as_deref(), Some("First sentence."));
        assert_eq!(output.flags[1].text.as_deref(), Some("Second sentence."));
        assert!(output.flags[0].matched_text.is_none());
    }
}
