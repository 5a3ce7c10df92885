//! Contextual analyzer (optional capability)
//!
//! Bias detection conditioned on syntactic structure: named entities and
//! sentence sentiment fused into `contextual_bias` / `contextual_age`
//! flags, plus two gender-stereotype sub-checks (a dependency-pattern
//! match and an emotion-vs-logic regex). The whole component requires the
//! syntactic-parse capability; when that is absent it contributes zero
//! flags and the rest of the pipeline proceeds unaffected.

use crate::config::DetectionConfig;
use biaslens_classifiers::{
    ClassifierCapability, Entity, EntityLabel, ParseCapability, ParsedSentence, COMPARATIVES,
    GENDER_SUBJECTS, ROLE_NOUNS,
};
use biaslens_core::{Error, Flag, Result, Severity};
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Fixed confidence of the dependency-pattern gender-role match
const GENDER_ROLE_CONFIDENCE: f32 = 0.92;

/// Fixed confidence of the emotion-vs-logic regex match
const GENDER_EMOTION_CONFIDENCE: f32 = 0.88;

/// Output of one contextual pass
#[derive(Debug, Default)]
pub struct ContextualOutput {
    /// Contextual flags, in sentence order
    pub flags: Vec<Flag>,

    /// Categories touched (`contextual`, `contextual_age`, `gender`)
    pub categories: Vec<String>,

    /// Number of contextual flags, for the score aggregator
    pub contextual_flag_count: usize,
}

impl ContextualOutput {
    fn add_category(&mut self, category: &str) {
        if !self.categories.iter().any(|c| c == category) {
            self.categories.push(category.to_string());
        }
    }
}

/// Entity/sentiment fusion and gender-stereotype sub-checks
pub struct ContextualAnalyzer {
    age_patterns: Vec<Regex>,
    emotion_pattern: Regex,
    gender_subjects: HashSet<&'static str>,
    comparatives: HashSet<&'static str>,
    role_nouns: HashSet<&'static str>,
}

impl ContextualAnalyzer {
    /// Create the analyzer, compiling its patterns. Fatal on malformed
    /// patterns (startup-time validation).
    pub fn new() -> Result<Self> {
        let age_sources = [
            r"\b(young|millennial|gen z|current|today's)\b",
            r"\b(past|previous|older)\s+generation",
        ];
        let age_patterns = age_sources
            .iter()
            .map(|source| {
                Regex::new(source)
                    .map_err(|e| Error::config(format!("invalid age pattern '{source}': {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let emotion_source =
            r"(emotional|feelings|hormonal).*(interfere|affect|weaken|lower).*(decision|strategic|logical|rational)";
        let emotion_pattern = Regex::new(emotion_source)
            .map_err(|e| Error::config(format!("invalid emotion pattern: {e}")))?;

        Ok(Self {
            age_patterns,
            emotion_pattern,
            gender_subjects: GENDER_SUBJECTS.into_iter().collect(),
            comparatives: COMPARATIVES.into_iter().collect(),
            role_nouns: ROLE_NOUNS.into_iter().collect(),
        })
    }

    /// Run the contextual pass. Never fails the call: missing or broken
    /// optional capabilities degrade to an empty output.
    pub async fn run(
        &self,
        parse: &ParseCapability,
        sentiment: &ClassifierCapability,
        config: &DetectionConfig,
        text: &str,
    ) -> ContextualOutput {
        let mut output = ContextualOutput::default();

        let Some(analyzer) = parse.analyzer().await else {
            debug!("no syntactic-parse capability, skipping contextual analysis");
            return output;
        };

        let parsed = match analyzer.parse(text).await {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "syntactic parse failed, skipping contextual analysis");
                return output;
            }
        };

        self.entity_sentiment_pass(&parsed, sentiment, config, &mut output)
            .await;
        self.gender_stereotype_pass(&parsed, text, &mut output);

        output
    }

    /// Sentences with qualifying entities or age context whose sentiment is
    /// negative become `contextual_bias` / `contextual_age` flags.
    async fn entity_sentiment_pass(
        &self,
        parsed: &[ParsedSentence],
        sentiment: &ClassifierCapability,
        config: &DetectionConfig,
        output: &mut ContextualOutput,
    ) {
        let sentiment = match sentiment.get_or_init().await {
            Ok(classifier) => classifier,
            Err(e) => {
                warn!(error = %e, "sentiment capability unavailable, skipping entity-sentiment fusion");
                return;
            }
        };

        for sentence in parsed {
            let sentence_lower = sentence.text.to_lowercase();
            let has_age_context = self
                .age_patterns
                .iter()
                .any(|pattern| pattern.is_match(&sentence_lower));

            if sentence.entities.is_empty() && !has_age_context {
                continue;
            }

            let scores = match sentiment.classify(&sentence.text).await {
                Ok(scores) => scores,
                Err(e) => {
                    warn!(error = %e, "sentiment classification failed, aborting contextual pass");
                    return;
                }
            };

            let negative_score = scores
                .iter()
                .filter(|entry| config.is_negative_sentiment_label(&entry.label))
                .map(|entry| entry.score)
                .fold(0.0_f32, f32::max);

            if negative_score <= config.negative_sentiment_threshold {
                continue;
            }

            let has_bias_context = has_age_context
                || sentence.entities.iter().any(|entity| {
                    keywords_for(entity.label)
                        .iter()
                        .any(|keyword| sentence_lower.contains(keyword))
                });

            let severity = if has_bias_context && negative_score > config.high_severity_threshold
            {
                Severity::High
            } else {
                Severity::Medium
            };

            let mut entity_names: Vec<String> = sentence
                .entities
                .iter()
                .map(|entity: &Entity| entity.text.clone())
                .collect();
            if has_age_context {
                entity_names.push("age_context".to_string());
            }

            output.flags.push(Flag::contextual(
                "contextual_bias",
                sentence.text.trim(),
                severity,
                entity_names,
                negative_score,
            ));
            output.add_category(if has_age_context {
                "contextual_age"
            } else {
                "contextual"
            });
            output.contextual_flag_count += 1;
        }
    }

    /// Dependency-chain gender-role match plus the emotion-vs-logic regex.
    /// The two sub-checks are additive, not mutually exclusive.
    fn gender_stereotype_pass(
        &self,
        parsed: &[ParsedSentence],
        text: &str,
        output: &mut ContextualOutput,
    ) {
        let mut gender_flags = 0usize;

        for sentence in parsed {
            let tokens = &sentence.tokens;
            for (k, role) in tokens.iter().enumerate() {
                if !self.role_nouns.contains(role.lower.as_str()) {
                    continue;
                }
                let j = role.head;
                if j == k || !self.comparatives.contains(tokens[j].lower.as_str()) {
                    continue;
                }
                let i = tokens[j].head;
                if i == j || !self.gender_subjects.contains(tokens[i].lower.as_str()) {
                    continue;
                }

                let span = format!("{} {} {}", tokens[i].text, tokens[j].text, role.text);
                output.flags.push(
                    Flag::lexical("gender_role_stereotype", span, Severity::High)
                        .with_confidence(GENDER_ROLE_CONFIDENCE)
                        .with_explanation("Gender stereotyped role assignment detected"),
                );
                gender_flags += 1;
            }
        }

        if self.emotion_pattern.is_match(&text.to_lowercase()) {
            output.flags.push(
                Flag::lexical(
                    "gender_emotion_stereotype",
                    "emotional ... interfere ... strategic",
                    Severity::High,
                )
                .with_confidence(GENDER_EMOTION_CONFIDENCE)
                .with_explanation("Emotional vs logical gender stereotype detected"),
            );
            gender_flags += 1;
        }

        if gender_flags > 0 {
            output.add_category("gender");
            output.contextual_flag_count += gender_flags;
        }
    }
}

/// Bias-relevant keywords per entity category. A flag is high severity
/// only when one of these co-occurs with the entity in the sentence.
fn keywords_for(label: EntityLabel) -> &'static [&'static str] {
    match label {
        EntityLabel::Person => &["stereotype", "bias"],
        EntityLabel::Norp => &["nationality", "religion", "politics", "generation"],
        EntityLabel::Gpe => &["country", "location"],
        EntityLabel::Date => &["young", "old", "generation", "past", "today"],
        EntityLabel::Org => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biaslens_classifiers::{
        HeuristicAnalyzer, LazyCapability, SentimentLexiconClassifier, SyntacticAnalyzer,
        TextClassifier,
    };
    use std::sync::Arc;

    fn present_parser() -> ParseCapability {
        ParseCapability::present(LazyCapability::ready(
            "parser",
            Arc::new(HeuristicAnalyzer::new().unwrap()) as Arc<dyn SyntacticAnalyzer>,
        ))
    }

    fn lexicon_sentiment() -> ClassifierCapability {
        LazyCapability::ready(
            "sentiment",
            Arc::new(SentimentLexiconClassifier::new().unwrap()) as Arc<dyn TextClassifier>,
        )
    }

    #[tokio::test]
    async fn test_absent_capability_yields_nothing() {
        let analyzer = ContextualAnalyzer::new().unwrap();
        let config = DetectionConfig::default();

        let output = analyzer
            .run(
                &ParseCapability::absent(),
                &lexicon_sentiment(),
                &config,
                "Women are better suited for nursing roles. Millennials are lazy and entitled.",
            )
            .await;

        assert!(output.flags.is_empty());
        assert_eq!(output.contextual_flag_count, 0);
    }

    #[tokio::test]
    async fn test_gender_role_dependency_match() {
        let analyzer = ContextualAnalyzer::new().unwrap();
        let config = DetectionConfig::default();

        let output = analyzer
            .run(
                &present_parser(),
                &lexicon_sentiment(),
                &config,
                "Women are better suited for nursing roles.",
            )
            .await;

        let flag = output
            .flags
            .iter()
            .find(|f| f.kind == "gender_role_stereotype")
            .expect("expected gender_role_stereotype flag");
        assert_eq!(flag.severity, Severity::High);
        assert_eq!(flag.confidence, Some(0.92));
        assert!(output.categories.contains(&"gender".to_string()));
    }

    #[tokio::test]
    async fn test_emotion_regex_is_additive() {
        let analyzer = ContextualAnalyzer::new().unwrap();
        let config = DetectionConfig::default();

        let output = analyzer
            .run(
                &present_parser(),
                &lexicon_sentiment(),
                &config,
                "Women are better suited for support roles because emotional thinking can interfere with strategic decisions.",
            )
            .await;

        assert!(output.flags.iter().any(|f| f.kind == "gender_role_stereotype"));
        let emotion = output
            .flags
            .iter()
            .find(|f| f.kind == "gender_emotion_stereotype")
            .expect("expected gender_emotion_stereotype flag");
        assert_eq!(emotion.confidence, Some(0.88));
    }

    #[tokio::test]
    async fn test_age_context_negative_sentiment() {
        let analyzer = ContextualAnalyzer::new().unwrap();
        let config = DetectionConfig::default();

        let output = analyzer
            .run(
                &present_parser(),
                &lexicon_sentiment(),
                &config,
                "Millennial workers are lazy, entitled and naive.",
            )
            .await;

        let flag = output
            .flags
            .iter()
            .find(|f| f.kind == "contextual_bias")
            .expect("expected contextual flag");
        assert!(flag
            .entities
            .as_ref()
            .unwrap()
            .contains(&"age_context".to_string()));
        assert!(output.categories.contains(&"contextual_age".to_string()));
        assert_eq!(output.contextual_flag_count, 1);
    }

    #[tokio::test]
    async fn test_positive_sentence_not_flagged() {
        let analyzer = ContextualAnalyzer::new().unwrap();
        let config = DetectionConfig::default();

        let output = analyzer
            .run(
                &present_parser(),
                &lexicon_sentiment(),
                &config,
                "The Americans built a wonderful, inclusive community in France.",
            )
            .await;

        assert!(output.flags.is_empty());
    }
}
