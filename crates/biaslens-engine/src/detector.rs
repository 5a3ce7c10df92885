//! Top-level bias detection entry point
//!
//! `BiasDetector` owns the category registry, the configuration, and the
//! four shared capabilities (hate, toxicity, sentiment, syntactic parse).
//! One call to [`BiasDetector::detect`] fully resolves before returning;
//! calls are stateless and may run in parallel once capabilities are warm.

use crate::category::CategoryRegistry;
use crate::config::DetectionConfig;
use crate::contextual::ContextualAnalyzer;
use crate::ensemble::ClassifierEnsemble;
use crate::lexical::LexicalMatcher;
use crate::report;
use crate::score::{aggregate_score, EvidenceTally};
use biaslens_classifiers::{
    ClassifierCapability, HateLexiconClassifier, HeuristicAnalyzer, LazyCapability,
    ParseCapability, SentimentLexiconClassifier, SyntacticAnalyzer, TextClassifier,
    ToxicityLexiconClassifier,
};
use biaslens_core::{split_sentences, BiasResult, Error, Result};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Multi-signal bias detector
pub struct BiasDetector {
    config: DetectionConfig,
    lexical: LexicalMatcher,
    contextual: ContextualAnalyzer,
    hate: ClassifierCapability,
    toxicity: ClassifierCapability,
    sentiment: ClassifierCapability,
    parse: ParseCapability,
}

impl BiasDetector {
    /// Start building a detector
    pub fn builder() -> BiasDetectorBuilder {
        BiasDetectorBuilder::new()
    }

    /// Build a detector with default configuration and the built-in
    /// lexicon capabilities
    pub fn with_defaults() -> Result<Self> {
        Self::builder().build()
    }

    /// Analyze text for bias.
    ///
    /// Empty or whitespace-only input is an input error reported before
    /// any capability is touched. Hate/toxicity classifier failure is
    /// fatal to the call; a missing syntactic-parse or sentiment
    /// capability degrades to zero contextual flags.
    pub async fn detect(&self, text: &str) -> Result<BiasResult> {
        if text.trim().is_empty() {
            return Err(Error::input("No text provided"));
        }

        // Deterministic lexical scan first; no capabilities involved.
        let lexical = self.lexical.scan(text);
        let lexical_flag_count = lexical.flags.len();

        // Mandatory ensemble signals; unavailability fails the call.
        let hate = self.hate.get_or_init().await?;
        let toxicity = self.toxicity.get_or_init().await?;
        let sentences = split_sentences(text);
        let ensemble = ClassifierEnsemble::new(&self.config)
            .run(hate, toxicity, &sentences)
            .await?;

        // Optional contextual signals; absence degrades gracefully.
        let contextual = self
            .contextual
            .run(&self.parse, &self.sentiment, &self.config, text)
            .await;

        let mut flags = lexical.flags;
        flags.extend(ensemble.flags);
        flags.extend(contextual.flags);

        let mut categories = lexical.categories;
        for category in ensemble.categories.into_iter().chain(contextual.categories) {
            if !categories.iter().any(|c| c == &category) {
                categories.push(category);
            }
        }

        let bias_score = aggregate_score(
            &EvidenceTally {
                total_flags: flags.len(),
                hate_scores: &ensemble.hate_scores,
                toxicity_scores: &ensemble.toxicity_scores,
                contextual_flags: contextual.contextual_flag_count,
                lexical_flags: lexical_flag_count,
                categories: &categories,
            },
            &self.config.weights,
        );

        let detailed_report = report::render(bias_score, &categories, &flags, &lexical.suggestions);

        debug!(
            flags = flags.len(),
            categories = categories.len(),
            bias_score,
            "bias detection complete"
        );

        Ok(BiasResult {
            success: true,
            overall_bias_detected: !flags.is_empty(),
            bias_score,
            categories,
            flags,
            suggestions: lexical.suggestions,
            detailed_report,
        })
    }

    /// Analyze text and render the transport-level JSON envelope:
    /// `{success: true, ...}` on success, `{success: false, error}` on
    /// failure. The enclosing service serializes this directly.
    pub async fn detect_response(&self, text: &str) -> serde_json::Value {
        match self.detect(text).await {
            Ok(result) => serde_json::to_value(&result)
                .unwrap_or_else(|e| json!({ "success": false, "error": e.to_string() })),
            Err(e) => json!({ "success": false, "error": e.response_message() }),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// The category registry backing the lexical matcher
    pub fn registry(&self) -> &CategoryRegistry {
        self.lexical.registry()
    }
}

/// Builder for [`BiasDetector`].
///
/// Capabilities default to the built-in lexicon classifiers and the
/// heuristic parser; the enclosing service injects model-backed
/// replacements through the `with_*` methods.
pub struct BiasDetectorBuilder {
    config: DetectionConfig,
    hate: Option<ClassifierCapability>,
    toxicity: Option<ClassifierCapability>,
    sentiment: Option<ClassifierCapability>,
    parse: Option<ParseCapability>,
}

impl BiasDetectorBuilder {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self {
            config: DetectionConfig::default(),
            hate: None,
            toxicity: None,
            sentiment: None,
            parse: None,
        }
    }

    /// Use the given configuration
    pub fn with_config(mut self, config: DetectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject the hate classifier capability
    pub fn with_hate_classifier(mut self, capability: ClassifierCapability) -> Self {
        self.hate = Some(capability);
        self
    }

    /// Inject the toxicity classifier capability
    pub fn with_toxicity_classifier(mut self, capability: ClassifierCapability) -> Self {
        self.toxicity = Some(capability);
        self
    }

    /// Inject the sentiment classifier capability
    pub fn with_sentiment_classifier(mut self, capability: ClassifierCapability) -> Self {
        self.sentiment = Some(capability);
        self
    }

    /// Inject (or remove) the syntactic-parse capability
    pub fn with_parse_capability(mut self, capability: ParseCapability) -> Self {
        self.parse = Some(capability);
        self
    }

    /// Validate configuration, compile category patterns, and build the
    /// detector. Misconfiguration is fatal here, never at request time.
    pub fn build(self) -> Result<BiasDetector> {
        self.config.validate()?;

        let registry = Arc::new(CategoryRegistry::standard()?);
        info!(categories = registry.len(), "category registry ready");

        let hate = self.hate.unwrap_or_else(|| {
            LazyCapability::new(
                "hate",
                Box::new(|| {
                    Box::pin(async {
                        Ok(Arc::new(HateLexiconClassifier::new()?) as Arc<dyn TextClassifier>)
                    })
                }),
            )
        });
        let toxicity = self.toxicity.unwrap_or_else(|| {
            LazyCapability::new(
                "toxicity",
                Box::new(|| {
                    Box::pin(async {
                        Ok(Arc::new(ToxicityLexiconClassifier::new()?) as Arc<dyn TextClassifier>)
                    })
                }),
            )
        });
        let sentiment = self.sentiment.unwrap_or_else(|| {
            LazyCapability::new(
                "sentiment",
                Box::new(|| {
                    Box::pin(async {
                        Ok(Arc::new(SentimentLexiconClassifier::new()?) as Arc<dyn TextClassifier>)
                    })
                }),
            )
        });
        let parse = self.parse.unwrap_or_else(|| {
            ParseCapability::present(LazyCapability::new(
                "parser",
                Box::new(|| {
                    Box::pin(async {
                        Ok(Arc::new(HeuristicAnalyzer::new()?) as Arc<dyn SyntacticAnalyzer>)
                    })
                }),
            ))
        });

        Ok(BiasDetector {
            lexical: LexicalMatcher::new(registry),
            contextual: ContextualAnalyzer::new()?,
            config: self.config,
            hate,
            toxicity,
            sentiment,
            parse,
        })
    }
}

impl Default for BiasDetectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
