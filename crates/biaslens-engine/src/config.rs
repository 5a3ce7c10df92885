//! Detection configuration
//!
//! Thresholds, score weights, and classifier label mappings. The ML flag
//! threshold (0.4) and the high-severity cutoff (0.7) were tuned by trial;
//! they live here as configuration rather than as literals in pipeline
//! logic so they stay tunable. The default penalty weights must be
//! preserved exactly for score reproducibility.

use biaslens_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for one detection pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Minimum classifier probability for a flag to be emitted
    #[serde(default = "default_flag_threshold")]
    pub flag_threshold: f32,

    /// Probability above which an ML or contextual flag is high severity
    #[serde(default = "default_high_severity_threshold")]
    pub high_severity_threshold: f32,

    /// Minimum negative-sentiment probability for a contextual flag
    #[serde(default = "default_negative_sentiment_threshold")]
    pub negative_sentiment_threshold: f32,

    /// Labels the hate classifier may use for its positive class.
    /// Matched case-insensitively.
    #[serde(default = "default_hate_labels")]
    pub hate_labels: Vec<String>,

    /// Labels the toxicity classifier may use for its positive class
    #[serde(default = "default_toxic_labels")]
    pub toxic_labels: Vec<String>,

    /// Labels the sentiment classifier may use for negative polarity.
    /// An explicit mapping: polarity is never inferred from label index.
    #[serde(default = "default_negative_sentiment_labels")]
    pub negative_sentiment_labels: Vec<String>,

    /// Score penalty weights
    #[serde(default)]
    pub weights: PenaltyWeights,
}

/// Weights of the score penalty formula.
///
/// ML-ensemble and contextual evidence weigh most heavily and lexical hits
/// lightly, reflecting their relative false-positive rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyWeights {
    /// Multiplier on the average above-threshold hate probability
    #[serde(default = "default_hate_weight")]
    pub hate: f64,

    /// Multiplier on the average above-threshold toxicity probability
    #[serde(default = "default_toxicity_weight")]
    pub toxicity: f64,

    /// Per contextual flag
    #[serde(default = "default_contextual_weight")]
    pub contextual: f64,

    /// Per age-related category
    #[serde(default = "default_age_weight")]
    pub age: f64,

    /// Per lexical flag
    #[serde(default = "default_lexical_weight")]
    pub lexical: f64,
}

fn default_flag_threshold() -> f32 {
    0.4
}

fn default_high_severity_threshold() -> f32 {
    0.7
}

fn default_negative_sentiment_threshold() -> f32 {
    0.5
}

fn default_hate_labels() -> Vec<String> {
    vec!["label_1".to_string(), "hate".to_string()]
}

fn default_toxic_labels() -> Vec<String> {
    vec!["toxic".to_string()]
}

fn default_negative_sentiment_labels() -> Vec<String> {
    vec!["label_0".to_string(), "negative".to_string()]
}

fn default_hate_weight() -> f64 {
    25.0
}

fn default_toxicity_weight() -> f64 {
    25.0
}

fn default_contextual_weight() -> f64 {
    20.0
}

fn default_age_weight() -> f64 {
    10.0
}

fn default_lexical_weight() -> f64 {
    8.0
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            hate: default_hate_weight(),
            toxicity: default_toxicity_weight(),
            contextual: default_contextual_weight(),
            age: default_age_weight(),
            lexical: default_lexical_weight(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            flag_threshold: default_flag_threshold(),
            high_severity_threshold: default_high_severity_threshold(),
            negative_sentiment_threshold: default_negative_sentiment_threshold(),
            hate_labels: default_hate_labels(),
            toxic_labels: default_toxic_labels(),
            negative_sentiment_labels: default_negative_sentiment_labels(),
            weights: PenaltyWeights::default(),
        }
    }
}

impl DetectionConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse detection config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Validate thresholds and weights
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("flag_threshold", self.flag_threshold),
            ("high_severity_threshold", self.high_severity_threshold),
            (
                "negative_sentiment_threshold",
                self.negative_sentiment_threshold,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }

        if self.hate_labels.is_empty() || self.toxic_labels.is_empty() {
            return Err(Error::config("classifier label mappings must be non-empty"));
        }

        for weight in [
            self.weights.hate,
            self.weights.toxicity,
            self.weights.contextual,
            self.weights.age,
            self.weights.lexical,
        ] {
            if weight < 0.0 {
                return Err(Error::config(format!("penalty weights must be >= 0, got {weight}")));
            }
        }

        Ok(())
    }

    /// Whether `label` maps to the hate-positive class
    pub fn is_hate_label(&self, label: &str) -> bool {
        self.hate_labels.iter().any(|l| l.eq_ignore_ascii_case(label))
    }

    /// Whether `label` maps to the toxic-positive class
    pub fn is_toxic_label(&self, label: &str) -> bool {
        self.toxic_labels.iter().any(|l| l.eq_ignore_ascii_case(label))
    }

    /// Whether `label` maps to negative sentiment polarity
    pub fn is_negative_sentiment_label(&self, label: &str) -> bool {
        self.negative_sentiment_labels
            .iter()
            .any(|l| l.eq_ignore_ascii_case(label))
    }
}
