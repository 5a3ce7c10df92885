//! Core types for BiasLens
//!
//! A detection call produces an ordered sequence of [`Flag`]s (evidence),
//! [`Suggestion`]s (remediation proposals), and one aggregate [`BiasResult`].
//! All of these are immutable value objects created fresh per call.

use serde::{Deserialize, Serialize};

/// Severity tier for a flag, used for sorting and score weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Plausible issue, worth review
    Medium,
    /// Strong evidence of bias
    High,
}

impl Severity {
    /// Uppercase label for report rendering
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
        }
    }
}

/// One piece of detected evidence.
///
/// Flags vary by origin: lexical flags carry `matched_text`, ML flags carry
/// the full sentence in `text` plus a `confidence`, contextual flags carry
/// `matched_text`, `entities`, and `confidence`. Absent fields are omitted
/// from serialized records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    /// Category id or ML-signal name (e.g. `ml_hate`, `contextual_bias`,
    /// `gender_role_stereotype`)
    #[serde(rename = "type")]
    pub kind: String,

    /// Severity tier
    pub severity: Severity,

    /// Offending span (lexical and contextual flags)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_text: Option<String>,

    /// Full sentence (ML flags)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Confidence in [0.0, 1.0], rounded to 2 decimals; lexical flags omit it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// Entity surface forms that gated a contextual flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<String>>,

    /// Optional human-readable note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Flag {
    /// Create a lexical (pattern-match) flag
    pub fn lexical(kind: impl Into<String>, matched_text: impl Into<String>, severity: Severity) -> Self {
        Self {
            kind: kind.into(),
            severity,
            matched_text: Some(matched_text.into()),
            text: None,
            confidence: None,
            entities: None,
            explanation: None,
        }
    }

    /// Create an ML (classifier ensemble) flag
    pub fn ml(kind: impl Into<String>, sentence: impl Into<String>, severity: Severity, confidence: f32) -> Self {
        Self {
            kind: kind.into(),
            severity,
            matched_text: None,
            text: Some(sentence.into()),
            confidence: Some(round2(confidence)),
            entities: None,
            explanation: None,
        }
    }

    /// Create a contextual (entity/sentiment fusion) flag
    pub fn contextual(
        kind: impl Into<String>,
        matched_text: impl Into<String>,
        severity: Severity,
        entities: Vec<String>,
        confidence: f32,
    ) -> Self {
        Self {
            kind: kind.into(),
            severity,
            matched_text: Some(matched_text.into()),
            text: None,
            confidence: Some(round2(confidence)),
            entities: Some(entities),
            explanation: None,
        }
    }

    /// Attach an explanation note
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Attach a confidence (rounded to 2 decimals)
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(round2(confidence));
        self
    }

    /// True when the flag is high severity
    pub fn is_high(&self) -> bool {
        self.severity == Severity::High
    }

    /// Confidence with missing values treated as 0 (for sorting)
    pub fn confidence_or_zero(&self) -> f32 {
        self.confidence.unwrap_or(0.0)
    }

    /// The evidence text regardless of origin (for report rendering)
    pub fn evidence_text(&self) -> &str {
        self.text
            .as_deref()
            .or(self.matched_text.as_deref())
            .unwrap_or("")
    }
}

/// A remediation proposal tied to a lexically matched span
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// The matched span as it appeared in the (lowercased) text
    pub original: String,

    /// The span with the trigger phrase replaced
    pub suggested: String,

    /// Category the trigger phrase belongs to
    #[serde(rename = "type")]
    pub category: String,
}

impl Suggestion {
    /// Create a new suggestion
    pub fn new(
        original: impl Into<String>,
        suggested: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            original: original.into(),
            suggested: suggested.into(),
            category: category.into(),
        }
    }

    /// Deduplication key for report rendering
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.original, &self.category)
    }
}

/// Aggregate outcome of one detection call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiasResult {
    /// Always true for a completed analysis; failures are reported as errors
    pub success: bool,

    /// True iff the flag list is non-empty
    pub overall_bias_detected: bool,

    /// 0–100, one decimal; 100 = no bias detected
    pub bias_score: f64,

    /// Deduplicated category identifiers, in first-trigger order
    pub categories: Vec<String>,

    /// All evidence, in production order
    pub flags: Vec<Flag>,

    /// All remediation proposals, in production order
    pub suggestions: Vec<Suggestion>,

    /// Rendered human-readable report; never parsed back as data
    pub detailed_report: String,
}

impl BiasResult {
    /// Result for text with no detected evidence
    pub fn clean(report: String) -> Self {
        Self {
            success: true,
            overall_bias_detected: false,
            bias_score: 100.0,
            categories: Vec::new(),
            flags: Vec::new(),
            suggestions: Vec::new(),
            detailed_report: report,
        }
    }
}

/// Round a confidence to 2 decimals
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Round a score to 1 decimal
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
