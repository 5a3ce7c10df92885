//! BiasLens Classifiers
//!
//! Opaque ML capabilities for the bias detection pipeline:
//! - The [`TextClassifier`] trait: `classify(text) -> [(label, score)]`
//! - Lexicon-based default classifiers for hate, toxicity, and sentiment
//! - The [`SyntacticAnalyzer`] trait and a heuristic default parser
//! - [`LazyCapability`]: at-most-once lazy initialization for shared,
//!   expensive-to-load capabilities
//!
//! Model-backed classifiers are injected by the enclosing service; the
//! defaults here are deterministic and dependency-light.

pub mod capability;
pub mod classifier;
pub mod hate;
pub mod parser;
pub mod sentiment;
pub mod toxicity;

pub use capability::{CapabilityFactory, ClassifierCapability, LazyCapability, ParseCapability};
pub use classifier::{score_for, LabelScore, TextClassifier};
pub use hate::HateLexiconClassifier;
pub use parser::{
    DepToken, Entity, EntityLabel, HeuristicAnalyzer, ParsedSentence, SyntacticAnalyzer,
    COMPARATIVES, GENDER_SUBJECTS, ROLE_NOUNS,
};
pub use sentiment::SentimentLexiconClassifier;
pub use toxicity::ToxicityLexiconClassifier;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::capability::{ClassifierCapability, LazyCapability, ParseCapability};
    pub use crate::classifier::{LabelScore, TextClassifier};
    pub use crate::hate::HateLexiconClassifier;
    pub use crate::parser::{HeuristicAnalyzer, SyntacticAnalyzer};
    pub use crate::sentiment::SentimentLexiconClassifier;
    pub use crate::toxicity::ToxicityLexiconClassifier;
}
