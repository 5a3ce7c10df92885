//! BiasLens detection engine
//!
//! The engine fuses three evidence streams over the same input text:
//!
//! - a deterministic lexical scan over the category registry
//! - a hate/toxicity classifier ensemble over split sentences
//! - an optional contextual pass (entities, sentiment, gender stereotypes)
//!
//! and aggregates them into a bounded 0-100 bias score with a rendered
//! report. [`BiasDetector`] is the single entry point; everything else in
//! this crate is a pipeline stage it orchestrates.

pub mod category;
pub mod config;
pub mod contextual;
pub mod detector;
pub mod ensemble;
pub mod lexical;
pub mod report;
pub mod score;

pub use category::{Category, CategoryRegistry};
pub use config::{DetectionConfig, PenaltyWeights};
pub use contextual::{ContextualAnalyzer, ContextualOutput};
pub use detector::{BiasDetector, BiasDetectorBuilder};
pub use ensemble::{ClassifierEnsemble, EnsembleOutput};
pub use lexical::{LexicalMatcher, LexicalOutput};
pub use score::{aggregate_score, EvidenceTally};

/// Convenience re-exports for embedding the engine
pub mod prelude {
    pub use crate::config::DetectionConfig;
    pub use crate::detector::{BiasDetector, BiasDetectorBuilder};
    pub use biaslens_core::{BiasResult, Error, Flag, Result, Severity, Suggestion};
}
