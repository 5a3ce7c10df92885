//! BiasLens Core
//!
//! Core types and error handling shared across BiasLens components.
//!
//! This crate provides:
//! - Evidence types: flags, suggestions, and the aggregate bias result
//! - Error types and result handling
//!
//! The detection pipeline itself lives in `biaslens-engine`; classifier
//! capabilities live in `biaslens-classifiers`.

pub mod error;
pub mod text;
pub mod types;

pub use error::{Error, Result};
pub use text::split_sentences;
pub use types::{round1, round2, BiasResult, Flag, Severity, Suggestion};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::text::split_sentences;
    pub use crate::types::{BiasResult, Flag, Severity, Suggestion};
}
