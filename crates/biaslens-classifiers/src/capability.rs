//! Lazily-initialized shared capabilities
//!
//! ML capabilities are expensive to initialize and shared process-wide.
//! [`LazyCapability`] wraps an injected factory in a `tokio::sync::OnceCell`
//! so that at most one initialization runs even when concurrent first
//! requests race, while warm reads take the cell's lock-free fast path.
//! Capabilities are read-only after initialization.

use crate::classifier::TextClassifier;
use crate::parser::SyntacticAnalyzer;
use biaslens_core::{Error, Result};
use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Factory producing a capability instance on first use
pub type CapabilityFactory<T> =
    Box<dyn Fn() -> BoxFuture<'static, Result<Arc<T>>> + Send + Sync>;

/// A shared capability with at-most-once lazy initialization.
///
/// `get_or_init` is the single entry point: the first caller runs the
/// factory, concurrent callers wait on the same initialization, and every
/// later call clones the cached `Arc` without locking.
pub struct LazyCapability<T: ?Sized + Send + Sync + 'static> {
    name: String,
    cell: OnceCell<Arc<T>>,
    factory: Option<CapabilityFactory<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> LazyCapability<T> {
    /// Create a capability that initializes on first use
    pub fn new(name: impl Into<String>, factory: CapabilityFactory<T>) -> Self {
        Self {
            name: name.into(),
            cell: OnceCell::new(),
            factory: Some(factory),
        }
    }

    /// Create a capability from an already-initialized instance
    pub fn ready(name: impl Into<String>, instance: Arc<T>) -> Self {
        Self {
            name: name.into(),
            cell: OnceCell::new_with(Some(instance)),
            factory: None,
        }
    }

    /// Get the capability, initializing it if this is the first use
    pub async fn get_or_init(&self) -> Result<Arc<T>> {
        if let Some(instance) = self.cell.get() {
            return Ok(Arc::clone(instance));
        }

        let instance = self
            .cell
            .get_or_try_init(|| {
                info!(capability = %self.name, "initializing capability");
                match &self.factory {
                    Some(factory) => factory(),
                    None => Box::pin(async {
                        Err(Error::internal("capability has no factory and no instance"))
                    }),
                }
            })
            .await?;

        debug!(capability = %self.name, "capability ready");
        Ok(Arc::clone(instance))
    }

    /// Get the capability without initializing; `None` when cold
    pub fn get(&self) -> Option<Arc<T>> {
        self.cell.get().map(Arc::clone)
    }

    /// The capability name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Convenience alias for classifier capabilities
pub type ClassifierCapability = LazyCapability<dyn TextClassifier>;

/// The optional syntactic-parse capability.
///
/// `Absent` is a first-class state, not an error: the contextual analyzer
/// no-ops on it and the rest of the pipeline proceeds unaffected.
pub enum ParseCapability {
    /// A parser is available (possibly not yet initialized)
    Present(LazyCapability<dyn SyntacticAnalyzer>),

    /// No parser in this deployment
    Absent,
}

impl ParseCapability {
    /// Wrap a lazily-initialized parser
    pub fn present(capability: LazyCapability<dyn SyntacticAnalyzer>) -> Self {
        Self::Present(capability)
    }

    /// The capability is not available
    pub fn absent() -> Self {
        Self::Absent
    }

    /// Whether a parser is configured at all
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Get the analyzer if available.
    ///
    /// Initialization failure of an optional capability degrades to `None`
    /// with a warning rather than failing the detection call.
    pub async fn analyzer(&self) -> Option<Arc<dyn SyntacticAnalyzer>> {
        match self {
            Self::Present(capability) => match capability.get_or_init().await {
                Ok(analyzer) => Some(analyzer),
                Err(e) => {
                    warn!(error = %e, "syntactic analyzer unavailable, skipping contextual analysis");
                    None
                }
            },
            Self::Absent => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LabelScore;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingClassifier;

    #[async_trait::async_trait]
    impl TextClassifier for CountingClassifier {
        async fn classify(&self, _text: &str) -> Result<Vec<LabelScore>> {
            Ok(vec![LabelScore::new("ok", 1.0)])
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_initializes_at_most_once() {
        static INIT_COUNT: AtomicU32 = AtomicU32::new(0);

        let capability: ClassifierCapability = LazyCapability::new(
            "counting",
            Box::new(|| {
                Box::pin(async {
                    INIT_COUNT.fetch_add(1, Ordering::SeqCst);
                    Ok(Arc::new(CountingClassifier) as Arc<dyn TextClassifier>)
                })
            }),
        );
        let capability = Arc::new(capability);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let capability = Arc::clone(&capability);
            handles.push(tokio::spawn(async move {
                capability.get_or_init().await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(INIT_COUNT.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ready_capability_skips_factory() {
        let capability: ClassifierCapability =
            LazyCapability::ready("ready", Arc::new(CountingClassifier));
        assert!(capability.get().is_some());
        assert!(capability.get_or_init().await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_init_propagates() {
        let capability: ClassifierCapability = LazyCapability::new(
            "broken",
            Box::new(|| Box::pin(async { Err(Error::classifier("model missing")) })),
        );

        assert!(capability.get_or_init().await.is_err());
    }

    #[tokio::test]
    async fn test_absent_parse_capability_yields_none() {
        let capability = ParseCapability::absent();
        assert!(!capability.is_present());
        assert!(capability.analyzer().await.is_none());
    }
}
