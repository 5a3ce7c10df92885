//! Error types for BiasLens

/// Result type alias using BiasLens's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for BiasLens operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid caller input (empty text, malformed request)
    #[error("{0}")]
    Input(String),

    /// Classifier execution errors (mandatory capabilities)
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Configuration errors (bad thresholds, malformed category patterns)
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Message suitable for the `{success: false, error: ...}` envelope.
    ///
    /// Input errors surface their raw message (the API contract promises
    /// exactly "No text provided" for empty input); everything else keeps
    /// its categorized Display form.
    pub fn response_message(&self) -> String {
        match self {
            Self::Input(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_message_is_raw() {
        let err = Error::input("No text provided");
        assert_eq!(err.response_message(), "No text provided");
        assert_eq!(err.to_string(), "No text provided");
    }

    #[test]
    fn test_classifier_error_is_categorized() {
        let err = Error::classifier("model unavailable");
        assert_eq!(err.to_string(), "classifier error: model unavailable");
    }
}
