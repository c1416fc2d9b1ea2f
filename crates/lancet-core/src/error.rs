use thiserror::Error;

/// Errors that can occur during Lancet core operations.
#[derive(Debug, Error)]
pub enum LancetError {
    /// The input text is empty or contains only whitespace.
    #[error("input is empty or whitespace-only")]
    EmptyInput,

    /// A ground-truth annotation line did not parse into type/start/end.
    /// This is a hard failure for the document; skipping the line would
    /// silently corrupt supervision.
    #[error("malformed annotation line: {line:?}")]
    MalformedAnnotation {
        /// The offending line, verbatim.
        line: String,
    },

    /// A tag label string is not part of the BIO scheme.
    #[error("unknown tag label: {0:?}")]
    UnknownLabel(String),

    /// A tag vocabulary violates its structural invariants.
    #[error("invalid tag vocabulary: {0}")]
    InvalidVocabulary(String),

    /// The model weights, config, or tokenizer could not be loaded.
    #[error("failed to load model: {0}")]
    ModelLoadError(String),

    /// The tokenizer failed to encode the input.
    #[error("tokenizer error: {0}")]
    TokenizerError(String),

    /// The model inference failed.
    #[error("ML inference error: {0}")]
    InferenceError(String),
}

/// Result type alias for Lancet operations.
pub type Result<T> = std::result::Result<T, LancetError>;
