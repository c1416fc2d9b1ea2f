//! Candle-based token-classification inference.

pub mod engine;
pub mod model;

pub use engine::{MAX_TOKENS, NerEngine, NoteAnalysis};
pub use model::TokenClassifier;
