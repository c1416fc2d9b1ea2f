//! # Lancet Core
//!
//! The heart of the Lancet clinical NER engine. Provides BIO tag
//! post-processing (label annealing), entity reconstruction from sub-word
//! tokens, ground-truth tagging for training data, and candle-based
//! token-classification inference.
//!
//! ## Quick Start
//!
//! The post-processing pipeline works without a model:
//!
//! ```rust
//! use lancet_core::{EntityType, Tag, TokenSpan, anneal, assemble_entities};
//!
//! let tokens = vec![
//!     TokenSpan::new("card", 0, 4),
//!     TokenSpan::new("##iac", 4, 7),
//!     TokenSpan::new("arrest", 8, 14),
//! ];
//! let raw = vec![
//!     Tag::Begin(EntityType::DiseaseDisorder),
//!     Tag::Inside(EntityType::DiseaseDisorder),
//!     Tag::Inside(EntityType::DiseaseDisorder),
//! ];
//!
//! let entities = assemble_entities(&tokens, &anneal(&raw));
//! assert_eq!(entities[0].text, "cardiac arrest");
//! ```
//!
//! Full inference goes through [`NerEngine`], loaded once from a model
//! directory and shared read-only across requests.

pub mod annotate;
pub mod entities;
pub mod error;
pub mod labels;
pub mod ner;
pub mod tokens;

// Re-export primary API
pub use annotate::{CharSpan, parse_annotations, tags_for_spans};
pub use entities::{Entity, assemble_entities};
pub use error::{LancetError, Result};
pub use labels::{EntityType, Tag, TagVocabulary, anneal};
pub use ner::{MAX_TOKENS, NerEngine, NoteAnalysis, TokenClassifier};
pub use tokens::{CONTINUATION_MARKER, TokenSpan};
