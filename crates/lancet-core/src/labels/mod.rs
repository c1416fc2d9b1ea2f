//! BIO tag schema, the index-aligned tag vocabulary, and label annealing.

pub mod anneal;
pub mod tag;
pub mod vocab;

pub use anneal::anneal;
pub use tag::{EntityType, Tag};
pub use vocab::TagVocabulary;
