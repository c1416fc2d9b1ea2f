//! # Lancet Trainer
//!
//! Dataset-side tooling for the clinical NER model. Loads brat-annotated
//! corpora (`<id>.txt` / `<id>.ann` pairs) and converts them into
//! fixed-length BIO training samples, one JSON object per line. The
//! fine-tuning loop itself runs outside this workspace and consumes the
//! JSONL this crate produces.

pub mod corpus;
pub mod dataset;

pub use corpus::{AnnotatedDocument, list_document_ids, load_document};
pub use dataset::{TrainingSample, build_sample, load_tokenizer};
