//! # NER Engine
//!
//! Ties tokenizer, model, and tag vocabulary into the full per-note
//! pipeline: encode, classify, decode indices, anneal, reconstruct.
//! Everything is loaded once and read immutably afterwards, so one engine
//! is safely shared across concurrent requests.

use std::path::Path;

use candle_core::{D, DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::Config as BertConfig;
use serde::Serialize;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::info;

use crate::entities::{Entity, assemble_entities};
use crate::error::{LancetError, Result};
use crate::labels::anneal::anneal;
use crate::labels::tag::Tag;
use crate::labels::vocab::TagVocabulary;
use crate::ner::model::TokenClassifier;
use crate::tokens::TokenSpan;

/// Maximum encoded length; longer notes are truncated by the tokenizer.
pub const MAX_TOKENS: usize = 512;

/// Analysis of one clinical note: the reconstructed entities plus the
/// aligned token and tag sequences they were built from.
#[derive(Debug, Clone, Serialize)]
pub struct NoteAnalysis {
    pub entities: Vec<Entity>,
    pub tokens: Vec<String>,
    pub tags: Vec<Tag>,
}

/// Token-classification engine over clinical notes.
///
/// Immutable after [`NerEngine::load`]; inference borrows `&self` only.
pub struct NerEngine {
    tokenizer: Tokenizer,
    model: TokenClassifier,
    vocab: TagVocabulary,
    device: Device,
}

impl NerEngine {
    /// Load `tokenizer.json`, `config.json`, and `model.safetensors` from
    /// one model directory.
    ///
    /// The tag vocabulary comes from the config's `id2label` table when
    /// present, otherwise from the fixed clinical table.
    pub fn load(model_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = model_dir.as_ref();
        let device = Device::Cpu;

        let tokenizer_path = dir.join("tokenizer.json");
        if !tokenizer_path.exists() {
            return Err(LancetError::ModelLoadError(format!(
                "tokenizer not found at {}",
                tokenizer_path.display()
            )));
        }
        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| LancetError::ModelLoadError(e.to_string()))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| LancetError::ModelLoadError(e.to_string()))?;

        let config_str = std::fs::read_to_string(dir.join("config.json"))
            .map_err(|e| LancetError::ModelLoadError(format!("failed to read config: {e}")))?;
        let config: BertConfig = serde_json::from_str(&config_str)
            .map_err(|e| LancetError::ModelLoadError(format!("failed to parse config: {e}")))?;
        let vocab = vocabulary_from_config(&config_str)?;

        let weights_path = dir.join("model.safetensors");
        if !weights_path.exists() {
            return Err(LancetError::ModelLoadError(format!(
                "model weights not found at {}",
                weights_path.display()
            )));
        }
        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device) }
                .map_err(|e| LancetError::ModelLoadError(e.to_string()))?;
        let model = TokenClassifier::load(vb, &config, vocab.len())
            .map_err(|e| LancetError::ModelLoadError(e.to_string()))?;

        info!("loaded NER model from {} ({} tags)", dir.display(), vocab.len());

        Ok(Self {
            tokenizer,
            model,
            vocab,
            device,
        })
    }

    /// The vocabulary the engine decodes predictions through.
    pub fn vocab(&self) -> &TagVocabulary {
        &self.vocab
    }

    /// Run the full pipeline over one note.
    pub fn analyze(&self, text: &str) -> Result<NoteAnalysis> {
        if text.trim().is_empty() {
            return Err(LancetError::EmptyInput);
        }

        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| LancetError::TokenizerError(e.to_string()))?;
        if encoding.get_ids().is_empty() {
            return Err(LancetError::TokenizerError(format!(
                "no tokens produced for input {text:?}"
            )));
        }

        let indices = self
            .predict_indices(
                encoding.get_ids(),
                encoding.get_type_ids(),
                encoding.get_attention_mask(),
            )
            .map_err(|e| LancetError::InferenceError(e.to_string()))?;

        let tags = anneal(&self.vocab.decode_sequence(&indices));

        let tokens: Vec<TokenSpan> = encoding
            .get_tokens()
            .iter()
            .zip(encoding.get_offsets())
            .map(|(token, &(start, end))| TokenSpan::new(token.clone(), start, end))
            .collect();
        let entities = assemble_entities(&tokens, &tags);

        Ok(NoteAnalysis {
            entities,
            tokens: tokens.into_iter().map(|t| t.text).collect(),
            tags,
        })
    }

    /// One forward pass; argmax over the label dimension per position.
    fn predict_indices(
        &self,
        ids: &[u32],
        type_ids: &[u32],
        attention_mask: &[u32],
    ) -> candle_core::Result<Vec<u32>> {
        let input_ids = Tensor::new(ids, &self.device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(type_ids, &self.device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(attention_mask, &self.device)?.unsqueeze(0)?;

        let logits = self
            .model
            .forward(&input_ids, &token_type_ids, &attention_mask)?;
        logits.squeeze(0)?.argmax(D::Minus1)?.to_vec1::<u32>()
    }
}

/// Build the tag vocabulary from a config's `id2label` table, falling back
/// to the fixed clinical table when the config carries none.
fn vocabulary_from_config(config_json: &str) -> Result<TagVocabulary> {
    let value: serde_json::Value = serde_json::from_str(config_json)
        .map_err(|e| LancetError::ModelLoadError(format!("failed to parse config: {e}")))?;

    let Some(id2label) = value.get("id2label").and_then(|v| v.as_object()) else {
        return Ok(TagVocabulary::clinical());
    };

    let mut entries = Vec::with_capacity(id2label.len());
    for (index, label) in id2label {
        let index: usize = index.parse().map_err(|_| {
            LancetError::ModelLoadError(format!("non-numeric id2label index {index:?}"))
        })?;
        let label = label.as_str().ok_or_else(|| {
            LancetError::ModelLoadError(format!("id2label entry {index} is not a string"))
        })?;
        entries.push((index, label.to_string()));
    }
    entries.sort_by_key(|(index, _)| *index);

    for (expected, (index, _)) in entries.iter().enumerate() {
        if *index != expected {
            return Err(LancetError::ModelLoadError(format!(
                "id2label indices are not contiguous at {index}"
            )));
        }
    }

    TagVocabulary::from_labels(entries.into_iter().map(|(_, label)| label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::tag::EntityType;

    #[test]
    fn test_vocabulary_from_id2label() {
        let config = r#"{
            "hidden_size": 768,
            "id2label": {"0": "B-Age", "1": "I-Age", "2": "O"}
        }"#;
        let vocab = vocabulary_from_config(config).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.decode(0), Tag::Begin(EntityType::Age));
        assert_eq!(vocab.decode(2), Tag::Outside);
    }

    #[test]
    fn test_vocabulary_falls_back_to_clinical_table() {
        let vocab = vocabulary_from_config(r#"{"hidden_size": 768}"#).unwrap();
        assert_eq!(vocab, TagVocabulary::clinical());
    }

    #[test]
    fn test_vocabulary_rejects_gappy_id2label() {
        let config = r#"{"id2label": {"0": "B-Age", "2": "I-Age"}}"#;
        assert!(vocabulary_from_config(config).is_err());
    }

    #[test]
    fn test_vocabulary_rejects_non_numeric_index() {
        let config = r#"{"id2label": {"zero": "B-Age"}}"#;
        assert!(vocabulary_from_config(config).is_err());
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NerEngine>();
    }
}
