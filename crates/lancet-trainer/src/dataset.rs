//! BIO dataset construction.
//!
//! Each document is encoded with the production tokenizer (character
//! offsets on, truncation and padding pinned to the model's sequence
//! length) and its annotated spans are aligned into per-token BIO tags.
//! Padding slots carry degenerate offsets, so they fall out as `O` the
//! same way `[CLS]` and `[SEP]` do.

use std::path::Path;

use anyhow::{Result, anyhow};
use lancet_core::{CharSpan, MAX_TOKENS, TokenSpan, tags_for_spans};
use serde::Serialize;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

use crate::corpus::AnnotatedDocument;

/// One serialized training sample, in the column layout the fine-tuning
/// script expects.
#[derive(Debug, Serialize)]
pub struct TrainingSample {
    pub tokens: Vec<String>,
    pub ner_tags: Vec<String>,
}

/// Load a tokenizer and pin truncation plus fixed-length padding to the
/// model's sequence length, so every sample comes out `MAX_TOKENS` wide.
pub fn load_tokenizer(path: &Path) -> Result<Tokenizer> {
    let mut tokenizer = Tokenizer::from_file(path)
        .map_err(|e| anyhow!("loading tokenizer {}: {e}", path.display()))?;
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: MAX_TOKENS,
            ..Default::default()
        }))
        .map_err(|e| anyhow!("configuring truncation: {e}"))?;
    tokenizer.with_padding(Some(PaddingParams {
        strategy: PaddingStrategy::Fixed(MAX_TOKENS),
        ..Default::default()
    }));
    Ok(tokenizer)
}

/// Encode one document and align its spans into BIO supervision.
pub fn build_sample(tokenizer: &Tokenizer, document: &AnnotatedDocument) -> Result<TrainingSample> {
    let encoding = tokenizer
        .encode(document.text.as_str(), true)
        .map_err(|e| anyhow!("encoding document {}: {e}", document.id))?;

    let token_spans: Vec<TokenSpan> = encoding
        .get_tokens()
        .iter()
        .zip(encoding.get_offsets())
        .map(|(token, &(start, end))| TokenSpan::new(token.clone(), start, end))
        .collect();

    Ok(sample_from_token_spans(token_spans, &document.spans))
}

fn sample_from_token_spans(token_spans: Vec<TokenSpan>, spans: &[CharSpan]) -> TrainingSample {
    let tags = tags_for_spans(&token_spans, spans);
    TrainingSample {
        tokens: token_spans.into_iter().map(|t| t.text).collect(),
        ner_tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}
