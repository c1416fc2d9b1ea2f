//! # Entity Reconstruction
//!
//! Merges an annealed (token, tag) sequence back into surface-level entity
//! spans. Sub-word pieces carrying the continuation marker glue onto the
//! running text without a separator; whole-word tokens join with a single
//! space.

use serde::Serialize;

use crate::labels::tag::{EntityType, Tag};
use crate::tokens::TokenSpan;

/// One reconstructed entity span.
///
/// Lives for the duration of one request; nothing here persists across
/// calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// Reconstructed surface text.
    pub text: String,
    /// Category taken from the `B-` tag that opened the entity.
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Positions of the constituent tokens in the tokenized sequence.
    #[serde(skip)]
    pub token_indices: Vec<usize>,
}

impl Entity {
    fn open(token_index: usize, token: &TokenSpan, entity_type: EntityType) -> Self {
        Self {
            text: token.piece().to_string(),
            entity_type,
            token_indices: vec![token_index],
        }
    }

    fn push_token(&mut self, token_index: usize, token: &TokenSpan) {
        if token.is_continuation() {
            self.text.push_str(token.piece());
        } else {
            self.text.push(' ');
            self.text.push_str(&token.text);
        }
        self.token_indices.push(token_index);
    }
}

/// Merge tokens and tags into the entity list, left to right.
///
/// Special tokens (degenerate offsets) are skipped entirely. A `B-` tag
/// closes any open entity and opens a new one. An `I-` tag extends the open
/// entity; the type match is not re-validated, annealing already took care
/// of inconsistent starts. An `I-` with no open entity is dangling output
/// and is ignored. `O` closes. Alignment is assumed validated by the
/// caller: positions beyond the shorter of the two slices are not visited.
pub fn assemble_entities(tokens: &[TokenSpan], tags: &[Tag]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut open: Option<Entity> = None;

    for (index, (token, tag)) in tokens.iter().zip(tags).enumerate() {
        if token.is_special() {
            continue;
        }

        match tag {
            Tag::Begin(entity_type) => {
                if let Some(finished) = open.take() {
                    entities.push(finished);
                }
                open = Some(Entity::open(index, token, *entity_type));
            }
            Tag::Inside(_) => {
                if let Some(entity) = open.as_mut() {
                    entity.push_token(index, token);
                }
            }
            Tag::Outside => {
                if let Some(finished) = open.take() {
                    entities.push(finished);
                }
            }
        }
    }

    if let Some(finished) = open.take() {
        entities.push(finished);
    }

    entities
}
