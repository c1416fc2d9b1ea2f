//! # Ground-Truth Annotation
//!
//! Training-time inverse of entity reconstruction: turns character-level
//! span annotations into per-token BIO tags, using the same token offsets
//! the tokenizer reports at inference time.
//!
//! Annotations arrive in brat standoff format. Only text-bound lines carry
//! spans:
//!
//! ```text
//! T15\tDisease_disorder 474 481;490 503\tcardiac malformations
//! ```
//!
//! Semicolon-delimited offset groups are one discontinuous mention; they
//! expand into several [`CharSpan`] records sharing the first group's type.

use tracing::debug;

use crate::error::{LancetError, Result};
use crate::labels::tag::{EntityType, Tag};
use crate::tokens::TokenSpan;

/// One annotated character range in the raw document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSpan {
    pub entity_type: EntityType,
    /// Start character offset (inclusive).
    pub start: usize,
    /// End character offset (exclusive).
    pub end: usize,
}

impl CharSpan {
    pub fn new(entity_type: EntityType, start: usize, end: usize) -> Self {
        Self {
            entity_type,
            start,
            end,
        }
    }
}

/// Parse the text-bound annotations of one brat `.ann` document.
///
/// Non-`T` lines (attributes, relations, notes) carry no spans and are
/// ignored. Discontinuous mentions expand into one [`CharSpan`] per offset
/// group. Spans whose category is outside the model schema are dropped with
/// a debug log: they are `O` supervision by definition.
///
/// # Errors
///
/// Returns [`LancetError::MalformedAnnotation`] for a `T` line that does
/// not parse into type and integer offsets. This fails the whole document;
/// skipping the line would silently corrupt supervision.
pub fn parse_annotations(ann: &str) -> Result<Vec<CharSpan>> {
    let mut spans = Vec::new();
    for line in ann.lines() {
        let line = line.trim_end();
        if !line.starts_with('T') {
            continue;
        }
        spans.extend(parse_text_bound_line(line)?);
    }
    Ok(spans)
}

fn parse_text_bound_line(line: &str) -> Result<Vec<CharSpan>> {
    let malformed = || LancetError::MalformedAnnotation {
        line: line.to_string(),
    };

    // <id> TAB <type and offsets> TAB <surface text>
    let mut fields = line.splitn(3, '\t');
    let _id = fields.next();
    let type_and_offsets = fields.next().ok_or_else(malformed)?;
    let _surface = fields.next().ok_or_else(malformed)?;

    let mut groups = type_and_offsets.split(';');

    // First group carries the type: "<Type> <start> <end>".
    let head = groups.next().ok_or_else(malformed)?;
    let mut head_parts = head.split_whitespace();
    let type_label = head_parts.next().ok_or_else(malformed)?.to_string();
    let mut offsets = vec![parse_offset_pair(&mut head_parts).ok_or_else(malformed)?];

    // Remaining groups are bare "<start> <end>" fragments of the same
    // mention.
    for group in groups {
        let mut parts = group.split_whitespace();
        offsets.push(parse_offset_pair(&mut parts).ok_or_else(malformed)?);
    }

    let Some(entity_type) = EntityType::from_label(&type_label) else {
        debug!(
            "annotation type {type_label:?} is outside the model schema; span contributes O supervision"
        );
        return Ok(Vec::new());
    };

    Ok(offsets
        .into_iter()
        .map(|(start, end)| CharSpan::new(entity_type, start, end))
        .collect())
}

fn parse_offset_pair<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Option<(usize, usize)> {
    let start = parts.next()?.parse::<usize>().ok()?;
    let end = parts.next()?.parse::<usize>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((start, end))
}

/// Produce the supervision tag sequence for one document.
///
/// Every position starts as `O`. A token whose start offset equals a span's
/// start gets `B-`; a token starting strictly inside the span and ending at
/// or before its end gets `I-`. Later spans overwrite earlier ones with no
/// conflict detection (last-applied-wins). Special tokens with degenerate
/// offsets never receive a non-`O` tag, padding included.
///
/// Each fragment of a discontinuous mention opens with its own `B-`, so a
/// continuation fragment is tagged as a fresh entity start. Known modeling
/// limitation, kept as-is.
pub fn tags_for_spans(tokens: &[TokenSpan], spans: &[CharSpan]) -> Vec<Tag> {
    let mut tags = vec![Tag::Outside; tokens.len()];

    for span in spans {
        for (i, token) in tokens.iter().enumerate() {
            if token.is_special() {
                continue;
            }
            if token.start == span.start {
                tags[i] = Tag::Begin(span.entity_type);
            } else if token.start > span.start && token.end <= span.end {
                tags[i] = Tag::Inside(span.entity_type);
            }
        }
    }

    tags
}
