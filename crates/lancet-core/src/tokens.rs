//! Sub-word tokens with their character offsets in the source text.
//!
//! The tokenizer supplies half-open `(start, end)` character offsets per
//! token. Special control tokens (sequence start/end, padding) carry a
//! degenerate offset with `start == end`, which marks them as not part of
//! the original text; they never participate in tagging or reconstruction.

/// Prefix marking a WordPiece continuation of the previous token.
pub const CONTINUATION_MARKER: &str = "##";

/// One sub-word token with its source-text offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan {
    /// The token surface form, continuation marker included.
    pub text: String,
    /// Start character offset in the original text (inclusive).
    pub start: usize,
    /// End character offset in the original text (exclusive).
    pub end: usize,
}

impl TokenSpan {
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// A special control token: the offset pair is degenerate, so the token
    /// maps to no slice of the original text.
    pub fn is_special(&self) -> bool {
        self.start == self.end
    }

    /// A continuation piece that glues onto the previous token without a
    /// space.
    pub fn is_continuation(&self) -> bool {
        self.text.starts_with(CONTINUATION_MARKER)
    }

    /// The surface form with any leading continuation marker stripped.
    pub fn piece(&self) -> &str {
        self.text
            .strip_prefix(CONTINUATION_MARKER)
            .unwrap_or(&self.text)
    }
}
