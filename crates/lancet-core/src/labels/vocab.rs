//! # Tag Vocabulary
//!
//! The ordered index-to-tag table that resolves model output indices.
//! Order is load-bearing: position in the table is the classifier head
//! index, so the table must never be sorted, deduplicated, or reordered.

use tracing::warn;

use crate::error::{LancetError, Result};
use crate::labels::tag::{EntityType, Tag};

/// Fixed, ordered mapping of classifier output index to [`Tag`].
///
/// Out-of-range indices decode to `O` rather than failing: a prediction the
/// table cannot name carries no entity information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagVocabulary {
    tags: Vec<Tag>,
}

impl TagVocabulary {
    /// The vocabulary of the shipped clinical checkpoint: all `B-` tags in
    /// category order, then all `I-` tags in the same order, then `O`.
    ///
    /// Indices 10/11 and 22/23 are the case-twin therapeutic-procedure pair;
    /// see [`EntityType::TherapeuticProcedureLower`].
    pub fn clinical() -> Self {
        let mut tags = Vec::with_capacity(2 * EntityType::NUM_TYPES + 1);
        tags.extend(EntityType::all().iter().map(|&ty| Tag::Begin(ty)));
        tags.extend(EntityType::all().iter().map(|&ty| Tag::Inside(ty)));
        tags.push(Tag::Outside);
        Self { tags }
    }

    /// Build a vocabulary from label strings in index order, e.g. from a
    /// model config's `id2label` table.
    ///
    /// # Errors
    ///
    /// Returns [`LancetError::UnknownLabel`] for a label outside the BIO
    /// scheme and [`LancetError::InvalidVocabulary`] when the table does not
    /// contain exactly one `O` or leaves a category without its `B-`/`I-`
    /// counterpart.
    pub fn from_labels<I>(labels: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut tags = Vec::new();
        for label in labels {
            let label = label.as_ref();
            let tag = Tag::from_label(label)
                .ok_or_else(|| LancetError::UnknownLabel(label.to_string()))?;
            tags.push(tag);
        }

        let vocab = Self { tags };
        vocab.validate()?;
        vocab.flag_case_twins();
        Ok(vocab)
    }

    fn validate(&self) -> Result<()> {
        let outside_count = self.tags.iter().filter(|t| t.is_outside()).count();
        if outside_count != 1 {
            return Err(LancetError::InvalidVocabulary(format!(
                "expected exactly one O tag, found {outside_count}"
            )));
        }

        for tag in &self.tags {
            if let Some(ty) = tag.entity_type() {
                if !self.tags.contains(&Tag::Begin(ty)) {
                    return Err(LancetError::InvalidVocabulary(format!(
                        "category {ty} has no B- tag"
                    )));
                }
                if !self.tags.contains(&Tag::Inside(ty)) {
                    return Err(LancetError::InvalidVocabulary(format!(
                        "category {ty} has no I- tag"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Log categories whose labels differ only by case. Both entries are
    /// real model classes and must stay distinct; this is a data-quality
    /// flag, not a merge.
    fn flag_case_twins(&self) {
        let types = self.entity_types();
        for (i, a) in types.iter().enumerate() {
            for b in &types[i + 1..] {
                if a.label().eq_ignore_ascii_case(b.label()) {
                    warn!(
                        "tag vocabulary contains case-twin categories {:?} and {:?}; keeping both for index alignment",
                        a.label(),
                        b.label()
                    );
                }
            }
        }
    }

    /// Resolve one model output index. Out-of-range falls back to `O`.
    pub fn decode(&self, index: usize) -> Tag {
        self.tags.get(index).copied().unwrap_or(Tag::Outside)
    }

    /// Resolve a whole prediction sequence.
    pub fn decode_sequence(&self, indices: &[u32]) -> Vec<Tag> {
        indices.iter().map(|&i| self.decode(i as usize)).collect()
    }

    /// Number of entries (the classifier head width).
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The full table in index order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Distinct entity categories, in first-appearance order.
    pub fn entity_types(&self) -> Vec<EntityType> {
        let mut types = Vec::new();
        for tag in &self.tags {
            if let Some(ty) = tag.entity_type() {
                if !types.contains(&ty) {
                    types.push(ty);
                }
            }
        }
        types
    }
}

impl Default for TagVocabulary {
    fn default() -> Self {
        Self::clinical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clinical_table_layout() {
        let vocab = TagVocabulary::clinical();
        assert_eq!(vocab.len(), 25);

        assert_eq!(vocab.decode(0), Tag::Begin(EntityType::Age));
        assert_eq!(vocab.decode(4), Tag::Begin(EntityType::DiseaseDisorder));
        assert_eq!(vocab.decode(10), Tag::Begin(EntityType::TherapeuticProcedure));
        assert_eq!(
            vocab.decode(11),
            Tag::Begin(EntityType::TherapeuticProcedureLower)
        );
        assert_eq!(vocab.decode(12), Tag::Inside(EntityType::Age));
        assert_eq!(vocab.decode(21), Tag::Inside(EntityType::SignSymptom));
        assert_eq!(
            vocab.decode(23),
            Tag::Inside(EntityType::TherapeuticProcedureLower)
        );
        assert_eq!(vocab.decode(24), Tag::Outside);
    }

    #[test]
    fn test_out_of_range_decodes_to_outside() {
        let vocab = TagVocabulary::clinical();
        assert_eq!(vocab.decode(25), Tag::Outside);
        assert_eq!(vocab.decode(usize::MAX), Tag::Outside);

        let decoded = vocab.decode_sequence(&[0, 24, 9999]);
        assert_eq!(
            decoded,
            vec![Tag::Begin(EntityType::Age), Tag::Outside, Tag::Outside]
        );
    }

    #[test]
    fn test_from_labels_preserves_order() {
        let vocab = TagVocabulary::from_labels(["O", "B-Age", "I-Age"]).unwrap();
        assert_eq!(vocab.decode(0), Tag::Outside);
        assert_eq!(vocab.decode(1), Tag::Begin(EntityType::Age));
        assert_eq!(vocab.decode(2), Tag::Inside(EntityType::Age));
    }

    #[test]
    fn test_from_labels_rejects_unknown() {
        let err = TagVocabulary::from_labels(["O", "B-Widget"]).unwrap_err();
        assert!(matches!(err, LancetError::UnknownLabel(_)));
    }

    #[test]
    fn test_from_labels_requires_paired_categories() {
        let err = TagVocabulary::from_labels(["O", "B-Age"]).unwrap_err();
        assert!(matches!(err, LancetError::InvalidVocabulary(_)));

        let err = TagVocabulary::from_labels(["O", "I-Dosage"]).unwrap_err();
        assert!(matches!(err, LancetError::InvalidVocabulary(_)));
    }

    #[test]
    fn test_from_labels_requires_single_outside() {
        let err = TagVocabulary::from_labels(["B-Age", "I-Age"]).unwrap_err();
        assert!(matches!(err, LancetError::InvalidVocabulary(_)));

        let err = TagVocabulary::from_labels(["O", "O", "B-Age", "I-Age"]).unwrap_err();
        assert!(matches!(err, LancetError::InvalidVocabulary(_)));
    }

    #[test]
    fn test_entity_types_keeps_case_twins_distinct() {
        let vocab = TagVocabulary::clinical();
        let types = vocab.entity_types();
        assert_eq!(types.len(), EntityType::NUM_TYPES);
        assert!(types.contains(&EntityType::TherapeuticProcedure));
        assert!(types.contains(&EntityType::TherapeuticProcedureLower));
    }

    #[test]
    fn test_round_trip_through_labels() {
        let clinical = TagVocabulary::clinical();
        let labels: Vec<String> = clinical.tags().iter().map(Tag::to_string).collect();
        let rebuilt = TagVocabulary::from_labels(&labels).unwrap();
        assert_eq!(rebuilt, clinical);
    }
}
