//! # BIO Tags for Clinical Entity Recognition
//!
//! Defines the tag scheme for token classification over clinical notes.
//! Uses the BIO (Begin-Inside-Outside) tagging scheme with a fixed, closed
//! set of entity categories matching the fine-tuned model head.

use std::fmt;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Entity categories the model can label.
///
/// The set is closed: it mirrors the classification head of the shipped
/// checkpoint and must not be extended or reordered independently of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Age,
    BiologicalStructure,
    Date,
    DetailedDescription,
    DiseaseDisorder,
    Dosage,
    Duration,
    Medication,
    Sex,
    SignSymptom,
    TherapeuticProcedure,
    /// Lowercase spelling of the therapeutic-procedure label. The training
    /// vocabulary really contains both spellings; they stay distinct types
    /// so model output indices keep their alignment.
    TherapeuticProcedureLower,
}

impl EntityType {
    /// Total number of distinct categories.
    pub const NUM_TYPES: usize = 12;

    /// All categories in vocabulary order.
    pub fn all() -> &'static [EntityType] {
        &[
            EntityType::Age,
            EntityType::BiologicalStructure,
            EntityType::Date,
            EntityType::DetailedDescription,
            EntityType::DiseaseDisorder,
            EntityType::Dosage,
            EntityType::Duration,
            EntityType::Medication,
            EntityType::Sex,
            EntityType::SignSymptom,
            EntityType::TherapeuticProcedure,
            EntityType::TherapeuticProcedureLower,
        ]
    }

    /// The label string as it appears in the tag vocabulary and on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            EntityType::Age => "Age",
            EntityType::BiologicalStructure => "Biological_structure",
            EntityType::Date => "Date",
            EntityType::DetailedDescription => "Detailed_description",
            EntityType::DiseaseDisorder => "Disease_disorder",
            EntityType::Dosage => "Dosage",
            EntityType::Duration => "Duration",
            EntityType::Medication => "Medication",
            EntityType::Sex => "Sex",
            EntityType::SignSymptom => "Sign_symptom",
            EntityType::TherapeuticProcedure => "Therapeutic_procedure",
            EntityType::TherapeuticProcedureLower => "therapeutic_procedure",
        }
    }

    /// Parse a label string. Case-sensitive: the two therapeutic-procedure
    /// spellings resolve to different types.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Age" => Some(EntityType::Age),
            "Biological_structure" => Some(EntityType::BiologicalStructure),
            "Date" => Some(EntityType::Date),
            "Detailed_description" => Some(EntityType::DetailedDescription),
            "Disease_disorder" => Some(EntityType::DiseaseDisorder),
            "Dosage" => Some(EntityType::Dosage),
            "Duration" => Some(EntityType::Duration),
            "Medication" => Some(EntityType::Medication),
            "Sex" => Some(EntityType::Sex),
            "Sign_symptom" => Some(EntityType::SignSymptom),
            "Therapeutic_procedure" => Some(EntityType::TherapeuticProcedure),
            "therapeutic_procedure" => Some(EntityType::TherapeuticProcedureLower),
            _ => None,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for EntityType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A BIO tag: outside any entity, beginning one, or inside one.
///
/// Constructed from label strings or vocabulary indices at the decoding
/// boundary; downstream logic pattern-matches on the variants instead of
/// re-parsing `"B-"`/`"I-"` prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Token belongs to no entity.
    Outside,
    /// Token starts an entity of the given category.
    Begin(EntityType),
    /// Token continues an entity of the given category.
    Inside(EntityType),
}

impl Tag {
    /// Parse a label string of the form `O`, `B-<Type>`, or `I-<Type>`.
    pub fn from_label(label: &str) -> Option<Self> {
        if label == "O" {
            return Some(Tag::Outside);
        }
        if let Some(rest) = label.strip_prefix("B-") {
            return EntityType::from_label(rest).map(Tag::Begin);
        }
        if let Some(rest) = label.strip_prefix("I-") {
            return EntityType::from_label(rest).map(Tag::Inside);
        }
        None
    }

    /// The entity category this tag refers to, if any.
    pub fn entity_type(&self) -> Option<EntityType> {
        match self {
            Tag::Outside => None,
            Tag::Begin(t) | Tag::Inside(t) => Some(*t),
        }
    }

    /// Check if this is a `B-` tag.
    pub fn is_begin(&self) -> bool {
        matches!(self, Tag::Begin(_))
    }

    /// Check if this is an `I-` tag.
    pub fn is_inside(&self) -> bool {
        matches!(self, Tag::Inside(_))
    }

    /// Check if this is the `O` tag.
    pub fn is_outside(&self) -> bool {
        matches!(self, Tag::Outside)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Outside => write!(f, "O"),
            Tag::Begin(t) => write!(f, "B-{}", t.label()),
            Tag::Inside(t) => write!(f, "I-{}", t.label()),
        }
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Tag::from_label(&label)
            .ok_or_else(|| D::Error::custom(format!("unknown BIO tag label: {label:?}")))
    }
}
