//! # Label Annealing
//!
//! Token-classification output is produced independently per position, so
//! the raw tag sequence is not guaranteed to be a well-structured BIO
//! sequence. Annealing applies two deterministic repair passes over a copy
//! of the sequence: a type-coercion pass for `B-`/`I-` mismatches at entity
//! starts and a gap-bridging pass that closes short `O` holes inside an
//! entity run. It is a total function: any input built from vocabulary tags
//! yields a same-length output built from the same tags.

use crate::labels::tag::Tag;

/// Repair a raw tag sequence into a structurally consistent BIO sequence.
///
/// The input is never mutated; both passes run on a copy, pass 1 before
/// pass 2. Idempotent: annealing an already-annealed sequence is a no-op.
pub fn anneal(tags: &[Tag]) -> Vec<Tag> {
    let mut repaired = tags.to_vec();
    coerce_begin_types(&mut repaired);
    bridge_outside_gaps(&mut repaired);
    repaired
}

/// Pass 1: when a `B-` of type X is immediately followed by an `I-` of type
/// Y != X, rewrite the start to `B-Y`. The continuation tag is the more
/// reliable of the two in practice; adopting its type avoids splitting one
/// entity into a spurious start plus a dangling continuation.
///
/// Single left-to-right pass; a rewritten position is not re-examined
/// against its predecessor.
fn coerce_begin_types(tags: &mut [Tag]) {
    for i in 0..tags.len().saturating_sub(1) {
        if let (Tag::Begin(current), Tag::Inside(following)) = (tags[i], tags[i + 1]) {
            if current != following {
                tags[i] = Tag::Begin(following);
            }
        }
    }
}

/// Pass 2: from a `B-`/`I-` of type X at position i, look across the run of
/// `O` tags that follows. If the first non-`O` tag at position j is `I-X`,
/// the hole is a prediction gap inside one entity: rewrite positions
/// (i, j) exclusive to `I-X`. Any other tag at j means the entity really
/// ended at i and the gap stays `O`.
///
/// Scanning resumes at j, so each start position gets exactly one bridging
/// attempt and earlier positions are never revisited.
fn bridge_outside_gaps(tags: &mut [Tag]) {
    let mut i = 0;
    while i + 2 < tags.len() {
        let Some(start_type) = tags[i].entity_type() else {
            i += 1;
            continue;
        };

        let mut j = i + 1;
        while j < tags.len() && tags[j] == Tag::Outside {
            j += 1;
        }

        if j < tags.len() && tags[j] == Tag::Inside(start_type) {
            for gap in tags.iter_mut().take(j).skip(i + 1) {
                *gap = Tag::Inside(start_type);
            }
        }

        i = j;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::tag::EntityType::{Date, DiseaseDisorder, Dosage, Medication, SignSymptom};
    use crate::labels::tag::Tag::{Begin, Inside, Outside};

    #[test]
    fn test_pass1_adopts_following_type() {
        // B-Medication I-Dosage O: the start adopts the continuation's type.
        let raw = vec![Begin(Medication), Inside(Dosage), Outside];
        let repaired = anneal(&raw);
        assert_eq!(repaired, vec![Begin(Dosage), Inside(Dosage), Outside]);
        // The input is untouched.
        assert_eq!(raw[0], Begin(Medication));
    }

    #[test]
    fn test_pass1_is_single_pass() {
        // The rewrite at position 0 is not re-examined; position 1 keeps its
        // own pairing with position 2.
        let raw = vec![Begin(Medication), Inside(Dosage), Inside(SignSymptom)];
        let repaired = anneal(&raw);
        assert_eq!(
            repaired,
            vec![Begin(Dosage), Inside(Dosage), Inside(SignSymptom)]
        );
    }

    #[test]
    fn test_pass2_bridges_same_type_gap() {
        let raw = vec![Begin(DiseaseDisorder), Outside, Inside(DiseaseDisorder)];
        let repaired = anneal(&raw);
        assert_eq!(
            repaired,
            vec![
                Begin(DiseaseDisorder),
                Inside(DiseaseDisorder),
                Inside(DiseaseDisorder)
            ]
        );
    }

    #[test]
    fn test_pass2_bridges_multi_position_gap() {
        let raw = vec![
            Begin(SignSymptom),
            Outside,
            Outside,
            Inside(SignSymptom),
            Outside,
        ];
        let repaired = anneal(&raw);
        assert_eq!(
            repaired,
            vec![
                Begin(SignSymptom),
                Inside(SignSymptom),
                Inside(SignSymptom),
                Inside(SignSymptom),
                Outside,
            ]
        );
    }

    #[test]
    fn test_pass2_leaves_cross_type_gap() {
        let raw = vec![Begin(Medication), Outside, Inside(Date), Outside];
        let repaired = anneal(&raw);
        assert_eq!(repaired, raw);
    }

    #[test]
    fn test_pass2_does_not_bridge_into_begin() {
        // A B- after the gap is a genuine new entity, not a continuation.
        let raw = vec![
            Begin(Medication),
            Outside,
            Begin(Medication),
            Inside(Medication),
        ];
        let repaired = anneal(&raw);
        assert_eq!(repaired, raw);
    }

    #[test]
    fn test_pass2_single_attempt_per_start() {
        // After bridging up to j, scanning resumes at j; the I- run then
        // carries its own lookahead from there.
        let raw = vec![
            Inside(Date),
            Outside,
            Inside(Date),
            Outside,
            Inside(Date),
        ];
        let repaired = anneal(&raw);
        assert_eq!(repaired, vec![Inside(Date); 5]);
    }

    #[test]
    fn test_trailing_outside_run_is_preserved() {
        let raw = vec![Begin(Medication), Outside, Outside, Outside];
        let repaired = anneal(&raw);
        assert_eq!(repaired, raw);
    }

    #[test]
    fn test_length_is_preserved() {
        let raw = vec![
            Outside,
            Begin(Medication),
            Inside(Dosage),
            Outside,
            Inside(Dosage),
            Outside,
        ];
        assert_eq!(anneal(&raw).len(), raw.len());
        assert_eq!(anneal(&[]).len(), 0);
        assert_eq!(anneal(&[Outside]).len(), 1);
    }

    #[test]
    fn test_no_new_types_introduced() {
        let raw = vec![
            Begin(Medication),
            Inside(Dosage),
            Outside,
            Inside(Dosage),
        ];
        let repaired = anneal(&raw);
        let observed = |tags: &[Tag]| {
            let mut types: Vec<_> = tags.iter().filter_map(Tag::entity_type).collect();
            types.dedup();
            types
        };
        for ty in observed(&repaired) {
            assert!(observed(&raw).contains(&ty));
        }
    }

    #[test]
    fn test_idempotent() {
        let sequences = vec![
            vec![Begin(Medication), Inside(Dosage), Outside],
            vec![Begin(DiseaseDisorder), Outside, Inside(DiseaseDisorder)],
            vec![Inside(Date), Outside, Inside(Date), Outside, Inside(Date)],
            vec![Begin(Medication), Inside(Dosage), Inside(SignSymptom)],
            vec![Outside; 8],
            vec![Inside(SignSymptom), Outside, Begin(SignSymptom), Outside],
        ];
        for raw in sequences {
            let once = anneal(&raw);
            let twice = anneal(&once);
            assert_eq!(once, twice, "anneal not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_short_sequences_pass_through() {
        assert_eq!(anneal(&[]), Vec::<Tag>::new());
        assert_eq!(anneal(&[Inside(Date)]), vec![Inside(Date)]);
        // Two positions: pass 1 still applies, pass 2 has no room to bridge.
        assert_eq!(
            anneal(&[Begin(Medication), Inside(Dosage)]),
            vec![Begin(Dosage), Inside(Dosage)]
        );
    }
}
