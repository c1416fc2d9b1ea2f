use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lancet_core::{CharSpan, EntityType, Tag, TokenSpan, anneal, assemble_entities, tags_for_spans};

/// A 512-position tag sequence shaped like real model output: entity runs,
/// mismatched starts, short O gaps inside runs, and long O stretches.
fn synthetic_tags() -> Vec<Tag> {
    let mut tags = Vec::with_capacity(512);
    for chunk in 0..64 {
        let ty = match chunk % 4 {
            0 => EntityType::SignSymptom,
            1 => EntityType::Medication,
            2 => EntityType::DiseaseDisorder,
            _ => EntityType::Dosage,
        };
        tags.push(Tag::Begin(match chunk % 4 {
            0 => EntityType::Age,
            _ => ty,
        }));
        tags.push(Tag::Inside(ty));
        tags.push(Tag::Outside);
        tags.push(Tag::Inside(ty));
        tags.extend([Tag::Outside; 4]);
    }
    tags
}

fn synthetic_tokens(len: usize) -> Vec<TokenSpan> {
    (0..len)
        .map(|i| {
            if i % 7 == 3 {
                TokenSpan::new("##itis", i * 6, i * 6 + 5)
            } else {
                TokenSpan::new("token", i * 6, i * 6 + 5)
            }
        })
        .collect()
}

fn bench_postprocess(c: &mut Criterion) {
    let tags = synthetic_tags();
    let tokens = synthetic_tokens(tags.len());

    c.bench_function("anneal_512", |b| {
        b.iter(|| anneal(black_box(&tags)));
    });

    let annealed = anneal(&tags);
    c.bench_function("assemble_entities_512", |b| {
        b.iter(|| assemble_entities(black_box(&tokens), black_box(&annealed)));
    });

    c.bench_function("anneal_then_assemble_512", |b| {
        b.iter(|| {
            let repaired = anneal(black_box(&tags));
            assemble_entities(black_box(&tokens), &repaired)
        });
    });
}

fn bench_ground_truth(c: &mut Criterion) {
    let tokens = synthetic_tokens(512);
    let spans: Vec<_> = (0..40)
        .map(|i| CharSpan::new(EntityType::SignSymptom, i * 72, i * 72 + 11))
        .collect();

    c.bench_function("tags_for_spans_512x40", |b| {
        b.iter(|| tags_for_spans(black_box(&tokens), black_box(&spans)));
    });
}

criterion_group!(benches, bench_postprocess, bench_ground_truth);
criterion_main!(benches);
