//! Corpus loading for brat-annotated clinical notes.
//!
//! A corpus directory holds `<id>.txt` / `<id>.ann` pairs in the MACCROBAT
//! layout: the text file is the raw note, the ann file the standoff entity
//! annotations. Annotation parsing itself lives in `lancet-core` so the
//! trainer and any future evaluation tooling agree on the format.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lancet_core::{CharSpan, parse_annotations};

/// One annotated document: raw note text plus its parsed entity spans.
#[derive(Debug, Clone)]
pub struct AnnotatedDocument {
    pub id: String,
    pub text: String,
    pub spans: Vec<CharSpan>,
}

/// List document ids in a corpus directory.
///
/// A document counts only when both halves of the pair exist; a stray
/// `.txt` without its `.ann` is skipped. Ids come back sorted so runs are
/// reproducible regardless of directory iteration order.
pub fn list_document_ids(corpus_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(corpus_dir)
        .with_context(|| format!("reading corpus directory {}", corpus_dir.display()))?;

    let mut ids = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().is_none_or(|ext| ext != "txt") {
            continue;
        }
        if !path.with_extension("ann").exists() {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            ids.push(stem.to_string());
        }
    }
    ids.sort_unstable();
    Ok(ids)
}

/// Load one `<id>.txt` / `<id>.ann` pair.
///
/// A malformed annotation line fails the whole document; silently dropping
/// it would feed the model a note whose entities are partially untagged.
pub fn load_document(corpus_dir: &Path, id: &str) -> Result<AnnotatedDocument> {
    let txt_path = corpus_dir.join(format!("{id}.txt"));
    let ann_path = corpus_dir.join(format!("{id}.ann"));

    let text = fs::read_to_string(&txt_path)
        .with_context(|| format!("reading {}", txt_path.display()))?;
    let ann = fs::read_to_string(&ann_path)
        .with_context(|| format!("reading {}", ann_path.display()))?;
    let spans = parse_annotations(&ann)
        .with_context(|| format!("parsing annotations for document {id}"))?;

    Ok(AnnotatedDocument {
        id: id.to_string(),
        text,
        spans,
    })
}
