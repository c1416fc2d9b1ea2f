//! Build a BIO-tagged JSONL dataset from a brat-annotated corpus.
//!
//! Walks a directory of `<id>.txt` / `<id>.ann` pairs, encodes each note
//! with the production tokenizer and writes one training sample per line.
//! A malformed annotation anywhere aborts the run: a dataset built from a
//! partially parsed corpus would silently under-tag the affected notes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lancet_trainer::{build_sample, list_document_ids, load_document, load_tokenizer};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "prepare-dataset", version, about = "Convert a brat corpus into BIO training samples")]
struct Cli {
    /// Directory holding <id>.txt / <id>.ann pairs
    #[arg(long, env = "LANCET_CORPUS_DIR")]
    corpus_dir: PathBuf,

    /// tokenizer.json of the model that will be fine-tuned
    #[arg(long, env = "LANCET_TOKENIZER")]
    tokenizer: PathBuf,

    /// Output JSONL path
    #[arg(long, default_value = "data/train.jsonl")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let tokenizer = load_tokenizer(&cli.tokenizer)?;
    let ids = list_document_ids(&cli.corpus_dir)?;
    info!(
        "found {} annotated documents in {}",
        ids.len(),
        cli.corpus_dir.display()
    );

    let out_file = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    let mut writer = BufWriter::new(out_file);

    let mut written = 0usize;
    for id in &ids {
        let document =
            load_document(&cli.corpus_dir, id).with_context(|| format!("document {id}"))?;
        let sample = build_sample(&tokenizer, &document)?;
        writeln!(writer, "{}", serde_json::to_string(&sample)?)?;
        written += 1;
        debug!("tagged document {id} ({} spans)", document.spans.len());
    }
    writer.flush()?;

    info!("wrote {} samples to {}", written, cli.output.display());
    Ok(())
}
