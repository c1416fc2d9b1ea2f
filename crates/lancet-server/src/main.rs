//! Lancet NER HTTP service.
//!
//! Loads the token-classification engine once at startup, then serves
//! prediction, label, health, and example-note endpoints over axum.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lancet_core::NerEngine;
use tracing::info;

mod error;
mod routes;
mod state;

use state::AppState;

/// Clinical NER inference service.
#[derive(Parser, Debug)]
#[command(name = "lancet-server", version, about)]
struct Cli {
    /// Directory holding tokenizer.json, config.json, and model.safetensors
    #[arg(long, env = "LANCET_MODEL_DIR", default_value = "models/clinical_ner")]
    model_dir: PathBuf,

    /// JSONL file of example notes served by /examples
    #[arg(
        long,
        env = "LANCET_EXAMPLES_FILE",
        default_value = "data/example_notes.jsonl"
    )]
    examples_file: PathBuf,

    /// Address to listen on
    #[arg(long, env = "LANCET_BIND_ADDR", default_value = "0.0.0.0:8000")]
    bind_addr: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let cli = Cli::parse();

    let engine = NerEngine::load(&cli.model_dir)
        .with_context(|| format!("loading NER model from {}", cli.model_dir.display()))?;
    let state = Arc::new(AppState::new(engine, cli.examples_file));

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&cli.bind_addr)
        .await
        .with_context(|| format!("binding {}", cli.bind_addr))?;
    info!("lancet server listening on http://{}", cli.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
