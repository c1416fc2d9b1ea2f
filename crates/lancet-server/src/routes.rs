//! Route handlers for the NER service.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use lancet_core::{EntityType, NoteAnalysis, TagVocabulary};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ExamplesQuery {
    #[serde(default = "default_examples_limit")]
    pub limit: usize,
}

fn default_examples_limit() -> usize {
    10
}

/// Build the service router with permissive CORS.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/predict", post(predict_handler))
        .route("/labels", get(labels_handler))
        .route("/examples", get(examples_handler))
        .layer(cors)
        .with_state(state)
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "lancet-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health_handler() -> Json<serde_json::Value> {
    // The engine loads before the listener binds, so a responding process
    // always has its model.
    Json(json!({
        "status": "healthy",
        "model_loaded": true,
    }))
}

/// Run the NER pipeline over one note.
///
/// Empty text is rejected here, before the core is involved. The forward
/// pass is CPU-bound, so it runs on the blocking pool instead of stalling
/// the runtime.
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> ServerResult<Json<NoteAnalysis>> {
    if request.text.trim().is_empty() {
        return Err(ServerError::BadRequest("text must not be empty".into()));
    }

    let analysis = tokio::task::spawn_blocking(move || state.engine.analyze(&request.text))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;

    Ok(Json(analysis))
}

async fn labels_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({ "labels": sorted_type_labels(state.engine.vocab()) }))
}

async fn examples_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExamplesQuery>,
) -> ServerResult<Json<serde_json::Value>> {
    let path = &state.examples_file;
    if !path.exists() {
        return Err(ServerError::NotFound(format!(
            "examples file {}",
            path.display()
        )));
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ServerError::Internal(format!("reading {}: {e}", path.display())))?;

    let mut examples = Vec::new();
    for line in content.lines().take(query.limit) {
        if line.trim().is_empty() {
            continue;
        }
        examples.push(serde_json::from_str::<serde_json::Value>(line)?);
    }

    Ok(Json(json!({
        "examples": examples,
        "count": examples.len(),
    })))
}

/// Distinct entity-type labels, sorted for stable client display. The
/// case-twin labels stay separate entries.
fn sorted_type_labels(vocab: &TagVocabulary) -> Vec<&'static str> {
    let mut labels: Vec<&'static str> =
        vocab.entity_types().iter().map(EntityType::label).collect();
    labels.sort_unstable();
    labels
}
