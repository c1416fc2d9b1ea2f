//! Shared application state.

use std::path::PathBuf;

use lancet_core::NerEngine;

/// State shared by all request handlers.
///
/// The engine is loaded once at startup and only ever borrowed immutably,
/// so concurrent requests need no locking.
pub struct AppState {
    pub engine: NerEngine,
    pub examples_file: PathBuf,
}

impl AppState {
    pub fn new(engine: NerEngine, examples_file: PathBuf) -> Self {
        Self {
            engine,
            examples_file,
        }
    }
}
