// exam-export-service/src/state.rs

use crate::persistence::PostStore;
use crate::pipeline::ExportPipeline;
use std::sync::Arc;

/// Shared application state, injected into route handlers via axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostStore>,
    pub pipeline: ExportPipeline,
}
