// exam-export-service/src/routes/export.rs

use crate::error::Result;
use crate::models::{ExportKind, GeneratedDocument};
use crate::state::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::Form;
use serde::Deserialize;

/// Checkbox form; `post_ids` repeats once per selected post.
#[derive(Debug, Default, Deserialize)]
pub struct ExportForm {
    #[serde(default)]
    pub post_ids: Vec<u64>,
}

pub async fn export_selected(
    State(state): State<AppState>,
    Form(form): Form<ExportForm>,
) -> Result<Response> {
    download(&state, ExportKind::Selected, &form.post_ids).await
}

pub async fn generate_exam(
    State(state): State<AppState>,
    Form(form): Form<ExportForm>,
) -> Result<Response> {
    download(&state, ExportKind::Exam, &form.post_ids).await
}

/// Admin bulk action over the checked posts.
pub async fn export_abnt(
    State(state): State<AppState>,
    Form(form): Form<ExportForm>,
) -> Result<Response> {
    download(&state, ExportKind::Abnt, &form.post_ids).await
}

pub async fn back_to_index() -> Redirect {
    Redirect::to("/")
}

async fn download(state: &AppState, kind: ExportKind, post_ids: &[u64]) -> Result<Response> {
    let document = state.pipeline.export(kind, post_ids).await?;
    Ok(attachment(document))
}

fn attachment(document: GeneratedDocument) -> Response {
    (
        [
            (header::CONTENT_TYPE, document.mime_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", document.filename),
            ),
        ],
        document.content,
    )
        .into_response()
}
