// exam-export-service/src/error.rs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::TemplateError),

    #[error("Rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Math typesetting failed: {0}")]
    MathError(String),

    #[error("PDF rendering failed: {0}")]
    PdfError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

impl DocumentError {
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            error_type: match self {
                DocumentError::TemplateError(_) => "template_error",
                DocumentError::RenderError(_) => "render_error",
                DocumentError::IoError(_) => "io_error",
                DocumentError::SerializationError(_) => "serialization_error",
                DocumentError::MathError(_) => "math_error",
                DocumentError::PdfError(_) => "pdf_error",
                DocumentError::InvalidData(_) => "invalid_data",
                DocumentError::GenerationFailed(_) => "generation_failed",
            }
            .to_string(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            DocumentError::InvalidData(_) | DocumentError::SerializationError(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
}

impl IntoResponse for DocumentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(self.to_error_response())).into_response()
    }
}
