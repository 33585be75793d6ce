// exam-export-service/src/pipeline.rs

use crate::error::{DocumentError, Result};
use crate::layouts::DocumentAssembler;
use crate::models::{ExportKind, GeneratedDocument};
use crate::persistence::PostStore;
use crate::renderers::PdfRenderer;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument};
use uuid::Uuid;

/// Orchestrates: fetch posts → assemble HTML → render PDF.
#[derive(Clone)]
pub struct ExportPipeline {
    store: Arc<dyn PostStore>,
    assembler: Arc<DocumentAssembler>,
    pdf: Arc<dyn PdfRenderer>,
}

impl ExportPipeline {
    pub fn new(
        store: Arc<dyn PostStore>,
        assembler: Arc<DocumentAssembler>,
        pdf: Arc<dyn PdfRenderer>,
    ) -> Self {
        Self {
            store,
            assembler,
            pdf,
        }
    }

    #[instrument(skip(self, kind, post_ids), fields(
        request_id = %Uuid::new_v4(),
        kind = ?kind,
        requested = post_ids.len()
    ))]
    pub async fn export(&self, kind: ExportKind, post_ids: &[u64]) -> Result<GeneratedDocument> {
        let start = Instant::now();
        let posts = self.store.get_many(post_ids).await?;

        info!(posts = posts.len(), "Exporting posts");

        let assembler = self.assembler.clone();
        let pdf = self.pdf.clone();

        // Math typesetting and PDF rendering both shell out; keep them off the runtime.
        let content = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
            let html = assembler.assemble(&posts, kind.layout())?;
            pdf.render(&html)
        })
        .await
        .map_err(|e| DocumentError::GenerationFailed(format!("export task failed: {}", e)))?;

        let content = match content {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "Export failed");
                return Err(e);
            }
        };

        let document = GeneratedDocument::pdf(kind, content);

        info!(
            filename = %document.filename,
            size_kb = document.size_bytes() / 1024,
            duration_ms = start.elapsed().as_millis() as u64,
            "Export completed"
        );

        Ok(document)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::CapturingPdf;
    use super::*;
    use crate::config::ExamConfig;
    use crate::content::testing::FakeMath;
    use crate::content::{ContentTransformer, MediaPaths};
    use crate::persistence::{MemoryStore, Seed};

    struct FailingPdf;

    impl PdfRenderer for FailingPdf {
        fn render(&self, _html: &str) -> Result<Vec<u8>> {
            Err(DocumentError::PdfError("weasyprint crashed".to_string()))
        }
    }

    fn seed() -> Seed {
        serde_json::from_value(serde_json::json!({
            "areas": [{ "id": 1, "name": "Física" }],
            "posts": [
                { "id": 1, "title": "Cinemática", "content": "<p>##v = d/t##</p>", "area_id": 1 },
                { "id": 2, "title": "Óptica", "content": "<p>\\[n_1 \\sin\\theta_1\\]</p>" }
            ]
        }))
        .unwrap()
    }

    fn pipeline(pdf: Arc<dyn PdfRenderer>) -> ExportPipeline {
        let transformer =
            ContentTransformer::new(MediaPaths::new("/media/", "/srv/media"), Arc::new(FakeMath));
        let assembler = DocumentAssembler::new(transformer, ExamConfig::default()).unwrap();
        ExportPipeline::new(Arc::new(MemoryStore::new(seed())), Arc::new(assembler), pdf)
    }

    #[tokio::test]
    async fn test_exam_export() {
        let pdf = Arc::new(CapturingPdf::default());
        let document = pipeline(pdf.clone())
            .export(ExportKind::Exam, &[1, 2])
            .await
            .unwrap();

        assert_eq!(document.filename, "prova_gerada.pdf");
        assert_eq!(document.mime_type, "application/pdf");
        assert!(document.content.starts_with(b"%PDF"));

        let html = pdf.last_html.lock().unwrap().clone().unwrap();
        assert!(html.contains("QUESTÃO 01"));
        assert!(html.contains("QUESTÃO 02"));
        assert!(html.contains(r#"<div class="area-header">Física</div>"#));
        assert!(html.contains(r#"<div class="area-header">Sem Área</div>"#));
    }

    #[tokio::test]
    async fn test_selected_export_with_no_ids_is_still_a_document() {
        let pdf = Arc::new(CapturingPdf::default());
        let document = pipeline(pdf.clone())
            .export(ExportKind::Selected, &[])
            .await
            .unwrap();

        assert_eq!(document.filename, "questoes_selecionadas.pdf");
        let html = pdf.last_html.lock().unwrap().clone().unwrap();
        assert!(html.contains("<body>"));
        assert!(!html.contains(r#"class="post-wrapper""#));
    }

    #[tokio::test]
    async fn test_pdf_failure_propagates() {
        let err = pipeline(Arc::new(FailingPdf))
            .export(ExportKind::Abnt, &[1])
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::PdfError(_)));
    }
}
