// exam-export-service/src/renderers/pdf.rs

use crate::error::{DocumentError, Result};
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Converts a complete HTML document into PDF bytes.
pub trait PdfRenderer: Send + Sync {
    fn render(&self, html: &str) -> Result<Vec<u8>>;
}

pub struct WeasyPrintRenderer {
    binary: String,
}

impl WeasyPrintRenderer {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl PdfRenderer for WeasyPrintRenderer {
    fn render(&self, html: &str) -> Result<Vec<u8>> {
        info!(size_kb = html.len() / 1024, "Rendering PDF document");

        // Create temporary files
        let mut html_file = tempfile::Builder::new().suffix(".html").tempfile()?;
        let pdf_file = NamedTempFile::new()?;

        html_file.write_all(html.as_bytes())?;
        html_file.flush()?;

        debug!("HTML written to: {:?}", html_file.path());

        let mut cmd = Command::new(&self.binary);
        cmd.arg("--encoding")
            .arg("utf-8")
            .arg(html_file.path())
            .arg(pdf_file.path());

        debug!("Running WeasyPrint: {:?}", cmd);

        let output = cmd
            .output()
            .map_err(|e| DocumentError::PdfError(format!("failed to run `{}`: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DocumentError::PdfError(stderr.trim().to_string()));
        }

        let pdf_bytes = std::fs::read(pdf_file.path())?;

        info!(size_kb = pdf_bytes.len() / 1024, "PDF generated successfully");

        Ok(pdf_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_reports_pdf_error() {
        let renderer = WeasyPrintRenderer::new("definitely-not-weasyprint-bin");
        let err = renderer.render("<html></html>").unwrap_err();
        assert!(matches!(err, DocumentError::PdfError(_)));
    }
}
