// exam-export-service/src/config.rs

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub server: ServerConfig,
    pub media: MediaConfig,
    pub math: MathConfig,
    pub pdf: PdfConfig,
    #[serde(default)]
    pub store: StoreConfig,
    pub exam: ExamConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

/// Where uploaded media is published and where it lives on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    pub url: String,
    pub root: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MathConfig {
    pub latex_bin: String,
    pub dvipng_bin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    pub weasyprint_bin: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    pub seed_path: Option<String>,
}

/// Running header/footer text of the exam layout.
#[derive(Debug, Clone, Deserialize)]
pub struct ExamConfig {
    pub header_title: String,
    pub edition_label: String,
    pub footer_label: String,
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            header_title: "Exame de Acesso ao Ensino Superior do Tocantins".to_string(),
            edition_label: "EXATO 2025 – 2ª Edição".to_string(),
            footer_label: "Prova de Conhecimentos | TARDE".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let exam = ExamConfig::default();

        let config = ConfigLoader::builder()
            // Start with default values
            .set_default("service.name", "exam-export-service")?
            .set_default("service.log_level", "info")?
            .set_default("server.bind_addr", "0.0.0.0:8000")?
            .set_default("media.url", "/media/")?
            .set_default("media.root", "./media")?
            .set_default("math.latex_bin", "latex")?
            .set_default("math.dvipng_bin", "dvipng")?
            .set_default("pdf.weasyprint_bin", "weasyprint")?
            .set_default("exam.header_title", exam.header_title)?
            .set_default("exam.edition_label", exam.edition_label)?
            .set_default("exam.footer_label", exam.footer_label)?
            // Load from config file if it exists
            .add_source(File::with_name("config").required(false))
            // Override with environment variables (e.g., SERVICE__MEDIA__ROOT)
            .add_source(Environment::with_prefix("SERVICE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
