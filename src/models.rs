// exam-export-service/src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COLOR: &str = "#3498db";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeArea {
    pub id: u64,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub id: u64,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// An exam question. Areas and difficulties are carried resolved so the
/// export path never goes back to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub area: Option<KnowledgeArea>,
    pub difficulty: Option<Difficulty>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn body(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    pub fn area_name(&self) -> Option<&str> {
        self.area.as_ref().map(|area| area.name.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub area_id: Option<u64>,
    pub difficulty_id: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFilter {
    pub search: Option<String>,
    pub area: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    Simple,
    Exam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    /// Admin bulk action.
    Abnt,
    Selected,
    Exam,
}

impl ExportKind {
    pub fn layout(&self) -> LayoutKind {
        match self {
            ExportKind::Abnt | ExportKind::Selected => LayoutKind::Simple,
            ExportKind::Exam => LayoutKind::Exam,
        }
    }

    pub fn filename(&self) -> &'static str {
        match self {
            ExportKind::Abnt => "posts_ABNT.pdf",
            ExportKind::Selected => "questoes_selecionadas.pdf",
            ExportKind::Exam => "prova_gerada.pdf",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub filename: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl GeneratedDocument {
    pub fn pdf(kind: ExportKind, content: Vec<u8>) -> Self {
        Self {
            filename: kind.filename().to_string(),
            mime_type: "application/pdf".to_string(),
            content,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.content.len()
    }
}
