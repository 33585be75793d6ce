// exam-export-service/src/persistence.rs

use crate::error::{DocumentError, Result};
use crate::models::{Difficulty, KnowledgeArea, NewPost, Post, PostFilter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::info;

const MAX_TITLE_LEN: usize = 200;

// ============================================================
// Seed format
// ============================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub areas: Vec<KnowledgeArea>,
    #[serde(default)]
    pub difficulties: Vec<Difficulty>,
    #[serde(default)]
    pub posts: Vec<PostRecord>,
}

/// A post as stored: tags are referenced by id.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub area_id: Option<u64>,
    #[serde(default)]
    pub difficulty_id: Option<u64>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

// ============================================================
// Store
// ============================================================

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Newest first, narrowed by title search and area.
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>>;

    /// Posts with the given ids in id order. Unknown ids are skipped.
    async fn get_many(&self, ids: &[u64]) -> Result<Vec<Post>>;

    async fn areas(&self) -> Result<Vec<KnowledgeArea>>;

    async fn difficulties(&self) -> Result<Vec<Difficulty>>;

    async fn create(&self, input: NewPost) -> Result<Post>;
}

#[derive(Debug, Default)]
struct Tables {
    areas: Vec<KnowledgeArea>,
    difficulties: Vec<Difficulty>,
    posts: Vec<PostRecord>,
    next_id: u64,
}

impl Tables {
    /// A tag id that no longer resolves reads as no tag.
    fn resolve(&self, record: &PostRecord) -> Post {
        let area = record
            .area_id
            .and_then(|id| self.areas.iter().find(|a| a.id == id).cloned());
        let difficulty = record
            .difficulty_id
            .and_then(|id| self.difficulties.iter().find(|d| d.id == id).cloned());

        Post {
            id: record.id,
            title: record.title.clone(),
            content: record.content.clone(),
            area,
            difficulty,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new(seed: Seed) -> Self {
        let next_id = seed.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;

        Self {
            tables: RwLock::new(Tables {
                areas: seed.areas,
                difficulties: seed.difficulties,
                posts: seed.posts,
                next_id,
            }),
        }
    }

    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let seed: Seed = serde_json::from_str(&raw)?;

        info!(
            path = %path.display(),
            areas = seed.areas.len(),
            posts = seed.posts.len(),
            "Loaded post seed"
        );

        Ok(Self::new(seed))
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>> {
        let tables = self.tables.read().await;
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut records: Vec<&PostRecord> = tables
            .posts
            .iter()
            .filter(|p| match &search {
                Some(needle) => p.title.to_lowercase().contains(needle),
                None => true,
            })
            .filter(|p| match filter.area {
                Some(area_id) => p.area_id == Some(area_id),
                None => true,
            })
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(records.into_iter().map(|r| tables.resolve(r)).collect())
    }

    async fn get_many(&self, ids: &[u64]) -> Result<Vec<Post>> {
        let tables = self.tables.read().await;

        let mut records: Vec<&PostRecord> =
            tables.posts.iter().filter(|p| ids.contains(&p.id)).collect();
        records.sort_by_key(|r| r.id);

        Ok(records.into_iter().map(|r| tables.resolve(r)).collect())
    }

    async fn areas(&self) -> Result<Vec<KnowledgeArea>> {
        let tables = self.tables.read().await;
        let mut areas = tables.areas.clone();
        areas.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(areas)
    }

    async fn difficulties(&self) -> Result<Vec<Difficulty>> {
        let tables = self.tables.read().await;
        let mut difficulties = tables.difficulties.clone();
        difficulties.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(difficulties)
    }

    async fn create(&self, input: NewPost) -> Result<Post> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(DocumentError::InvalidData("title is required".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(DocumentError::InvalidData(format!(
                "title must be at most {} characters",
                MAX_TITLE_LEN
            )));
        }

        let mut tables = self.tables.write().await;

        if let Some(area_id) = input.area_id {
            if !tables.areas.iter().any(|a| a.id == area_id) {
                return Err(DocumentError::InvalidData(format!(
                    "unknown knowledge area {}",
                    area_id
                )));
            }
        }
        if let Some(difficulty_id) = input.difficulty_id {
            if !tables.difficulties.iter().any(|d| d.id == difficulty_id) {
                return Err(DocumentError::InvalidData(format!(
                    "unknown difficulty {}",
                    difficulty_id
                )));
            }
        }

        let now = Utc::now();
        let record = PostRecord {
            id: tables.next_id,
            title: title.to_string(),
            content: Some(input.content),
            area_id: input.area_id,
            difficulty_id: input.difficulty_id,
            created_at: now,
            updated_at: now,
        };
        tables.next_id += 1;

        let post = tables.resolve(&record);
        tables.posts.push(record);

        info!(post_id = post.id, "Created post");

        Ok(post)
    }
}
