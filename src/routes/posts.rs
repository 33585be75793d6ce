// exam-export-service/src/routes/posts.rs

use crate::error::{DocumentError, Result};
use crate::models::{Difficulty, KnowledgeArea, NewPost, Post, PostFilter};
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Raw listing query; empty values mean "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub area: String,
}

impl IndexQuery {
    fn filter(&self) -> Result<PostFilter> {
        let search = Some(self.search.trim().to_string()).filter(|s| !s.is_empty());
        let area = match self.area.trim() {
            "" => None,
            raw => Some(raw.parse::<u64>().map_err(|_| {
                DocumentError::InvalidData(format!("invalid area id: {}", raw))
            })?),
        };

        Ok(PostFilter { search, area })
    }
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub posts: Vec<Post>,
    pub areas: Vec<KnowledgeArea>,
    pub difficulties: Vec<Difficulty>,
    pub current_search: String,
    pub current_area: String,
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Json<IndexResponse>> {
    let filter = query.filter()?;

    Ok(Json(IndexResponse {
        posts: state.store.list(&filter).await?,
        areas: state.store.areas().await?,
        difficulties: state.store.difficulties().await?,
        current_search: query.search,
        current_area: query.area,
    }))
}

pub async fn create_post(
    State(state): State<AppState>,
    Json(input): Json<NewPost>,
) -> Result<(StatusCode, Json<Post>)> {
    let post = state.store.create(input).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
