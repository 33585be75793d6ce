// exam-export-service/src/routes/mod.rs

mod export;
mod posts;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(posts::health))
        .route("/", get(posts::index))
        .route("/create/", post(posts::create_post))
        .route(
            "/export/",
            get(export::back_to_index).post(export::export_selected),
        )
        .route(
            "/generate-exam/",
            get(export::back_to_index).post(export::generate_exam),
        )
        .route("/admin/export-abnt/", post(export::export_abnt))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExamConfig;
    use crate::content::testing::FakeMath;
    use crate::content::{ContentTransformer, MediaPaths};
    use crate::layouts::DocumentAssembler;
    use crate::persistence::{MemoryStore, PostStore, Seed};
    use crate::pipeline::testing::CapturingPdf;
    use crate::pipeline::ExportPipeline;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let seed: Seed = serde_json::from_value(serde_json::json!({
            "areas": [
                { "id": 1, "name": "Química", "color": "#e74c3c" },
                { "id": 2, "name": "Biologia" }
            ],
            "difficulties": [{ "id": 1, "name": "Fácil" }],
            "posts": [
                { "id": 1, "title": "Mol", "content": "<p>##n = m/M##</p>", "area_id": 1,
                  "created_at": "2025-02-01T10:00:00Z" },
                { "id": 2, "title": "Mitose", "content": "<p>Fases</p>", "area_id": 2,
                  "created_at": "2025-02-02T10:00:00Z" }
            ]
        }))
        .unwrap();

        let store: Arc<dyn PostStore> = Arc::new(MemoryStore::new(seed));
        let transformer =
            ContentTransformer::new(MediaPaths::new("/media/", "/srv/media"), Arc::new(FakeMath));
        let assembler = DocumentAssembler::new(transformer, ExamConfig::default()).unwrap();
        let pipeline = ExportPipeline::new(
            store.clone(),
            Arc::new(assembler),
            Arc::new(CapturingPdf::default()),
        );

        router(AppState { store, pipeline })
    }

    fn form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_generate_exam_download() {
        let response = app()
            .oneshot(form("/generate-exam/", "post_ids=2&post_ids=1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"prova_gerada.pdf\""
        );

        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.starts_with("%PDF"));
        // Biologia sorts before Química
        let mitose = body.find("Fases").unwrap();
        let mol = body.find(r#"class="latex-inline""#).unwrap();
        assert!(mitose < mol);
    }

    #[tokio::test]
    async fn test_export_selected_and_abnt_filenames() {
        let response = app()
            .oneshot(form("/export/", "post_ids=1"))
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"questoes_selecionadas.pdf\""
        );

        let response = app()
            .oneshot(form("/admin/export-abnt/", "post_ids=1&post_ids=2"))
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"posts_ABNT.pdf\""
        );
    }

    #[tokio::test]
    async fn test_empty_selection_still_renders() {
        let response = app().oneshot(form("/generate-exam/", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.contains(r#"<div class="header">"#));
        assert!(!body.contains("QUESTÃO"));
    }

    #[tokio::test]
    async fn test_get_export_redirects_to_index() {
        for uri in ["/export/", "/generate-exam/"] {
            let response = app()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers()[header::LOCATION], "/");
        }
    }

    #[tokio::test]
    async fn test_index_filters() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/?search=MIT&area=")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        let posts = json["posts"].as_array().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["title"], "Mitose");
        assert_eq!(json["current_search"], "MIT");
        assert_eq!(json["areas"][0]["name"], "Biologia");
    }

    #[tokio::test]
    async fn test_index_rejects_bad_area() {
        let response = app()
            .oneshot(Request::builder().uri("/?area=abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_post() {
        let request = Request::builder()
            .method("POST")
            .uri("/create/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"title":"Estequiometria","content":"<p>\\[x\\]</p>","area_id":1}"#,
            ))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["area"]["name"], "Química");
    }

    #[tokio::test]
    async fn test_create_post_without_title_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/create/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"title":""}"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
