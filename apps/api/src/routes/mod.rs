pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::export::handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No route for this path".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // CV export API
        .route("/api/v1/cv/export", post(handlers::handle_export))
        .route("/api/v1/cv/preview", post(handlers::handle_preview))
        .fallback(not_found)
        .with_state(state)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::layout::{Locale, PaginationMode};

    fn app() -> Router {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            locale: Locale::Fr,
            pagination: PaginationMode::Measured,
            footer_text: None,
        };
        build_router(AppState::new(config))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sample_body() -> Value {
        json!({
            "resume": {
                "titre": "Développeuse Backend",
                "ville": "Dakar",
                "pays": "Sénégal",
                "resume": "Ingénieure passionnée par les systèmes fiables.",
                "competences": ["Rust", "PostgreSQL"],
                "experiences": [{
                    "poste": "Ingénieure logiciel",
                    "entreprise": "Noken",
                    "dateDebut": "2022-01-01",
                    "enCours": true,
                    "description": "Conception de l'export PDF."
                }],
                "formations": [{
                    "diplome": "Master Informatique",
                    "etablissement": "UCAD",
                    "dateDebut": "2018-09",
                    "dateFin": "2020-06"
                }]
            },
            "identity": { "firstName": "Awa", "lastName": "Ndiaye", "email": "awa@example.com" }
        })
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["locale"], "fr");
        assert_eq!(body["pagination"], "measured");
    }

    #[tokio::test]
    async fn test_export_returns_pdf_attachment() {
        let before = chrono::Utc::now().date_naive();
        let response = app()
            .oneshot(post_json("/api/v1/cv/export", sample_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");

        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"CV_AwaNdiaye_"));
        assert!(disposition.ends_with(".pdf\""));
        // Filename date is the UTC calendar date of the request.
        let utc_dates = [before, chrono::Utc::now().date_naive()]
            .map(|d| format!("CV_AwaNdiaye_{}.pdf", d.format("%Y-%m-%d")));
        assert!(utc_dates.iter().any(|name| disposition.contains(name.as_str())));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[tokio::test]
    async fn test_export_accepts_empty_records() {
        let response = app()
            .oneshot(post_json("/api/v1/cv/export", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"CV__"));
    }

    #[tokio::test]
    async fn test_preview_reports_layout() {
        let response = app()
            .oneshot(post_json("/api/v1/cv/preview", sample_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["page_count"], 1);
        assert_eq!(body["side_lines_dropped"], 0);
        assert_eq!(body["main_lines_clipped"], 0);
        assert!(body["filename"].as_str().unwrap().starts_with("CV_AwaNdiaye_"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_validation_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/cv/export")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
