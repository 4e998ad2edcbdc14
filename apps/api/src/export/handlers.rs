//! Axum route handlers for the CV export API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::export::artifact::{generate, DocumentArtifact};
use crate::models::{IdentityRecord, ResumeRecord};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExportRequest {
    pub resume: ResumeRecord,
    pub identity: IdentityRecord,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub filename: String,
    pub page_count: usize,
    pub side_lines_dropped: usize,
    pub main_lines_clipped: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv/export
///
/// Returns the PDF as an attachment named `CV_{first}{last}_{date}.pdf`.
pub async fn handle_export(
    State(state): State<AppState>,
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = body?;
    let artifact = run_generate(&state, request).await?;

    let disposition = content_disposition(&artifact.filename);
    let disposition = HeaderValue::from_str(&disposition).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("invalid Content-Disposition header: {e}"))
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(artifact.bytes),
    )
        .into_response())
}

/// POST /api/v1/cv/preview
///
/// Runs the full export and reports what pagination did, without the bytes.
pub async fn handle_preview(
    State(state): State<AppState>,
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Json<PreviewResponse>, AppError> {
    let Json(request) = body?;
    let artifact = run_generate(&state, request).await?;

    Ok(Json(PreviewResponse {
        filename: artifact.filename,
        page_count: artifact.report.page_count,
        side_lines_dropped: artifact.report.side_lines_dropped,
        main_lines_clipped: artifact.report.main_lines_clipped,
    }))
}

/// Layout and encoding are CPU-bound, so they run off the async executor.
async fn run_generate(state: &AppState, request: ExportRequest) -> Result<DocumentArtifact, AppError> {
    let settings = state.layout.clone();
    let today = Utc::now().date_naive();

    let artifact = tokio::task::spawn_blocking(move || {
        generate(&request.resume, &request.identity, &settings, today)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    Ok(artifact)
}

/// `attachment` disposition with an ASCII fallback name and the exact UTF-8
/// name in `filename*`.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            ' '..='~' if c != '"' && c != '\\' => c,
            _ => '_',
        })
        .collect();

    if fallback == filename {
        format!("attachment; filename=\"{filename}\"")
    } else {
        format!(
            "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
            urlencoding::encode(filename)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_filename_is_quoted_as_is() {
        assert_eq!(
            content_disposition("CV_AmyDiallo_2026-10-18.pdf"),
            "attachment; filename=\"CV_AmyDiallo_2026-10-18.pdf\""
        );
    }

    #[test]
    fn test_non_ascii_filename_gets_fallback_and_encoded_form() {
        let value = content_disposition("CV_Zoé_2026-10-18.pdf");
        assert_eq!(
            value,
            "attachment; filename=\"CV_Zo__2026-10-18.pdf\"; filename*=UTF-8''CV_Zo%C3%A9_2026-10-18.pdf"
        );
        assert!(HeaderValue::from_str(&value).is_ok());
    }

    #[test]
    fn test_encoded_form_is_utf8_percent_encoding() {
        let value = content_disposition("CV_ŁukaszWójcik_2026-10-18.pdf");
        assert!(value.contains("filename=\"CV__ukaszW_jcik_2026-10-18.pdf\""));
        assert!(value.ends_with("filename*=UTF-8''CV_%C5%81ukaszW%C3%B3jcik_2026-10-18.pdf"));
    }

    #[test]
    fn test_request_fields_default_when_missing() {
        let request: ExportRequest = serde_json::from_str(r#"{"identity":{"firstName":"Jean"}}"#).unwrap();
        assert_eq!(request.identity.first_name.as_deref(), Some("Jean"));
        assert!(request.resume.experiences.is_empty());
    }
}
