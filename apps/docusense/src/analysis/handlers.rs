//! Axum route handlers for resume and document analysis.
//!
//! Handlers are generic over the kind and mounted once per kind in `routes`.

use axum::{
    extract::{
        multipart::{Field, MultipartError},
        Multipart, Path, State,
    },
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::{AnalysisKind, AnalysisRequest, Resume, Snapshot};
use crate::backend_client::UploadedFile;
use crate::derived::chart::{to_chart_series, ChartSlice};
use crate::derived::export::{export_file_name, to_export_text};
use crate::errors::AppError;
use crate::models::history::HistoryEntry;
use crate::routes::text_attachment;
use crate::state::{AppState, SessionKind};

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub series: Vec<ChartSlice>,
}

/// POST /api/{kind}/analyze
///
/// Multipart fields: `file` (required), `job_role`, `job_description` (resume only).
/// A missing file is rejected before the backend is contacted.
pub async fn handle_analyze<K: SessionKind>(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<HistoryEntry<K::Payload>>, AppError> {
    let request = read_request(multipart).await?;
    let entry = K::orchestrator(&state).submit(request).await?;
    Ok(Json(entry))
}

/// GET /api/{kind}
pub async fn handle_snapshot<K: SessionKind>(
    State(state): State<AppState>,
) -> Json<Snapshot<K::Payload>> {
    Json(K::orchestrator(&state).snapshot().await)
}

/// GET /api/{kind}/history
///
/// At most five entries, newest first.
pub async fn handle_history<K: SessionKind>(
    State(state): State<AppState>,
) -> Json<Vec<HistoryEntry<K::Payload>>> {
    Json(K::orchestrator(&state).visible_history().await)
}

/// POST /api/{kind}/history/:id/select
pub async fn handle_select_history<K: SessionKind>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HistoryEntry<K::Payload>>, AppError> {
    select_history::<K>(&state, id).await.map(Json)
}

pub async fn select_history<K: SessionKind>(
    state: &AppState,
    id: Uuid,
) -> Result<HistoryEntry<K::Payload>, AppError> {
    K::orchestrator(state)
        .select_history_entry(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("{} history entry {id} not found", K::NAME)))
}

/// GET /api/{kind}/export
///
/// Plain-text download of the displayed result.
pub async fn handle_export<K: SessionKind>(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let entry = K::orchestrator(&state)
        .current_result()
        .await
        .ok_or_else(|| AppError::Precondition(K::MISSING_RESULT_MESSAGE.to_string()))?;

    let subject = K::export_subject(&entry.result);
    Ok(text_attachment(&export_file_name(subject), to_export_text(subject)))
}

/// GET /api/resume/chart
///
/// Skill-distribution pie series; empty when nothing is displayed.
pub async fn handle_resume_chart(State(state): State<AppState>) -> Json<ChartResponse> {
    let series = <Resume as SessionKind>::orchestrator(&state)
        .current_result()
        .await
        .map(|entry| to_chart_series(&entry.result.skill_distribution))
        .unwrap_or_default();
    Json(ChartResponse { series })
}

async fn read_request(mut multipart: Multipart) -> Result<AnalysisRequest, AppError> {
    let mut request = AnalysisRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, "Malformed upload"))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => request.file = Some(read_file(field).await?),
            Some("job_role") => request.role = Some(read_text(field).await?),
            Some("job_description") => request.job_description = Some(read_text(field).await?),
            _ => {}
        }
    }

    Ok(request)
}

async fn read_file(field: Field<'_>) -> Result<UploadedFile, AppError> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let bytes = field
        .bytes()
        .await
        .map_err(|e| upload_error(e, "Failed to read uploaded file"))?;

    Ok(UploadedFile {
        filename,
        content_type,
        bytes,
    })
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| upload_error(e, "Malformed form field"))
}

/// Body-limit rejections surface as 413; anything else is a bad form.
fn upload_error(err: MultipartError, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Uploaded file exceeds the size limit: {}", err.body_text()))
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}
