use axum::{extract::State, response::Response, Json};
use serde::Deserialize;
use tracing::info;

use crate::derived::export::{interview_export_file_name, to_interview_export_text};
use crate::errors::AppError;
use crate::interview::{InterviewSet, NO_QUESTIONS_MESSAGE};
use crate::models::roles::DEFAULT_ROLE;
use crate::routes::text_attachment;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub role: Option<String>,
}

/// POST /api/interview/questions
///
/// Body is optional; `{"role": "..."}` overrides the analyzed role.
/// Requires a displayed resume result. Replaces the previous set.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    body: Option<Json<GenerateQuestionsRequest>>,
) -> Result<Json<InterviewSet>, AppError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let resume = state.resume.current_result().await;

    let set = InterviewSet::generate(resume.as_ref(), request.role.as_deref())?;
    info!(
        role = set.role.as_deref().unwrap_or(DEFAULT_ROLE),
        "Generated interview questions"
    );

    *state.interview.write().await = set.clone();
    Ok(Json(set))
}

/// GET /api/interview/questions
pub async fn handle_get_questions(State(state): State<AppState>) -> Json<InterviewSet> {
    Json(state.interview.read().await.clone())
}

/// GET /api/interview/export
pub async fn handle_export_questions(State(state): State<AppState>) -> Result<Response, AppError> {
    let set = state.interview.read().await.clone();
    if set.is_empty() {
        return Err(AppError::Precondition(NO_QUESTIONS_MESSAGE.to_string()));
    }

    let role = set.role.as_deref().unwrap_or(DEFAULT_ROLE);
    Ok(text_attachment(
        &interview_export_file_name(role),
        to_interview_export_text(role, &set.questions),
    ))
}
