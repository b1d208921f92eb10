use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::handlers::select_history;
use crate::analysis::{Document, Kind, Resume};
use crate::errors::AppError;
use crate::models::analysis::{DocumentAnalysis, ResumeAnalysis};
use crate::models::history::HistoryEntry;
use crate::state::AppState;
use crate::view_state::{Tab, ViewState};

#[derive(Debug, Deserialize)]
pub struct SelectTabRequest {
    pub tab: Tab,
}

/// A history entry from whichever orchestrator the active tab routes to.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", content = "entry", rename_all = "snake_case")]
pub enum SelectedEntry {
    Resume(HistoryEntry<ResumeAnalysis>),
    Document(HistoryEntry<DocumentAnalysis>),
}

/// GET /api/view
pub async fn handle_get_view(State(state): State<AppState>) -> Json<ViewState> {
    Json(state.view.read().await.clone())
}

/// POST /api/view/tab
pub async fn handle_select_tab(
    State(state): State<AppState>,
    Json(request): Json<SelectTabRequest>,
) -> Json<ViewState> {
    let mut view = state.view.write().await;
    view.select_tab(request.tab);
    Json(view.clone())
}

/// POST /api/view/sidebar/toggle
pub async fn handle_toggle_sidebar(State(state): State<AppState>) -> Json<ViewState> {
    let mut view = state.view.write().await;
    view.toggle_sidebar();
    Json(view.clone())
}

/// POST /api/view/sidebar/collapse
pub async fn handle_toggle_collapsed(State(state): State<AppState>) -> Json<ViewState> {
    let mut view = state.view.write().await;
    view.toggle_collapsed();
    Json(view.clone())
}

/// POST /api/history/:id/select
///
/// Sidebar "Recent Activity" click: routed by the active tab.
pub async fn handle_select_recent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SelectedEntry>, AppError> {
    let target = state.view.read().await.history_target();
    let selected = match target {
        Kind::Resume => SelectedEntry::Resume(select_history::<Resume>(&state, id).await?),
        Kind::Document => SelectedEntry::Document(select_history::<Document>(&state, id).await?),
    };
    Ok(Json(selected))
}
