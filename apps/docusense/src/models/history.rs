use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Number of entries the sidebar shows, newest first.
pub const HISTORY_DISPLAY_LIMIT: usize = 5;

/// A completed analysis cached for re-display without another backend call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry<T> {
    pub id: Uuid,
    pub filename: String,
    /// Target role; resume entries only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// When the submission was issued, not when the backend answered.
    pub timestamp: DateTime<Utc>,
    /// Serialized under `analysis`; document payloads carry their own `filename`.
    #[serde(rename = "analysis")]
    pub result: T,
}

/// The visible slice of a session history: the last `HISTORY_DISPLAY_LIMIT`
/// entries, most recent first.
pub fn visible_window<T>(history: &[T]) -> impl Iterator<Item = &T> {
    history.iter().rev().take(HISTORY_DISPLAY_LIMIT)
}
