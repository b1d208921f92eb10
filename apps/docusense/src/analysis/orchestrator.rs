//! Request orchestrator: one per analysis kind.
//!
//! Phase machine: `Idle → Submitting → (Succeeded | Failed)`; a new submission
//! re-enters `Submitting` from any phase.
//!
//! Every submission takes a generation number. A completion is applied only if
//! its generation is still the latest, so the most recently *initiated* request
//! wins regardless of completion order. The lock is never held across the
//! backend call.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{AnalysisKind, AnalysisRequest};
use crate::backend_client::{AnalysisForm, AnalysisTransport, TransportError};
use crate::models::history::{visible_window, HistoryEntry};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Submitting,
    Succeeded,
    Failed { message: String },
}

impl Phase {
    #[cfg(test)]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Phase::Failed { message } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SubmitError {
    /// No file chosen. Raised before any network call.
    #[error("{0}")]
    MissingFile(&'static str),

    /// Transport or application failure, already recorded as `Phase::Failed`.
    #[error("{message}")]
    Analysis { message: String },

    /// A newer submission of the same kind started while this one was in flight.
    #[error("superseded by a newer submission")]
    Superseded,
}

/// Read-only view of an orchestrator for the UI.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<T> {
    #[serde(flatten)]
    pub phase: Phase,
    pub result: Option<HistoryEntry<T>>,
    pub history_len: usize,
}

struct SessionState<T> {
    phase: Phase,
    result: Option<HistoryEntry<T>>,
    history: Vec<HistoryEntry<T>>,
    generation: u64,
}

impl<T> Default for SessionState<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            result: None,
            history: Vec::new(),
            generation: 0,
        }
    }
}

pub struct Orchestrator<K: AnalysisKind> {
    transport: Arc<dyn AnalysisTransport>,
    state: RwLock<SessionState<K::Payload>>,
    kind: PhantomData<K>,
}

impl<K: AnalysisKind> Orchestrator<K> {
    pub fn new(transport: Arc<dyn AnalysisTransport>) -> Self {
        Self {
            transport,
            state: RwLock::new(SessionState::default()),
            kind: PhantomData,
        }
    }

    /// Uploads `request` to the backend and records the outcome.
    ///
    /// Exactly one transport call per invocation, none when the file is missing.
    pub async fn submit(
        &self,
        request: AnalysisRequest,
    ) -> Result<HistoryEntry<K::Payload>, SubmitError> {
        let file = request
            .file
            .clone()
            .filter(|file| !file.is_empty())
            .ok_or(SubmitError::MissingFile(K::MISSING_FILE_MESSAGE))?;

        let issued_at = Utc::now();
        let generation = self.begin().await;
        info!(
            kind = K::NAME,
            filename = %file.filename,
            generation,
            "Submitting analysis"
        );

        let filename = file.filename.clone();
        let form = AnalysisForm::new(file).with_fields(K::form_fields(&request));
        let outcome = self
            .transport
            .submit(K::ENDPOINT, form)
            .await
            .and_then(|payload| {
                serde_json::from_value::<K::Payload>(payload)
                    .map_err(|e| TransportError::InvalidBody(e.to_string()))
            });

        let mut state = self.state.write().await;
        if state.generation != generation {
            debug!(
                kind = K::NAME,
                generation,
                latest = state.generation,
                "Discarding stale analysis response"
            );
            return Err(SubmitError::Superseded);
        }

        match outcome {
            Ok(payload) => {
                let entry = HistoryEntry {
                    id: Uuid::new_v4(),
                    filename,
                    role: K::entry_role(&request),
                    timestamp: issued_at,
                    result: payload,
                };
                state.phase = Phase::Succeeded;
                state.result = Some(entry.clone());
                state.history.push(entry.clone());
                info!(kind = K::NAME, generation, id = %entry.id, "Analysis stored");
                Ok(entry)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(kind = K::NAME, generation, "Analysis failed: {}", message);
                state.phase = Phase::Failed {
                    message: message.clone(),
                };
                Err(SubmitError::Analysis { message })
            }
        }
    }

    /// Enters `Submitting`: clears error and result, issues a new generation.
    async fn begin(&self) -> u64 {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.phase = Phase::Submitting;
        state.result = None;
        state.generation
    }

    /// Re-displays a past entry. Phase is left untouched.
    pub async fn select_history_entry(&self, id: Uuid) -> Option<HistoryEntry<K::Payload>> {
        let mut state = self.state.write().await;
        let entry = state.history.iter().find(|entry| entry.id == id).cloned()?;
        state.result = Some(entry.clone());
        Some(entry)
    }

    pub async fn snapshot(&self) -> Snapshot<K::Payload> {
        let state = self.state.read().await;
        Snapshot {
            phase: state.phase.clone(),
            result: state.result.clone(),
            history_len: state.history.len(),
        }
    }

    pub async fn current_result(&self) -> Option<HistoryEntry<K::Payload>> {
        self.state.read().await.result.clone()
    }

    pub async fn visible_history(&self) -> Vec<HistoryEntry<K::Payload>> {
        let state = self.state.read().await;
        visible_window(&state.history).cloned().collect()
    }
}
