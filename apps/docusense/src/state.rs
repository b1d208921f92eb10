use std::sync::Arc;

use tokio::sync::RwLock;

use crate::analysis::{AnalysisKind, Document, Orchestrator, Resume};
use crate::backend_client::AnalysisTransport;
use crate::config::Config;
use crate::interview::InterviewSet;
use crate::view_state::ViewState;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// One process hosts one session: every field here is that session's memory.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Transport shared by both orchestrators. Swapped for a fake in tests.
    pub transport: Arc<dyn AnalysisTransport>,
    pub resume: Arc<Orchestrator<Resume>>,
    pub document: Arc<Orchestrator<Document>>,
    pub view: Arc<RwLock<ViewState>>,
    pub interview: Arc<RwLock<InterviewSet>>,
}

impl AppState {
    pub fn new(config: Config, transport: Arc<dyn AnalysisTransport>) -> Self {
        Self {
            config,
            resume: Arc::new(Orchestrator::new(transport.clone())),
            document: Arc::new(Orchestrator::new(transport.clone())),
            transport,
            view: Arc::new(RwLock::new(ViewState::default())),
            interview: Arc::new(RwLock::new(InterviewSet::default())),
        }
    }
}

/// Picks the orchestrator for a kind out of `AppState`, so handlers can be
/// written once and mounted per kind.
pub trait SessionKind: AnalysisKind + Sized {
    fn orchestrator(state: &AppState) -> &Orchestrator<Self>;
}

impl SessionKind for Resume {
    fn orchestrator(state: &AppState) -> &Orchestrator<Self> {
        &state.resume
    }
}

impl SessionKind for Document {
    fn orchestrator(state: &AppState) -> &Orchestrator<Self> {
        &state.document
    }
}
