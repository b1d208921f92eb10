//! Test doubles for the analysis transport plus canned backend payloads.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::{mpsc, oneshot};

use crate::backend_client::{AnalysisForm, AnalysisTransport, Endpoint, TransportError};

/// Answers submissions from a script, in order, and records every call.
#[derive(Default)]
pub struct FakeTransport {
    script: Mutex<VecDeque<Result<Value, TransportError>>>,
    calls: Mutex<Vec<(Endpoint, AnalysisForm)>>,
    call_count: AtomicUsize,
    healthy: bool,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_ok(self, payload: Value) -> Self {
        self.push(Ok(payload))
    }

    pub fn respond_err(self, error: TransportError) -> Self {
        self.push(Err(error))
    }

    pub fn healthy(mut self) -> Self {
        self.healthy = true;
        self
    }

    fn push(self, outcome: Result<Value, TransportError>) -> Self {
        self.script.lock().unwrap().push_back(outcome);
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<(Endpoint, AnalysisForm)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AnalysisTransport for FakeTransport {
    async fn submit(&self, endpoint: Endpoint, form: AnalysisForm) -> Result<Value, TransportError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push((endpoint, form));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Unreachable("no scripted response".to_string())))
    }

    async fn health(&self) -> bool {
        self.healthy
    }
}

/// Holds every submission open until the test releases it by call index.
pub struct GatedTransport {
    gates: Mutex<Vec<Option<oneshot::Sender<Result<Value, TransportError>>>>>,
    started: mpsc::UnboundedSender<usize>,
}

impl GatedTransport {
    /// Returns the transport and a receiver that yields each call index as it starts.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<usize>) {
        let (started, rx) = mpsc::unbounded_channel();
        (
            Self {
                gates: Mutex::new(Vec::new()),
                started,
            },
            rx,
        )
    }

    pub fn release(&self, call: usize, outcome: Result<Value, TransportError>) {
        let gate = self.gates.lock().unwrap()[call].take().expect("call already released");
        let _ = gate.send(outcome);
    }
}

#[async_trait]
impl AnalysisTransport for GatedTransport {
    async fn submit(&self, _endpoint: Endpoint, _form: AnalysisForm) -> Result<Value, TransportError> {
        let (tx, rx) = oneshot::channel();
        let index = {
            let mut gates = self.gates.lock().unwrap();
            gates.push(Some(tx));
            gates.len() - 1
        };
        let _ = self.started.send(index);
        rx.await
            .unwrap_or_else(|_| Err(TransportError::Unreachable("gate dropped".to_string())))
    }

    async fn health(&self) -> bool {
        true
    }
}

pub fn resume_payload() -> Value {
    json!({
        "status": "ok",
        "metrics": {
            "ats_score": 82,
            "skill_coverage_pct": 70,
            "keyword_match_pct": 65,
            "readability_score": 88
        },
        "skill_distribution": { "python": 40.4, "sql": 30.5, "statistics": 29.1 },
        "keywords_matched": ["python", "sql"],
        "missing_skills": [],
        "strengths": ["Clear structure"],
        "weaknesses": ["Few metrics"],
        "suggestions": [{ "type": "quick", "text": "Quantify impact" }],
        "summary": "Strong data background."
    })
}

pub fn document_payload() -> Value {
    json!({
        "status": "ok",
        "filename": "memo.txt",
        "document_type": "Memo",
        "sentiment": "neutral",
        "summary": "Quarterly update.",
        "key_points": ["Revenue up", "Hiring paused"]
    })
}
