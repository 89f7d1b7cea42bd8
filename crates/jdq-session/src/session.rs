//! Analysis session with last-request-wins state updates

use jdq_core::{AnalysisRequest, DimensionAnalyzer, QualityConfig, Result};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::pipeline::Pipeline;
use crate::sequencer::{RequestId, RequestSequencer};
use crate::state::{AnalysisOutcome, SessionState};

struct Inner {
    pipeline: Pipeline,
    sequencer: RequestSequencer,
    state: watch::Sender<SessionState>,
    last_request: Mutex<Option<AnalysisRequest>>,
}

/// One document's analysis session.
///
/// Cloning yields another handle to the same session. State changes are
/// published on a watch channel; only the completion of the most recently
/// started request is ever applied.
#[derive(Clone)]
pub struct AnalysisSession {
    inner: Arc<Inner>,
}

impl AnalysisSession {
    pub fn new(analyzer: Arc<dyn DimensionAnalyzer>, config: QualityConfig) -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        Self {
            inner: Arc::new(Inner {
                pipeline: Pipeline::new(analyzer, config),
                sequencer: RequestSequencer::new(),
                state,
                last_request: Mutex::new(None),
            }),
        }
    }

    pub fn config(&self) -> &QualityConfig {
        self.inner.pipeline.config()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn latest_request(&self) -> Option<RequestId> {
        self.inner.sequencer.latest()
    }

    /// Run an analysis to completion and return its id.
    ///
    /// If another request starts before this one finishes, this one's result
    /// is discarded.
    pub async fn analyze(&self, request: AnalysisRequest) -> RequestId {
        *self.inner.last_request.lock().await = Some(request.clone());

        let id = self.begin();
        info!(request = %id, analyzer = self.inner.pipeline.analyzer_name(), chars = request.char_len(), "Analysis started");

        let result = self.inner.pipeline.run(&request).await;
        self.complete(id, result);
        id
    }

    /// Start an analysis in the background
    pub fn trigger(&self, request: AnalysisRequest) -> JoinHandle<RequestId> {
        let session = self.clone();
        tokio::spawn(async move { session.analyze(request).await })
    }

    /// Re-run the last request, e.g. after a failure. `None` if nothing was analyzed yet.
    pub async fn retry(&self) -> Option<RequestId> {
        let request = self.inner.last_request.lock().await.clone()?;
        Some(self.analyze(request).await)
    }

    fn begin(&self) -> RequestId {
        let id = self.inner.sequencer.next();
        let sequencer = &self.inner.sequencer;
        self.inner.state.send_if_modified(|state| {
            if !sequencer.is_current(id) {
                return false;
            }
            *state = SessionState::Analyzing { request: id };
            true
        });
        id
    }

    fn complete(&self, id: RequestId, result: Result<AnalysisOutcome>) -> bool {
        let sequencer = &self.inner.sequencer;
        self.inner.state.send_if_modified(|state| {
            if !sequencer.is_current(id) {
                debug!(request = %id, latest = ?sequencer.latest(), "Discarding stale analysis result");
                return false;
            }
            *state = match result {
                Ok(outcome) => SessionState::Ready {
                    request: id,
                    outcome: Arc::new(outcome),
                },
                Err(e) => {
                    warn!(request = %id, error = %e, "Analysis failed");
                    SessionState::Failed {
                        request: id,
                        error: e.to_string(),
                    }
                }
            };
            true
        })
    }
}
