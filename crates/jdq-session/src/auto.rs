//! Debounced auto-analysis of an edited document

use jdq_core::{AnalysisRequest, Language};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::sequencer::RequestId;
use crate::session::AnalysisSession;
use crate::state::SessionState;

#[derive(Default)]
struct Tracking {
    /// Fingerprint of the text most recently sent for analysis
    fingerprint: Option<md5::Digest>,
    in_flight: Option<JoinHandle<RequestId>>,
}

/// Coalesces rapid edits into one analysis request.
///
/// Each edit restarts the debounce timer. When it fires, the text is analyzed
/// unless it is identical to the text of the previous request and that request
/// did not fail. Starting a new analysis aborts the one still in flight.
pub struct AutoAnalyzer {
    session: AnalysisSession,
    language: Language,
    debounce: Duration,
    pending: Option<JoinHandle<()>>,
    tracking: Arc<Mutex<Tracking>>,
}

impl AutoAnalyzer {
    pub fn new(session: AnalysisSession, language: Language) -> Self {
        let debounce = session.config().debounce();
        Self {
            session,
            language,
            debounce,
            pending: None,
            tracking: Arc::new(Mutex::new(Tracking::default())),
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    /// Record an edit. Supersedes any edit whose timer has not fired yet.
    pub fn on_edit(&mut self, text: impl Into<String>) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let text = text.into();
        let session = self.session.clone();
        let tracking = self.tracking.clone();
        let language = self.language;
        let debounce = self.debounce;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            let fingerprint = md5::compute(text.as_bytes());
            let mut tracking = tracking.lock().await;
            let failed = matches!(session.state(), SessionState::Failed { .. });
            if tracking.fingerprint == Some(fingerprint) && !failed {
                debug!(fingerprint = ?fingerprint, "Text unchanged since last request, skipping analysis");
                return;
            }
            tracking.fingerprint = Some(fingerprint);

            let handle = session.trigger(AnalysisRequest::new(text, language));
            if let Some(previous) = tracking.in_flight.replace(handle) {
                previous.abort();
            }
        }));
    }

    /// True while an edit is waiting for its debounce timer
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.is_finished())
    }
}

impl Drop for AutoAnalyzer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
