//! Session state machine: idle -> analyzing -> ready | failed

use chrono::{DateTime, Utc};
use jdq_core::{HighlightReport, QualityAssessment};
use serde::Serialize;
use std::sync::Arc;

use crate::sequencer::RequestId;

/// Everything produced by one successful analysis request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisOutcome {
    pub assessment: QualityAssessment,
    pub highlights: HighlightReport,
    /// The analyzed text; highlight offsets index into it
    pub text: String,
    /// Characters in the analyzed text
    pub text_len: usize,
    pub analyzed_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    Analyzing {
        request: RequestId,
    },
    Ready {
        request: RequestId,
        outcome: Arc<AnalysisOutcome>,
    },
    Failed {
        request: RequestId,
        error: String,
    },
}

impl SessionState {
    /// Request the state belongs to; `None` while idle
    pub fn request(&self) -> Option<RequestId> {
        match self {
            SessionState::Idle => None,
            SessionState::Analyzing { request }
            | SessionState::Ready { request, .. }
            | SessionState::Failed { request, .. } => Some(*request),
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self, SessionState::Analyzing { .. })
    }

    /// True once the latest request has finished, successfully or not
    pub fn is_settled(&self) -> bool {
        matches!(self, SessionState::Ready { .. } | SessionState::Failed { .. })
    }

    pub fn outcome(&self) -> Option<&AnalysisOutcome> {
        match self {
            SessionState::Ready { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Analyzing { .. } => "analyzing",
            SessionState::Ready { .. } => "ready",
            SessionState::Failed { .. } => "failed",
        }
    }
}
