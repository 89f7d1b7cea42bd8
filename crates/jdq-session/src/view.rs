//! Mapping of session states onto what the UI shows

use chrono::{DateTime, Utc};
use jdq_core::{HighlightReport, PresentationContext, ViewModel, present};
use serde::Serialize;

use crate::sequencer::RequestId;
use crate::state::SessionState;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionView {
    /// Nothing analyzed yet
    Empty { view: ViewModel },
    Loading { request: RequestId, message: String },
    /// Failure with a retry affordance; never a crash
    Error {
        request: RequestId,
        message: String,
        detail: String,
        can_retry: bool,
    },
    Ready {
        request: RequestId,
        view: ViewModel,
        highlights: HighlightReport,
        analyzed_at: DateTime<Utc>,
    },
}

pub fn session_view(state: &SessionState, ctx: &PresentationContext) -> SessionView {
    match state {
        SessionState::Idle => SessionView::Empty {
            view: present(None, ctx),
        },
        SessionState::Analyzing { request } => SessionView::Loading {
            request: *request,
            message: ctx.analyzing_message().to_string(),
        },
        SessionState::Failed { request, error } => SessionView::Error {
            request: *request,
            message: ctx.failed_message().to_string(),
            detail: error.clone(),
            can_retry: true,
        },
        SessionState::Ready { request, outcome } => SessionView::Ready {
            request: *request,
            view: present(Some(&outcome.assessment), ctx),
            highlights: outcome.highlights.clone(),
            analyzed_at: outcome.analyzed_at,
        },
    }
}
