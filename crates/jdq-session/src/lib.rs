//! Analysis sessions for JDQ
//!
//! Drives the `idle -> analyzing -> ready | failed` lifecycle of a document's
//! quality analysis: concurrent per-dimension analyzer calls with timeouts,
//! last-request-wins sequencing and debounced auto-analysis.

pub mod auto;
pub mod pipeline;
pub mod sequencer;
pub mod session;
pub mod state;
pub mod view;

#[cfg(test)]
mod tests;

pub use auto::AutoAnalyzer;
pub use pipeline::Pipeline;
pub use sequencer::{RequestId, RequestSequencer};
pub use session::AnalysisSession;
pub use state::{AnalysisOutcome, SessionState};
pub use view::{SessionView, session_view};

// Re-export core types for convenience
pub use jdq_core::{Error, Result};
