//! Offline dimension analyzers for JDQ
//!
//! Rule-based scoring for all five quality dimensions. Useful on its own for
//! quick local checks and as the fallback when no remote analyzer is configured.

pub mod analyzer;
pub mod clarity;
pub mod completeness;
pub mod compliance;
pub mod inclusivity;
pub mod readability;
pub mod text;

#[cfg(test)]
mod tests;

pub use analyzer::{HeuristicAnalyzer, LONG_SENTENCE_WORDS};
pub use clarity::ClarityAnalyzer;
pub use compliance::ComplianceAnalyzer;
pub use inclusivity::InclusivityAnalyzer;
pub use text::{TextStats, Tokenizer};

// Re-export core types for convenience
pub use jdq_core::{Error, Result};
