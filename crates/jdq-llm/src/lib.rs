//! LLM integration for JDQ
//!
//! This crate provides a `DimensionAnalyzer` that delegates scoring to an
//! OpenAI-compatible chat completions endpoint.

mod client;
mod config;


pub use client::{LlmAnalyzerClient, parse_report, strip_code_fences, system_prompt};
pub use config::{DEFAULT_API_URL, DEFAULT_MODEL, LlmConfig};

// Re-export core types for convenience
pub use jdq_core::{DimensionAnalyzer, Error, Result};
