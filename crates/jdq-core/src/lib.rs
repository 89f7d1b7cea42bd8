//! Core types and scoring pipeline for JDQ (Job Description Quality)
//!
//! This crate holds the pure part of the content quality assessment:
//! aggregation of per-dimension scores, recommendation ranking, bias
//! highlight mapping and the presentation adapter. It also defines the
//! collaborator traits (dimension analyzers, document sources) that the
//! other crates implement.

pub mod aggregator;
pub mod analyzer;
pub mod assessment;
pub mod bias;
pub mod config;
pub mod dimension;
pub mod document;
pub mod error;
pub mod highlight;
pub mod presenter;
pub mod ranker;


pub use aggregator::aggregate;
pub use analyzer::{AnalysisRequest, DimensionAnalyzer};
pub use assessment::{QualityAssessment, QualityColor, QualityLevel};
pub use bias::{BiasIssue, BiasType, Severity};
pub use config::{DimensionWeights, QualityConfig, QualityThresholds};
pub use dimension::{
    ClarityDetails, CompletenessDetails, ComplianceDetails, Dimension, DimensionDetails,
    DimensionReport, DimensionScore, InclusivityDetails, ReadabilityDetails,
};
pub use document::{DocumentSource, JobDescription, Section};
pub use error::{Error, Result};
pub use highlight::{HighlightColor, HighlightReport, HighlightSpan, map_highlights};
pub use presenter::{
    Badge, DashboardView, DimensionBar, Language, PresentationContext, PriorityBadge, Theme,
    ViewModel, dimension_icon, present,
};
pub use ranker::{Ranking, rank};
