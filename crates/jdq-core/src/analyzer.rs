//! Dimension analyzer trait and request types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::dimension::{Dimension, DimensionReport};
use crate::document::{JobDescription, Section};
use crate::presenter::Language;

/// Input handed to every dimension analyzer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRequest {
    pub text: String,
    pub sections: Vec<Section>,
    pub language: Language,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        let document = JobDescription::from_markdown(text);
        Self::from_document(&document, language)
    }

    pub fn from_document(document: &JobDescription, language: Language) -> Self {
        Self {
            text: document.text.clone(),
            sections: document.sections.clone(),
            language,
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Trait for services that score one quality dimension of a document.
///
/// Implementations may be local heuristics or remote services. A failure
/// for one dimension must not prevent the others from being computed, so
/// each call covers exactly one dimension.
#[async_trait]
pub trait DimensionAnalyzer: Send + Sync {
    /// Score `dimension` for the given document
    async fn analyze(&self, dimension: Dimension, request: &AnalysisRequest) -> Result<DimensionReport>;

    /// Short identifier used in logs
    fn name(&self) -> &str;
}
