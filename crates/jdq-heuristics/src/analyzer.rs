//! Offline implementation of the dimension analyzer trait

use async_trait::async_trait;
use jdq_core::{
    AnalysisRequest, Dimension, DimensionAnalyzer, DimensionDetails, DimensionReport,
    QualityConfig, Result,
};
use tracing::debug;

use crate::clarity::ClarityAnalyzer;
use crate::completeness;
use crate::compliance::ComplianceAnalyzer;
use crate::inclusivity::InclusivityAnalyzer;
use crate::readability;
use crate::text::Tokenizer;

/// Sentences longer than this many words count as long
pub const LONG_SENTENCE_WORDS: usize = 25;

/// Scores every dimension locally, without network access
pub struct HeuristicAnalyzer {
    tokenizer: Tokenizer,
    clarity: ClarityAnalyzer,
    inclusivity: InclusivityAnalyzer,
    compliance: ComplianceAnalyzer,
    target_grade_level: f64,
}

impl HeuristicAnalyzer {
    pub fn new(config: &QualityConfig) -> Result<Self> {
        Ok(Self {
            tokenizer: Tokenizer::new(LONG_SENTENCE_WORDS)?,
            clarity: ClarityAnalyzer::new()?,
            inclusivity: InclusivityAnalyzer::new(),
            compliance: ComplianceAnalyzer::new()?,
            target_grade_level: config.target_grade_level,
        })
    }

    /// Score one dimension synchronously
    pub fn score(&self, dimension: Dimension, request: &AnalysisRequest) -> DimensionReport {
        let text = request.text.as_str();
        let (score, details) = match dimension {
            Dimension::Readability => {
                let (score, details) =
                    readability::analyze(&self.tokenizer, text, request.language, self.target_grade_level);
                (score, DimensionDetails::Readability(details))
            }
            Dimension::Completeness => {
                let (score, details) = completeness::analyze(&request.sections);
                (score, DimensionDetails::Completeness(details))
            }
            Dimension::Clarity => {
                let (score, details) = self.clarity.analyze(&self.tokenizer, text);
                (score, DimensionDetails::Clarity(details))
            }
            Dimension::Inclusivity => {
                let (score, details) = self.inclusivity.analyze(text);
                (score, DimensionDetails::Inclusivity(details))
            }
            Dimension::Compliance => {
                let (score, details) = self.compliance.analyze(text);
                (score, DimensionDetails::Compliance(details))
            }
        };

        debug!(dimension = %dimension, score, "Heuristic score computed");
        DimensionReport::new(score, details)
    }
}

#[async_trait]
impl DimensionAnalyzer for HeuristicAnalyzer {
    async fn analyze(&self, dimension: Dimension, request: &AnalysisRequest) -> Result<DimensionReport> {
        Ok(self.score(dimension, request))
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}
