//! One analysis request: concurrent per-dimension calls, then aggregation

use chrono::Utc;
use futures::future::join_all;
use jdq_core::{
    AnalysisRequest, Dimension, DimensionAnalyzer, DimensionReport, Error, QualityConfig, Result,
    aggregate, map_highlights,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::state::AnalysisOutcome;

/// Runs the analyzers for all dimensions and builds the outcome
pub struct Pipeline {
    analyzer: Arc<dyn DimensionAnalyzer>,
    config: QualityConfig,
}

impl Pipeline {
    pub fn new(analyzer: Arc<dyn DimensionAnalyzer>, config: QualityConfig) -> Self {
        Self { analyzer, config }
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    pub fn analyzer_name(&self) -> &str {
        self.analyzer.name()
    }

    /// Analyze `request`. Dimensions that fail or time out are reported as
    /// missing; the request fails only when no dimension succeeds.
    pub async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome> {
        let started = Instant::now();
        let limit = self.config.analyzer_timeout();

        let calls = Dimension::ALL.iter().map(|dimension| async move {
            let result = match timeout(limit, self.analyzer.analyze(*dimension, request)).await {
                Ok(result) => result.and_then(|report| check_report(*dimension, report)),
                Err(_) => Err(Error::Timeout(format!(
                    "{} analyzer did not answer within {:?}",
                    dimension, limit
                ))),
            };
            (*dimension, result)
        });

        let mut reports = Vec::with_capacity(Dimension::ALL.len());
        let mut failures = Vec::new();
        for (dimension, result) in join_all(calls).await {
            match result {
                Ok(report) => reports.push(report),
                Err(e) => {
                    warn!(dimension = %dimension, analyzer = self.analyzer.name(), error = %e, "Dimension analysis failed");
                    failures.push(format!("{}: {}", dimension, e));
                }
            }
        }

        if reports.is_empty() {
            return Err(Error::AnalysisFailed(failures.join("; ")));
        }

        let assessment = aggregate(&reports, &self.config)?;
        let text_len = request.char_len();
        let mut highlights = map_highlights(assessment.bias_issues(), text_len);
        highlights.dropped += assessment.rejected_bias_issues();
        if highlights.dropped > 0 {
            debug!(dropped = highlights.dropped, "Bias issues with invalid offsets or shape were not highlighted");
        }

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            score = assessment.overall_score,
            level = %assessment.quality_level,
            missing = assessment.missing_dimensions.len(),
            elapsed_ms,
            "Analysis complete"
        );

        Ok(AnalysisOutcome {
            assessment,
            highlights,
            text: request.text.clone(),
            text_len,
            analyzed_at: Utc::now(),
            elapsed_ms,
        })
    }
}

/// Reject a report that cannot be aggregated so it counts as a failed
/// dimension instead of failing the whole request
fn check_report(dimension: Dimension, report: DimensionReport) -> Result<DimensionReport> {
    let found = if report.dimension != dimension {
        report.dimension
    } else {
        report.details.dimension()
    };
    if found != dimension {
        return Err(Error::DimensionMismatch {
            expected: dimension,
            found,
        });
    }
    if !(0.0..=100.0).contains(&report.score) {
        return Err(Error::InvalidScoreRange {
            dimension,
            score: report.score,
        });
    }
    Ok(report)
}
