//! Quality aggregation: weighted overall score, level and color

use std::collections::BTreeMap;
use tracing::debug;

use crate::assessment::QualityAssessment;
use crate::config::QualityConfig;
use crate::dimension::{Dimension, DimensionDetails, DimensionReport, DimensionScore};
use crate::ranker::rank;
use crate::{Error, Result};

/// Combine per-dimension reports into a single assessment.
///
/// A dimension absent from `reports` is substituted with a zero score at its
/// configured weight and listed in `missing_dimensions`. Scores outside
/// [0, 100] are rejected.
pub fn aggregate(reports: &[DimensionReport], config: &QualityConfig) -> Result<QualityAssessment> {
    let mut provided: BTreeMap<Dimension, &DimensionReport> = BTreeMap::new();

    for report in reports {
        if !report.score.is_finite() || !(0.0..=100.0).contains(&report.score) {
            return Err(Error::InvalidScoreRange {
                dimension: report.dimension,
                score: report.score,
            });
        }

        let found = report.details.dimension();
        if found != report.dimension {
            return Err(Error::DimensionMismatch {
                expected: report.dimension,
                found,
            });
        }

        if provided.insert(report.dimension, report).is_some() {
            return Err(Error::DuplicateDimension(report.dimension));
        }
    }

    let mut dimension_scores = BTreeMap::new();
    let mut missing_dimensions = Vec::new();

    for dimension in Dimension::ALL {
        let weight = config.weights.weight(dimension);
        let entry = match provided.get(&dimension) {
            Some(report) => DimensionScore {
                score: report.score,
                weight,
                details: report.details.clone(),
                computed: true,
            },
            None => {
                debug!(dimension = %dimension, "Substituting missing dimension");
                missing_dimensions.push(dimension);
                DimensionScore {
                    score: 0.0,
                    weight,
                    details: DimensionDetails::empty(dimension),
                    computed: false,
                }
            }
        };
        dimension_scores.insert(dimension, entry);
    }

    let overall_score = dimension_scores
        .values()
        .map(|s| s.score * s.weight)
        .sum::<f64>()
        .clamp(0.0, 100.0);

    let quality_level = config.thresholds.level_for(overall_score);
    let ranking = rank(&dimension_scores, config);

    Ok(QualityAssessment {
        overall_score,
        quality_level,
        quality_color: quality_level.color(),
        dimension_scores,
        top_recommendations: ranking.top_recommendations,
        improvement_priority: ranking.improvement_priority,
        missing_dimensions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{QualityColor, QualityLevel};

    fn reports(scores: [f64; 5]) -> Vec<DimensionReport> {
        Dimension::ALL
            .iter()
            .zip(scores)
            .map(|(d, s)| DimensionReport::new(s, DimensionDetails::empty(*d)))
            .collect()
    }

    #[test]
    fn test_excellent_scenario() {
        let assessment =
            aggregate(&reports([95.0, 90.0, 92.0, 98.0, 95.0]), &QualityConfig::default()).unwrap();

        assert!((assessment.overall_score - 93.75).abs() < 1e-9);
        assert_eq!(assessment.overall_score.round(), 94.0);
        assert_eq!(assessment.quality_level, QualityLevel::Excellent);
        assert_eq!(assessment.quality_color, QualityColor::Green);
        assert!(assessment.improvement_priority.is_empty());
        assert!(!assessment.is_incomplete());
    }

    #[test]
    fn test_weak_readability_clarity_completeness() {
        let assessment =
            aggregate(&reports([40.0, 50.0, 45.0, 99.0, 98.0]), &QualityConfig::default()).unwrap();

        // 40*.25 + 50*.25 + 45*.20 + 99*.20 + 98*.10
        assert!((assessment.overall_score - 61.1).abs() < 1e-9);
        assert_eq!(assessment.quality_level, QualityLevel::Fair);
        assert_eq!(
            assessment.improvement_priority,
            vec![Dimension::Readability, Dimension::Clarity, Dimension::Completeness]
        );
    }

    #[test]
    fn test_needs_improvement_with_heavier_weights_on_weak_dimensions() {
        let mut config = QualityConfig::default();
        config.weights.readability = 0.3;
        config.weights.completeness = 0.3;
        config.weights.clarity = 0.3;
        config.weights.inclusivity = 0.05;
        config.weights.compliance = 0.05;

        let assessment = aggregate(&reports([40.0, 50.0, 45.0, 99.0, 98.0]), &config).unwrap();
        assert!(assessment.overall_score >= 50.0 && assessment.overall_score < 60.0);
        assert_eq!(assessment.quality_level, QualityLevel::NeedsImprovement);
        assert_eq!(assessment.quality_color, QualityColor::Red);
    }

    #[test]
    fn test_missing_dimension_is_flagged() {
        let mut input = reports([80.0, 80.0, 80.0, 80.0, 80.0]);
        input.retain(|r| r.dimension != Dimension::Compliance);

        let assessment = aggregate(&input, &QualityConfig::default()).unwrap();
        assert_eq!(assessment.missing_dimensions, vec![Dimension::Compliance]);
        assert!(assessment.is_incomplete());

        let compliance = assessment.score(Dimension::Compliance).unwrap();
        assert!(!compliance.computed);
        assert_eq!(compliance.score, 0.0);
        assert_eq!(compliance.weight, 0.10);
        assert!((assessment.overall_score - 72.0).abs() < 1e-9);
        assert!(!assessment.improvement_priority.contains(&Dimension::Compliance));
    }

    #[test]
    fn test_empty_input_degrades_instead_of_failing() {
        let assessment = aggregate(&[], &QualityConfig::default()).unwrap();
        assert_eq!(assessment.missing_dimensions.len(), 5);
        assert_eq!(assessment.overall_score, 0.0);
        assert!(assessment.top_recommendations.is_empty());
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        for bad in [-0.1, 100.5, f64::NAN] {
            let mut input = reports([80.0; 5]);
            input[2].score = bad;
            let err = aggregate(&input, &QualityConfig::default()).unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidScoreRange { dimension: Dimension::Clarity, .. }
            ));
        }
    }

    #[test]
    fn test_duplicate_and_mismatched_reports_rejected() {
        let mut input = reports([80.0; 5]);
        input.push(DimensionReport::new(70.0, DimensionDetails::empty(Dimension::Clarity)));
        assert!(matches!(
            aggregate(&input, &QualityConfig::default()),
            Err(Error::DuplicateDimension(Dimension::Clarity))
        ));

        let mismatched = vec![DimensionReport {
            dimension: Dimension::Readability,
            score: 50.0,
            details: DimensionDetails::empty(Dimension::Clarity),
        }];
        assert!(matches!(
            aggregate(&mismatched, &QualityConfig::default()),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_zeroing_a_dimension_never_increases_overall() {
        let config = QualityConfig::default();
        let base = [72.0, 88.0, 64.0, 91.0, 55.0];
        let full = aggregate(&reports(base), &config).unwrap().overall_score;

        for i in 0..5 {
            let mut lowered = base;
            lowered[i] = 0.0;
            let score = aggregate(&reports(lowered), &config).unwrap().overall_score;
            assert!(score <= full);
        }
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let config = QualityConfig::default();
        let input = reports([74.0, 61.0, 88.0, 90.0, 59.5]);
        let first = aggregate(&input, &config).unwrap();
        let second = aggregate(&input, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_overall_stays_within_bounds() {
        let config = QualityConfig::default();
        for scores in [[0.0; 5], [100.0; 5], [100.0, 0.0, 100.0, 0.0, 100.0]] {
            let overall = aggregate(&reports(scores), &config).unwrap().overall_score;
            assert!((0.0..=100.0).contains(&overall));
        }
    }
}
