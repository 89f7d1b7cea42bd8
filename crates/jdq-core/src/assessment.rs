//! Aggregated quality assessment types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::bias::BiasIssue;
use crate::dimension::{Dimension, DimensionScore};

/// Coarse summary of the overall score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum QualityLevel {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl QualityLevel {
    pub fn color(&self) -> QualityColor {
        match self {
            QualityLevel::Excellent => QualityColor::Green,
            QualityLevel::Good => QualityColor::Blue,
            QualityLevel::Fair => QualityColor::Yellow,
            QualityLevel::NeedsImprovement => QualityColor::Red,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityLevel::Excellent => "Excellent",
            QualityLevel::Good => "Good",
            QualityLevel::Fair => "Fair",
            QualityLevel::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QualityColor {
    Green,
    Blue,
    Yellow,
    Red,
}

impl QualityColor {
    pub fn name(&self) -> &'static str {
        match self {
            QualityColor::Green => "green",
            QualityColor::Blue => "blue",
            QualityColor::Yellow => "yellow",
            QualityColor::Red => "red",
        }
    }
}

impl fmt::Display for QualityColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one analysis request. Ephemeral and read-only once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityAssessment {
    pub overall_score: f64,
    pub quality_level: QualityLevel,
    pub quality_color: QualityColor,
    pub dimension_scores: BTreeMap<Dimension, DimensionScore>,
    pub top_recommendations: Vec<String>,
    pub improvement_priority: Vec<Dimension>,
    /// Dimensions substituted with a zero score because no result was available
    pub missing_dimensions: Vec<Dimension>,
}

impl QualityAssessment {
    /// True when at least one dimension was substituted
    pub fn is_incomplete(&self) -> bool {
        !self.missing_dimensions.is_empty()
    }

    pub fn score(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.dimension_scores.get(&dimension)
    }

    /// Bias issues reported by the inclusivity dimension
    pub fn bias_issues(&self) -> &[BiasIssue] {
        self.dimension_scores
            .get(&Dimension::Inclusivity)
            .map(|s| s.details.bias_issues())
            .unwrap_or(&[])
    }

    pub fn rejected_bias_issues(&self) -> usize {
        self.dimension_scores
            .get(&Dimension::Inclusivity)
            .map_or(0, |s| s.details.rejected_issues())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_to_color() {
        assert_eq!(QualityLevel::Excellent.color(), QualityColor::Green);
        assert_eq!(QualityLevel::Good.color(), QualityColor::Blue);
        assert_eq!(QualityLevel::Fair.color(), QualityColor::Yellow);
        assert_eq!(QualityLevel::NeedsImprovement.color(), QualityColor::Red);
    }

    #[test]
    fn test_level_serializes_with_display_label() {
        let json = serde_json::to_string(&QualityLevel::NeedsImprovement).unwrap();
        assert_eq!(json, r#""Needs Improvement""#);
    }
}
