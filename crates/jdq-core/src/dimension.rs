//! Quality dimensions and their per-dimension payloads

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bias::BiasIssue;

/// One of the five fixed axes of document quality.
///
/// Declaration order is the tie-break order used everywhere a deterministic
/// ordering between dimensions is needed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Readability,
    Completeness,
    Clarity,
    Inclusivity,
    Compliance,
}

impl Dimension {
    /// All dimensions in declaration order
    pub const ALL: [Dimension; 5] = [
        Dimension::Readability,
        Dimension::Completeness,
        Dimension::Clarity,
        Dimension::Inclusivity,
        Dimension::Compliance,
    ];

    /// Stable lowercase key
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::Readability => "readability",
            Dimension::Completeness => "completeness",
            Dimension::Clarity => "clarity",
            Dimension::Inclusivity => "inclusivity",
            Dimension::Compliance => "compliance",
        }
    }

    /// Position in the declaration order
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    /// Parse a dimension from its key (case-insensitive)
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "readability" => Some(Dimension::Readability),
            "completeness" => Some(Dimension::Completeness),
            "clarity" => Some(Dimension::Clarity),
            "inclusivity" | "bias" => Some(Dimension::Inclusivity),
            "compliance" => Some(Dimension::Compliance),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReadabilityDetails {
    #[serde(default)]
    pub flesch_reading_ease: f64,
    #[serde(default)]
    pub flesch_kincaid_grade: f64,
    #[serde(default)]
    pub gunning_fog: f64,
    #[serde(default)]
    pub smog_index: Option<f64>,
    #[serde(default)]
    pub avg_sentence_length: f64,
    #[serde(default)]
    pub target_grade_level: f64,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompletenessDetails {
    #[serde(default)]
    pub present_sections: Vec<String>,
    #[serde(default)]
    pub missing_sections: Vec<String>,
    #[serde(default)]
    pub thin_sections: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClarityDetails {
    #[serde(default)]
    pub passive_voice_ratio: f64,
    #[serde(default)]
    pub long_sentences: usize,
    #[serde(default)]
    pub jargon_terms: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InclusivityDetails {
    #[serde(default)]
    pub issues: Vec<BiasIssue>,
    #[serde(default)]
    pub masculine_coded: usize,
    #[serde(default)]
    pub feminine_coded: usize,
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Issues the analyzer returned in a shape that could not be read
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rejected_issues: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ComplianceDetails {
    #[serde(default)]
    pub checks_passed: usize,
    #[serde(default)]
    pub checks_total: usize,
    #[serde(default)]
    pub missing_elements: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Dimension-specific structured payload, tagged by dimension key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "dimension", rename_all = "lowercase")]
pub enum DimensionDetails {
    Readability(ReadabilityDetails),
    Completeness(CompletenessDetails),
    Clarity(ClarityDetails),
    Inclusivity(InclusivityDetails),
    Compliance(ComplianceDetails),
}

impl DimensionDetails {
    /// Payload used for a dimension that was not computed
    pub fn empty(dimension: Dimension) -> Self {
        match dimension {
            Dimension::Readability => DimensionDetails::Readability(ReadabilityDetails::default()),
            Dimension::Completeness => DimensionDetails::Completeness(CompletenessDetails::default()),
            Dimension::Clarity => DimensionDetails::Clarity(ClarityDetails::default()),
            Dimension::Inclusivity => DimensionDetails::Inclusivity(InclusivityDetails::default()),
            Dimension::Compliance => DimensionDetails::Compliance(ComplianceDetails::default()),
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            DimensionDetails::Readability(_) => Dimension::Readability,
            DimensionDetails::Completeness(_) => Dimension::Completeness,
            DimensionDetails::Clarity(_) => Dimension::Clarity,
            DimensionDetails::Inclusivity(_) => Dimension::Inclusivity,
            DimensionDetails::Compliance(_) => Dimension::Compliance,
        }
    }

    /// Improvement recommendations produced for this dimension
    pub fn recommendations(&self) -> &[String] {
        match self {
            DimensionDetails::Readability(d) => &d.recommendations,
            DimensionDetails::Completeness(d) => &d.recommendations,
            DimensionDetails::Clarity(d) => &d.recommendations,
            DimensionDetails::Inclusivity(d) => &d.recommendations,
            DimensionDetails::Compliance(d) => &d.recommendations,
        }
    }

    /// Bias issues, if this is the inclusivity payload
    pub fn bias_issues(&self) -> &[BiasIssue] {
        match self {
            DimensionDetails::Inclusivity(d) => &d.issues,
            _ => &[],
        }
    }

    /// Bias issues discarded while reading the analyzer reply
    pub fn rejected_issues(&self) -> usize {
        match self {
            DimensionDetails::Inclusivity(d) => d.rejected_issues,
            _ => 0,
        }
    }
}

/// Raw output of a dimension analyzer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DimensionReport {
    pub dimension: Dimension,
    pub score: f64,
    pub details: DimensionDetails,
}

impl DimensionReport {
    pub fn new(score: f64, details: DimensionDetails) -> Self {
        Self {
            dimension: details.dimension(),
            score,
            details,
        }
    }
}

/// A dimension as held by an aggregated assessment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DimensionScore {
    pub score: f64,
    pub weight: f64,
    pub details: DimensionDetails,
    /// False when the analyzer produced nothing and the score is a substitute
    pub computed: bool,
}
