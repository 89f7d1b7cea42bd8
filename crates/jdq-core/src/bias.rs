//! Inclusive-language issue types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a flagged span
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BiasType {
    Gender,
    Age,
    Disability,
    Cultural,
    #[serde(alias = "gender_coded_masculine", alias = "masculine")]
    GenderCodedMasculine,
    #[serde(alias = "gender_coded_feminine", alias = "feminine")]
    GenderCodedFeminine,
}

impl BiasType {
    pub fn label(&self) -> &'static str {
        match self {
            BiasType::Gender => "gender",
            BiasType::Age => "age",
            BiasType::Disability => "disability",
            BiasType::Cultural => "cultural",
            BiasType::GenderCodedMasculine => "gender-coded-masculine",
            BiasType::GenderCodedFeminine => "gender-coded-feminine",
        }
    }
}

impl fmt::Display for BiasType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Issue severity. Ordered `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A flagged span of text suspected of non-inclusive language.
///
/// Offsets are half-open character offsets into the analyzed text. They come
/// from an analyzer and are not trusted; see [`crate::highlight::map_highlights`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BiasIssue {
    #[serde(rename = "type")]
    pub bias_type: BiasType,
    pub severity: Severity,
    pub problematic_text: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub suggested_alternatives: Vec<String>,
    pub start_index: i64,
    pub end_index: i64,
}
