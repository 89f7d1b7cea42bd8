//! Scoring policy configuration
//!
//! Weights and thresholds are product policy, not derived constants. They are
//! read from configuration and validated once; the pipeline never hard-codes them.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

use crate::assessment::QualityLevel;
use crate::dimension::Dimension;
use crate::{Error, Result};

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Relative importance of each dimension. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DimensionWeights {
    pub readability: f64,
    pub completeness: f64,
    pub clarity: f64,
    pub inclusivity: f64,
    pub compliance: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            readability: 0.25,
            completeness: 0.25,
            clarity: 0.20,
            inclusivity: 0.20,
            compliance: 0.10,
        }
    }
}

impl DimensionWeights {
    pub fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Readability => self.readability,
            Dimension::Completeness => self.completeness,
            Dimension::Clarity => self.clarity,
            Dimension::Inclusivity => self.inclusivity,
            Dimension::Compliance => self.compliance,
        }
    }

    pub fn set(&mut self, dimension: Dimension, weight: f64) {
        match dimension {
            Dimension::Readability => self.readability = weight,
            Dimension::Completeness => self.completeness = weight,
            Dimension::Clarity => self.clarity = weight,
            Dimension::Inclusivity => self.inclusivity = weight,
            Dimension::Compliance => self.compliance = weight,
        }
    }

    pub fn total(&self) -> f64 {
        Dimension::ALL.iter().map(|d| self.weight(*d)).sum()
    }
}

/// Inclusive lower bounds of each quality level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QualityThresholds {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            excellent: 90.0,
            good: 75.0,
            fair: 60.0,
        }
    }
}

impl QualityThresholds {
    /// Map an overall score to its level
    pub fn level_for(&self, score: f64) -> QualityLevel {
        if score >= self.excellent {
            QualityLevel::Excellent
        } else if score >= self.good {
            QualityLevel::Good
        } else if score >= self.fair {
            QualityLevel::Fair
        } else {
            QualityLevel::NeedsImprovement
        }
    }
}

/// Configuration for the quality pipeline and analysis sessions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QualityConfig {
    pub weights: DimensionWeights,
    pub thresholds: QualityThresholds,
    /// Dimensions scoring below this are listed in the improvement priority
    pub adequate_threshold: f64,
    /// Maximum number of recommendations shown
    pub recommendation_cap: usize,
    pub debounce_ms: u64,
    pub analyzer_timeout_secs: u64,
    /// Reading grade the readability analyzer aims for
    pub target_grade_level: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            weights: DimensionWeights::default(),
            thresholds: QualityThresholds::default(),
            adequate_threshold: 75.0,
            recommendation_cap: 5,
            debounce_ms: 1000,
            analyzer_timeout_secs: 30,
            target_grade_level: 8.0,
        }
    }
}

impl QualityConfig {
    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from defaults overridden by environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `JDQ_*` environment overrides on top of the current values
    pub fn apply_env(&mut self) -> Result<()> {
        for dimension in Dimension::ALL {
            let name = format!("JDQ_WEIGHT_{}", dimension.key().to_uppercase());
            if let Some(weight) = env_parse::<f64>(&name)? {
                self.weights.set(dimension, weight);
            }
        }
        if let Some(ms) = env_parse::<u64>("JDQ_DEBOUNCE_MS")? {
            self.debounce_ms = ms;
        }
        if let Some(secs) = env_parse::<u64>("JDQ_ANALYZER_TIMEOUT_SECS")? {
            self.analyzer_timeout_secs = secs;
        }
        if let Some(cap) = env_parse::<usize>("JDQ_RECOMMENDATION_CAP")? {
            self.recommendation_cap = cap;
        }
        if let Some(grade) = env_parse::<f64>("JDQ_TARGET_GRADE_LEVEL")? {
            self.target_grade_level = grade;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for dimension in Dimension::ALL {
            let weight = self.weights.weight(dimension);
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::Configuration(format!(
                    "Weight for {} must be a non-negative number, got {}",
                    dimension, weight
                )));
            }
        }

        let total = self.weights.total();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(Error::Configuration(format!(
                "Dimension weights must sum to 1.0, got {}",
                total
            )));
        }

        let t = &self.thresholds;
        let ordered = t.excellent <= 100.0 && t.excellent > t.good && t.good > t.fair && t.fair >= 0.0;
        if !ordered {
            return Err(Error::Configuration(format!(
                "Thresholds must satisfy 100 >= excellent > good > fair >= 0, got {}/{}/{}",
                t.excellent, t.good, t.fair
            )));
        }

        if !(0.0..=100.0).contains(&self.adequate_threshold) {
            return Err(Error::Configuration(format!(
                "Adequate threshold must be within [0, 100], got {}",
                self.adequate_threshold
            )));
        }

        if self.recommendation_cap == 0 {
            return Err(Error::Configuration(
                "Recommendation cap must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn analyzer_timeout(&self) -> Duration {
        Duration::from_secs(self.analyzer_timeout_secs)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Configuration(format!("{} has an invalid value: {}", name, raw))),
        Err(_) => Ok(None),
    }
}
