//! Error types for job description quality analysis

use thiserror::Error;

use crate::dimension::Dimension;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the quality pipeline and its collaborators
#[derive(Error, Debug)]
pub enum Error {
    #[error("Score {score} for {dimension} is outside [0, 100]")]
    InvalidScoreRange { dimension: Dimension, score: f64 },

    #[error("Report for {expected} carries {found} details")]
    DimensionMismatch { expected: Dimension, found: Dimension },

    #[error("Dimension {0} reported more than once")]
    DuplicateDimension(Dimension),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Analyzer error: {0}")]
    Analyzer(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
