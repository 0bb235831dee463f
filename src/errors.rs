use std::result::Result as StdResult;

use thiserror::Error;

/// Error type shared by every stage of the feasibility engine.
#[derive(Debug, Error)]
pub enum FeasibilityError {
    #[error("Invalid zoning parameters: {0}")]
    InvalidZoningParameters(String),
    #[error("Invalid area: {0}")]
    InvalidArea(String),
    #[error("Invalid timeline input: {0}")]
    InvalidTimelineInput(String),
    #[error("Invalid cost input: {0}")]
    InvalidCost(String),
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Arithmetic anomaly: {0}")]
    ArithmeticAnomaly(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Coarse classification of [`FeasibilityError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InputValidation,
    Configuration,
    ArithmeticAnomaly,
    Storage,
}

impl FeasibilityError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FeasibilityError::InvalidZoningParameters(_)
            | FeasibilityError::InvalidArea(_)
            | FeasibilityError::InvalidTimelineInput(_)
            | FeasibilityError::InvalidCost(_)
            | FeasibilityError::InvalidScenario(_) => ErrorCategory::InputValidation,
            FeasibilityError::Configuration(_) => ErrorCategory::Configuration,
            FeasibilityError::ArithmeticAnomaly(_) => ErrorCategory::ArithmeticAnomaly,
            FeasibilityError::Io(_) | FeasibilityError::Serde(_) => ErrorCategory::Storage,
        }
    }
}

pub type Result<T> = StdResult<T, FeasibilityError>;
