//! Error types for the scoring and comparison engine
//!
//! Business outcomes (an ineligible applicant, an excluded lender) are never
//! errors. Only malformed input and failed configuration loads end up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A numeric field failed boundary validation (negative, NaN, infinite, zero where positive is required)
    #[error("invalid input '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Scoring assumptions are inconsistent (non-monotonic bands, points above factor weight, ...)
    #[error("invalid scoring assumptions: {0}")]
    InvalidAssumptions(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
