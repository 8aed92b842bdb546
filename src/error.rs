//! Error types for loading, configuration and strict evaluation

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised outside the allocation formula itself
#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid service date '{value}' for claim {claim_id}: {source}")]
    ServiceDate {
        claim_id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("claim {claim_id}: {source}")]
    InvalidClaim {
        claim_id: String,
        #[source]
        source: ValidationError,
    },
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
