//! Optional input validation
//!
//! The allocation formula accepts any finite input and never fails. Strict mode
//! is a behavior change on top of it: inputs that would produce semantically
//! invalid shares (negative amounts, coinsurance outside 0-100%) are rejected
//! before allocation instead of flowing through.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plan::{CostInputs, DeductibleStatus};

/// Whether inputs are checked before allocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Trust the caller and compute whatever the formula yields
    #[default]
    Unchecked,
    /// Reject non-finite, negative, or out-of-range inputs
    Strict,
}

/// Input rejected by strict validation
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("coinsurance must be between 0 and 100 percent, got {0}")]
    CoinsuranceOutOfRange(f64),
}

fn check_amounts(fields: &[(&'static str, f64)]) -> Result<(), ValidationError> {
    for &(field, value) in fields {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field, value });
        }
        if value < 0.0 {
            return Err(ValidationError::Negative { field, value });
        }
    }
    Ok(())
}

/// Check every field, reporting the first failure in field order
pub fn validate(inputs: &CostInputs) -> Result<(), ValidationError> {
    check_amounts(&inputs.fields())?;

    if inputs.coinsurance > 100.0 {
        return Err(ValidationError::CoinsuranceOutOfRange(inputs.coinsurance));
    }

    Ok(())
}

/// Check the raw deductible amounts before they are reduced to a remainder
///
/// A negative amount paid would otherwise inflate the remaining deductible
/// past the annual deductible, and a negative deductible would clamp to zero.
pub fn validate_deductible_status(status: &DeductibleStatus) -> Result<(), ValidationError> {
    check_amounts(&status.fields())
}

impl ValidationMode {
    /// Apply this mode to a set of inputs
    pub fn check(self, inputs: &CostInputs) -> Result<(), ValidationError> {
        match self {
            ValidationMode::Unchecked => Ok(()),
            ValidationMode::Strict => validate(inputs),
        }
    }

    pub fn check_deductible(self, status: &DeductibleStatus) -> Result<(), ValidationError> {
        match self {
            ValidationMode::Unchecked => Ok(()),
            ValidationMode::Strict => validate_deductible_status(status),
        }
    }
}
