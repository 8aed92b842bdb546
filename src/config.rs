//! Calculator configuration
//!
//! Loaded from JSON, every field optional:
//!
//! ```json
//! { "validation": "strict", "rounding": "half_even" }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::allocation::RoundingMode;
use crate::error::Result;
use crate::validation::ValidationMode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Unchecked by default, matching the raw formula
    pub validation: ValidationMode,

    /// Tie-breaking rule for rounding to cents
    pub rounding: RoundingMode,
}

impl CalculatorConfig {
    /// Config that rejects invalid inputs before allocation
    pub fn strict() -> Self {
        Self {
            validation: ValidationMode::Strict,
            ..Default::default()
        }
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Apply command-line switches on top of a loaded config
    ///
    /// Switches only tighten: an unset flag keeps the file's setting.
    pub fn with_overrides(self, strict: bool, half_even: bool) -> Self {
        let mut config = self;
        if strict {
            config = config.with_validation(ValidationMode::Strict);
        }
        if half_even {
            config = config.with_rounding(RoundingMode::HalfEven);
        }
        config
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
