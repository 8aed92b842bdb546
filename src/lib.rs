//! Patient Cost - out-of-pocket cost share calculator for medical procedures
//!
//! This library provides:
//! - Deductible, coinsurance, copay and OOP max allocation between patient and insurer
//! - Remaining deductible derivation from annual deductible and amount paid
//! - Optional strict input validation and configurable rounding
//! - Claim batch loading from CSV and text/CSV/JSON reporting

pub mod allocation;
pub mod calculator;
pub mod claim;
pub mod config;
pub mod error;
pub mod plan;
pub mod report;
pub mod validation;

// Re-export commonly used types
pub use allocation::{compute, AllocationBreakdown, CostAllocator, CostShare, RoundingMode};
pub use calculator::Calculator;
pub use claim::{Claim, ClaimOutcome, ClaimResult};
pub use config::CalculatorConfig;
pub use error::CalculatorError;
pub use plan::{remaining_deductible, CostInputs, DeductibleStatus};
pub use validation::{ValidationError, ValidationMode};
