//! Plan parameters feeding a single cost-share calculation

mod inputs;

pub use inputs::{CostInputs, DeductibleStatus, remaining_deductible};
