//! The five scalar plan parameters for one procedure

use serde::{Deserialize, Serialize};

/// Portion of the annual deductible not yet satisfied
///
/// Paying more than the deductible never produces a negative remainder.
pub fn remaining_deductible(annual_deductible: f64, paid_so_far: f64) -> f64 {
    (annual_deductible - paid_so_far).max(0.0)
}

/// Annual deductible and the amount already paid toward it, as entered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeductibleStatus {
    pub annual_deductible: f64,
    pub paid_so_far: f64,
}

impl DeductibleStatus {
    pub fn new(annual_deductible: f64, paid_so_far: f64) -> Self {
        Self {
            annual_deductible,
            paid_so_far,
        }
    }

    pub fn remaining(&self) -> f64 {
        remaining_deductible(self.annual_deductible, self.paid_so_far)
    }

    pub fn fields(&self) -> [(&'static str, f64); 2] {
        [
            ("annual_deductible", self.annual_deductible),
            ("paid_so_far", self.paid_so_far),
        ]
    }
}

/// Inputs to one cost allocation, in a fixed currency unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostInputs {
    /// Total billed amount for the procedure
    pub procedure_cost: f64,

    /// Deductible still owed for the coverage period
    pub remaining_deductible: f64,

    /// Coinsurance percentage (nominally 0-100)
    pub coinsurance: f64,

    /// Fixed fee charged per procedure
    pub copay: f64,

    /// Out-of-pocket maximum for the coverage period
    pub oop_max: f64,
}

impl CostInputs {
    pub fn new(
        procedure_cost: f64,
        remaining_deductible: f64,
        coinsurance: f64,
        copay: f64,
        oop_max: f64,
    ) -> Self {
        Self {
            procedure_cost,
            remaining_deductible,
            coinsurance,
            copay,
            oop_max,
        }
    }

    /// Build inputs from an annual deductible and the amount already paid toward it
    pub fn from_plan(
        procedure_cost: f64,
        annual_deductible: f64,
        paid_so_far: f64,
        coinsurance: f64,
        copay: f64,
        oop_max: f64,
    ) -> Self {
        Self::new(
            procedure_cost,
            remaining_deductible(annual_deductible, paid_so_far),
            coinsurance,
            copay,
            oop_max,
        )
    }

    /// Build inputs from a recorded deductible status
    pub fn with_deductible_status(
        procedure_cost: f64,
        status: &DeductibleStatus,
        coinsurance: f64,
        copay: f64,
        oop_max: f64,
    ) -> Self {
        Self::new(procedure_cost, status.remaining(), coinsurance, copay, oop_max)
    }

    /// Named monetary and percentage fields, in declaration order
    pub fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("procedure_cost", self.procedure_cost),
            ("remaining_deductible", self.remaining_deductible),
            ("coinsurance", self.coinsurance),
            ("copay", self.copay),
            ("oop_max", self.oop_max),
        ]
    }
}
