//! Deductible, coinsurance, copay and OOP max allocation

use serde::{Deserialize, Serialize};

use super::RoundingMode;
use crate::plan::CostInputs;

/// Split of a procedure's cost between patient and insurer, rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostShare {
    /// Amount the patient owes
    pub patient_cost: f64,
    /// Procedure cost minus patient cost
    pub insurance_covers: f64,
}

impl From<CostShare> for (f64, f64) {
    fn from(share: CostShare) -> Self {
        (share.patient_cost, share.insurance_covers)
    }
}

/// Unrounded intermediate values of one allocation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationBreakdown {
    pub deductible_applied: f64,
    pub remaining_cost: f64,
    pub coinsurance_amount: f64,
    /// Deductible + coinsurance + copay, before the OOP max
    pub uncapped_patient_cost: f64,
    /// Patient cost after the OOP max
    pub patient_cost: f64,
    pub insurance_covers: f64,
    /// True when the OOP max lowered the patient cost
    pub oop_cap_applied: bool,
}

impl AllocationBreakdown {
    /// Amount shifted from patient to insurer by the OOP max
    pub fn oop_excess(&self) -> f64 {
        self.uncapped_patient_cost - self.patient_cost
    }

    /// Round both outputs independently
    pub fn share(&self, rounding: RoundingMode) -> CostShare {
        CostShare {
            patient_cost: rounding.to_cents(self.patient_cost),
            insurance_covers: rounding.to_cents(self.insurance_covers),
        }
    }
}

/// Stateless allocator; only the rounding rule is configurable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostAllocator {
    rounding: RoundingMode,
}

impl CostAllocator {
    pub fn new(rounding: RoundingMode) -> Self {
        Self { rounding }
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Run the allocation without rounding
    ///
    /// Negative or out-of-range inputs flow through the formula unchanged. A
    /// negative remaining deductible is not clamped here; callers deriving it
    /// from an annual deductible clamp via [`crate::plan::remaining_deductible`].
    pub fn breakdown(&self, inputs: &CostInputs) -> AllocationBreakdown {
        // Cannot apply more deductible than the bill
        let deductible_applied = inputs.procedure_cost.min(inputs.remaining_deductible);
        let remaining_cost = inputs.procedure_cost - deductible_applied;
        let coinsurance_amount = remaining_cost * (inputs.coinsurance / 100.0);

        let uncapped_patient_cost = deductible_applied + coinsurance_amount + inputs.copay;
        let patient_cost = uncapped_patient_cost.min(inputs.oop_max);
        let insurance_covers = inputs.procedure_cost - patient_cost;

        AllocationBreakdown {
            deductible_applied,
            remaining_cost,
            coinsurance_amount,
            uncapped_patient_cost,
            patient_cost,
            insurance_covers,
            oop_cap_applied: patient_cost < uncapped_patient_cost,
        }
    }

    /// Allocate and round to cents
    pub fn allocate(&self, inputs: &CostInputs) -> CostShare {
        self.breakdown(inputs).share(self.rounding)
    }
}

/// Patient and insurance shares for one procedure, rounded half-up to cents
///
/// Returns `(patient_cost, insurance_covers)`.
pub fn compute(
    procedure_cost: f64,
    remaining_deductible: f64,
    coinsurance: f64,
    copay: f64,
    oop_max: f64,
) -> (f64, f64) {
    let inputs = CostInputs::new(procedure_cost, remaining_deductible, coinsurance, copay, oop_max);
    CostAllocator::default().allocate(&inputs).into()
}
