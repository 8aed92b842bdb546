//! Claim and result structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::allocation::CostShare;
use crate::plan::{CostInputs, DeductibleStatus};

/// One procedure claim with the patient details shown alongside its result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_id: String,
    pub patient_name: String,
    /// Free-text procedure description or code
    pub procedure: String,
    pub service_date: Option<NaiveDate>,
    pub inputs: CostInputs,
    /// Deductible as entered, when the remainder was derived from it
    #[serde(default)]
    pub deductible: Option<DeductibleStatus>,
}

impl Claim {
    pub fn new(
        claim_id: impl Into<String>,
        patient_name: impl Into<String>,
        procedure: impl Into<String>,
        inputs: CostInputs,
    ) -> Self {
        Self {
            claim_id: claim_id.into(),
            patient_name: patient_name.into(),
            procedure: procedure.into(),
            service_date: None,
            inputs,
            deductible: None,
        }
    }

    /// Claim whose remaining deductible is derived from `deductible`
    pub fn from_deductible_status(
        claim_id: impl Into<String>,
        patient_name: impl Into<String>,
        procedure: impl Into<String>,
        deductible: DeductibleStatus,
        procedure_cost: f64,
        coinsurance: f64,
        copay: f64,
        oop_max: f64,
    ) -> Self {
        let inputs = CostInputs::with_deductible_status(
            procedure_cost,
            &deductible,
            coinsurance,
            copay,
            oop_max,
        );
        Self {
            deductible: Some(deductible),
            ..Self::new(claim_id, patient_name, procedure, inputs)
        }
    }

    pub fn with_service_date(mut self, date: NaiveDate) -> Self {
        self.service_date = Some(date);
        self
    }
}

/// A claim together with its computed cost share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimResult {
    pub claim: Claim,
    pub share: CostShare,
}

/// Per-claim outcome of a batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClaimOutcome {
    Evaluated(ClaimResult),
    Rejected { claim_id: String, reason: String },
}

impl ClaimOutcome {
    pub fn claim_id(&self) -> &str {
        match self {
            ClaimOutcome::Evaluated(result) => &result.claim.claim_id,
            ClaimOutcome::Rejected { claim_id, .. } => claim_id,
        }
    }

    pub fn is_evaluated(&self) -> bool {
        matches!(self, ClaimOutcome::Evaluated(_))
    }
}
