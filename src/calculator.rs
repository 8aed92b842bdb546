//! Configured calculator for single claims and claim batches
//!
//! Wraps the pure allocator with the configured validation mode and rounding
//! rule. Batches are evaluated in parallel; each claim is independent.

use rayon::prelude::*;

use crate::allocation::{AllocationBreakdown, CostAllocator, CostShare};
use crate::claim::{Claim, ClaimOutcome, ClaimResult};
use crate::config::CalculatorConfig;
use crate::error::{CalculatorError, Result};
use crate::plan::CostInputs;
use crate::validation::ValidationError;

/// Calculator bound to one configuration
///
/// # Example
/// ```
/// use patient_cost::{Calculator, CalculatorConfig, CostInputs};
///
/// let calculator = Calculator::new(CalculatorConfig::default());
/// let share = calculator.evaluate(&CostInputs::new(1000.0, 500.0, 20.0, 0.0, 10_000.0)).unwrap();
/// assert_eq!(share.patient_cost, 600.0);
/// assert_eq!(share.insurance_covers, 400.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator {
    config: CalculatorConfig,
    allocator: CostAllocator,
}

impl Calculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            config,
            allocator: CostAllocator::new(config.rounding),
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Unrounded allocation, after validation
    pub fn breakdown(&self, inputs: &CostInputs) -> std::result::Result<AllocationBreakdown, ValidationError> {
        self.config.validation.check(inputs)?;
        let breakdown = self.allocator.breakdown(inputs);

        log::debug!(
            "deductible={:.2} remaining={:.2} coinsurance={:.2} uncapped={:.2} capped={}",
            breakdown.deductible_applied,
            breakdown.remaining_cost,
            breakdown.coinsurance_amount,
            breakdown.uncapped_patient_cost,
            breakdown.oop_cap_applied,
        );

        if breakdown.insurance_covers < 0.0 || breakdown.patient_cost < 0.0 {
            log::warn!(
                "Unvalidated inputs produced a negative share: patient={:.2} insurance={:.2}",
                breakdown.patient_cost,
                breakdown.insurance_covers,
            );
        }

        Ok(breakdown)
    }

    /// Patient and insurance shares for one set of inputs
    ///
    /// Only fails in strict validation mode.
    pub fn evaluate(&self, inputs: &CostInputs) -> std::result::Result<CostShare, ValidationError> {
        Ok(self.breakdown(inputs)?.share(self.allocator.rounding()))
    }

    /// Validate the claim's deductible as entered, then evaluate its inputs
    fn evaluate_claim_inputs(&self, claim: &Claim) -> std::result::Result<CostShare, ValidationError> {
        if let Some(deductible) = &claim.deductible {
            self.config.validation.check_deductible(deductible)?;
        }
        self.evaluate(&claim.inputs)
    }

    pub fn evaluate_claim(&self, claim: &Claim) -> Result<ClaimResult> {
        let share = self
            .evaluate_claim_inputs(claim)
            .map_err(|source| CalculatorError::InvalidClaim {
                claim_id: claim.claim_id.clone(),
                source,
            })?;

        Ok(ClaimResult {
            claim: claim.clone(),
            share,
        })
    }

    /// Evaluate every claim; rejected claims do not stop the batch
    ///
    /// Outcomes are returned in input order.
    pub fn run_batch(&self, claims: &[Claim]) -> Vec<ClaimOutcome> {
        let outcomes: Vec<ClaimOutcome> = claims
            .par_iter()
            .map(|claim| match self.evaluate_claim_inputs(claim) {
                Ok(share) => ClaimOutcome::Evaluated(ClaimResult {
                    claim: claim.clone(),
                    share,
                }),
                Err(err) => ClaimOutcome::Rejected {
                    claim_id: claim.claim_id.clone(),
                    reason: err.to_string(),
                },
            })
            .collect();

        let rejected = outcomes.iter().filter(|o| !o.is_evaluated()).count();
        log::info!(
            "Evaluated {} claims ({} rejected)",
            outcomes.len() - rejected,
            rejected
        );

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::RoundingMode;
    use crate::claim::load_claims_from_reader;
    use crate::plan::DeductibleStatus;
    use crate::validation::ValidationMode;

    fn claim(id: &str, inputs: CostInputs) -> Claim {
        Claim::new(id, "Jane Doe", "Office visit", inputs)
    }

    #[test]
    fn test_unchecked_computes_invalid_inputs() {
        let calculator = Calculator::default();
        let share = calculator
            .evaluate(&CostInputs::new(1000.0, 0.0, 120.0, 0.0, 10_000.0))
            .unwrap();
        assert_eq!(share.patient_cost, 1200.0);
        assert_eq!(share.insurance_covers, -200.0);
    }

    #[test]
    fn test_strict_rejects_invalid_inputs() {
        let calculator = Calculator::new(CalculatorConfig::strict());
        let err = calculator
            .evaluate(&CostInputs::new(1000.0, 0.0, 120.0, 0.0, 10_000.0))
            .unwrap_err();
        assert_eq!(err, ValidationError::CoinsuranceOutOfRange(120.0));

        let err = calculator
            .evaluate(&CostInputs::new(1000.0, 0.0, 20.0, -5.0, 10_000.0))
            .unwrap_err();
        assert!(matches!(err, ValidationError::Negative { field: "copay", .. }));
    }

    #[test]
    fn test_strict_still_allows_zero_cost_copay() {
        // All inputs are in range, so strict mode keeps the negative insurer share
        let calculator = Calculator::new(CalculatorConfig::strict());
        let share = calculator
            .evaluate(&CostInputs::new(0.0, 500.0, 20.0, 50.0, 800.0))
            .unwrap();
        assert_eq!(share.patient_cost, 50.0);
        assert_eq!(share.insurance_covers, -50.0);
    }

    #[test]
    fn test_config_rounding_is_used() {
        let inputs = CostInputs::new(0.25, 0.0, 50.0, 0.0, 100.0);
        let even = Calculator::new(CalculatorConfig::default().with_rounding(RoundingMode::HalfEven));
        assert_eq!(even.evaluate(&inputs).unwrap().patient_cost, 0.12);
        assert_eq!(Calculator::default().evaluate(&inputs).unwrap().patient_cost, 0.13);
    }

    #[test]
    fn test_evaluate_claim_error_names_claim() {
        let calculator = Calculator::new(CalculatorConfig::strict());
        let err = calculator
            .evaluate_claim(&claim("C-9", CostInputs::new(-1.0, 0.0, 20.0, 0.0, 100.0)))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "claim C-9: procedure_cost must not be negative, got -1"
        );
    }

    #[test]
    fn test_run_batch_keeps_order_and_continues() {
        let claims = vec![
            claim("A", CostInputs::new(1000.0, 500.0, 20.0, 0.0, 10_000.0)),
            claim("B", CostInputs::new(250.0, 0.0, 120.0, 0.0, 5000.0)),
            claim("C", CostInputs::new(5000.0, 500.0, 20.0, 50.0, 800.0)),
        ];
        let calculator =
            Calculator::new(CalculatorConfig::default().with_validation(ValidationMode::Strict));
        let outcomes = calculator.run_batch(&claims);

        let ids: Vec<_> = outcomes.iter().map(|o| o.claim_id()).collect();
        assert_eq!(ids, ["A", "B", "C"]);

        match &outcomes[1] {
            ClaimOutcome::Rejected { reason, .. } => {
                assert_eq!(reason, "coinsurance must be between 0 and 100 percent, got 120");
            }
            other => panic!("expected rejection, got {other:?}"),
        }

        match &outcomes[2] {
            ClaimOutcome::Evaluated(result) => {
                assert_eq!(result.share.patient_cost, 800.0);
                assert_eq!(result.share.insurance_covers, 4200.0);
            }
            other => panic!("expected evaluation, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_batch_rejects_negative_deductible_amounts() {
        let data = "ClaimID,PatientName,Procedure,ServiceDate,ProcedureCost,AnnualDeductible,PaidSoFar,Coinsurance,Copay,OOPMax\n\
                    P-1,Jane Doe,Knee MRI,,1000,1000,-500,20,0,10000\n\
                    P-2,John Roe,X-ray,,1000,-300,0,20,0,10000\n\
                    P-3,Sam Lee,Lab panel,,1000,1500,1000,20,0,10000\n";
        let claims = load_claims_from_reader(data.as_bytes()).unwrap();
        let outcomes = Calculator::new(CalculatorConfig::strict()).run_batch(&claims);

        assert_eq!(
            outcomes[0],
            ClaimOutcome::Rejected {
                claim_id: "P-1".to_string(),
                reason: "paid_so_far must not be negative, got -500".to_string(),
            }
        );
        assert_eq!(
            outcomes[1],
            ClaimOutcome::Rejected {
                claim_id: "P-2".to_string(),
                reason: "annual_deductible must not be negative, got -300".to_string(),
            }
        );
        assert!(outcomes[2].is_evaluated());
    }

    #[test]
    fn test_unchecked_claim_uses_inflated_remainder() {
        // Negative amount paid raises the remainder above the annual deductible
        let claim = Claim::from_deductible_status(
            "P-1",
            "Jane Doe",
            "Knee MRI",
            DeductibleStatus::new(1000.0, -500.0),
            1000.0,
            20.0,
            0.0,
            10_000.0,
        );
        let result = Calculator::default().evaluate_claim(&claim).unwrap();
        assert_eq!(result.claim.inputs.remaining_deductible, 1500.0);
        assert_eq!(result.share.patient_cost, 1000.0);

        let err = Calculator::new(CalculatorConfig::strict())
            .evaluate_claim(&claim)
            .unwrap_err();
        assert_eq!(err.to_string(), "claim P-1: paid_so_far must not be negative, got -500");
    }
}
