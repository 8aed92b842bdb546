//! Rendering of cost shares for display and export

use serde::Serialize;
use std::io::Write;

use crate::allocation::AllocationBreakdown;
use crate::claim::{ClaimOutcome, ClaimResult};
use crate::error::Result;

/// Format a dollar amount with thousands separators, e.g. `$1,234.56` or `-$50.00`
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    let digits = (cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Claim details followed by the two shares
pub fn render_claim(result: &ClaimResult) -> String {
    let claim = &result.claim;
    let date = claim
        .service_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "Claim {} | {} | {} | {}\n  Procedure Cost: {}\n  Patient Pays: {}\n  Insurance Covers: {}",
        claim.claim_id,
        claim.patient_name,
        claim.procedure,
        date,
        format_currency(claim.inputs.procedure_cost),
        format_currency(result.share.patient_cost),
        format_currency(result.share.insurance_covers),
    )
}

/// Step-by-step allocation lines
pub fn render_breakdown(breakdown: &AllocationBreakdown) -> String {
    let mut lines = vec![
        format!("  Deductible Applied: {}", format_currency(breakdown.deductible_applied)),
        format!("  Remaining After Deductible: {}", format_currency(breakdown.remaining_cost)),
        format!("  Coinsurance Amount: {}", format_currency(breakdown.coinsurance_amount)),
        format!("  Total Before OOP Max: {}", format_currency(breakdown.uncapped_patient_cost)),
    ];
    if breakdown.oop_cap_applied {
        lines.push(format!(
            "  OOP Max Reached: {} shifted to insurance",
            format_currency(breakdown.oop_excess())
        ));
    }
    lines.join("\n")
}

pub fn render_outcome(outcome: &ClaimOutcome) -> String {
    match outcome {
        ClaimOutcome::Evaluated(result) => render_claim(result),
        ClaimOutcome::Rejected { claim_id, reason } => {
            format!("Claim {} rejected: {}", claim_id, reason)
        }
    }
}

/// Flat CSV row for batch export
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    #[serde(rename = "ClaimID")]
    claim_id: &'a str,
    #[serde(rename = "PatientName")]
    patient_name: &'a str,
    #[serde(rename = "Procedure")]
    procedure: &'a str,
    #[serde(rename = "ServiceDate")]
    service_date: String,
    #[serde(rename = "ProcedureCost")]
    procedure_cost: String,
    #[serde(rename = "PatientCost")]
    patient_cost: String,
    #[serde(rename = "InsuranceCovers")]
    insurance_covers: String,
    #[serde(rename = "Status")]
    status: &'a str,
    #[serde(rename = "Reason")]
    reason: &'a str,
}

impl<'a> ReportRow<'a> {
    fn from_outcome(outcome: &'a ClaimOutcome) -> Self {
        match outcome {
            ClaimOutcome::Evaluated(result) => Self {
                claim_id: &result.claim.claim_id,
                patient_name: &result.claim.patient_name,
                procedure: &result.claim.procedure,
                service_date: result
                    .claim
                    .service_date
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
                procedure_cost: format!("{:.2}", result.claim.inputs.procedure_cost),
                patient_cost: format!("{:.2}", result.share.patient_cost),
                insurance_covers: format!("{:.2}", result.share.insurance_covers),
                status: "evaluated",
                reason: "",
            },
            ClaimOutcome::Rejected { claim_id, reason } => Self {
                claim_id,
                patient_name: "",
                procedure: "",
                service_date: String::new(),
                procedure_cost: String::new(),
                patient_cost: String::new(),
                insurance_covers: String::new(),
                status: "rejected",
                reason,
            },
        }
    }
}

/// Write batch outcomes as CSV with a header row
pub fn write_csv<W: Write>(outcomes: &[ClaimOutcome], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for outcome in outcomes {
        csv_writer.serialize(ReportRow::from_outcome(outcome))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn to_json(outcomes: &[ClaimOutcome]) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcomes)?)
}
