//! Load claims from a CSV file
//!
//! Expected header:
//! `ClaimID,PatientName,Procedure,ServiceDate,ProcedureCost,AnnualDeductible,PaidSoFar,Coinsurance,Copay,OOPMax`
//!
//! `ServiceDate` is ISO `YYYY-MM-DD` and may be left empty.

use chrono::NaiveDate;
use csv::Reader;
use std::path::Path;

use super::Claim;
use crate::error::{CalculatorError, Result};
use crate::plan::DeductibleStatus;

/// Raw CSV row matching the claims file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ClaimID")]
    claim_id: String,
    #[serde(rename = "PatientName")]
    patient_name: String,
    #[serde(rename = "Procedure")]
    procedure: String,
    #[serde(rename = "ServiceDate", default)]
    service_date: String,
    #[serde(rename = "ProcedureCost")]
    procedure_cost: f64,
    #[serde(rename = "AnnualDeductible")]
    annual_deductible: f64,
    #[serde(rename = "PaidSoFar")]
    paid_so_far: f64,
    #[serde(rename = "Coinsurance")]
    coinsurance: f64,
    #[serde(rename = "Copay")]
    copay: f64,
    #[serde(rename = "OOPMax")]
    oop_max: f64,
}

impl CsvRow {
    fn to_claim(self) -> Result<Claim> {
        let service_date = match self.service_date.trim() {
            "" => None,
            value => Some(NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| {
                CalculatorError::ServiceDate {
                    claim_id: self.claim_id.clone(),
                    value: value.to_string(),
                    source,
                }
            })?),
        };

        let deductible = DeductibleStatus::new(self.annual_deductible, self.paid_so_far);
        let claim = Claim::from_deductible_status(
            self.claim_id,
            self.patient_name,
            self.procedure,
            deductible,
            self.procedure_cost,
            self.coinsurance,
            self.copay,
            self.oop_max,
        );

        Ok(Claim {
            service_date,
            ..claim
        })
    }
}

/// Load all claims from a CSV file
pub fn load_claims<P: AsRef<Path>>(path: P) -> Result<Vec<Claim>> {
    let reader = Reader::from_path(path)?;
    collect_claims(reader)
}

/// Load claims from any reader (e.g., string buffer, stdin)
pub fn load_claims_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Claim>> {
    collect_claims(Reader::from_reader(reader))
}

fn collect_claims<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Claim>> {
    let mut claims = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        claims.push(row.to_claim()?);
    }

    log::debug!("Loaded {} claims", claims.len());
    Ok(claims)
}
