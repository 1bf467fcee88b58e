//! Applicant CSV loading for batch scoring
//!
//! Expected header:
//! `applicant_id,monthly_income,monthly_expenses,current_monthly_debt,credit_history,bad_debt_group,collateral_value,requested_loan_amount,employment_duration`
//!
//! `collateral_value` may be left empty.

use super::{ApplicantProfile, BadDebtGroup, CreditHistory, EmploymentDuration};
use crate::error::Result;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A profile tagged with the identifier it was submitted under
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantRecord {
    pub applicant_id: String,
    pub profile: ApplicantProfile,
}

#[derive(Debug, Deserialize)]
struct ApplicantRow {
    applicant_id: String,
    monthly_income: f64,
    monthly_expenses: f64,
    current_monthly_debt: f64,
    credit_history: CreditHistory,
    bad_debt_group: BadDebtGroup,
    collateral_value: Option<f64>,
    requested_loan_amount: f64,
    employment_duration: EmploymentDuration,
}

impl From<ApplicantRow> for ApplicantRecord {
    fn from(row: ApplicantRow) -> Self {
        Self {
            applicant_id: row.applicant_id,
            profile: ApplicantProfile {
                monthly_income: row.monthly_income,
                monthly_expenses: row.monthly_expenses,
                current_monthly_debt: row.current_monthly_debt,
                credit_history: row.credit_history,
                bad_debt_group: row.bad_debt_group,
                collateral_value: row.collateral_value,
                requested_loan_amount: row.requested_loan_amount,
                employment_duration: row.employment_duration,
            },
        }
    }
}

/// Read applicant records from any CSV source
pub fn load_profiles_from_reader<R: Read>(reader: R) -> Result<Vec<ApplicantRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<ApplicantRow>() {
        records.push(ApplicantRecord::from(row?));
    }

    Ok(records)
}

/// Read applicant records from a CSV file
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<Vec<ApplicantRecord>> {
    let path = path.as_ref();
    let records = load_profiles_from_reader(File::open(path)?)?;
    log::info!("loaded {} applicants from {}", records.len(), path.display());
    Ok(records)
}
