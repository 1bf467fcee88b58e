//! Applicant profile as collected by the eligibility survey

use crate::error::Result;
use crate::numeric::{require_amount, require_positive};
use serde::{Deserialize, Serialize};

/// Self-declared credit history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditHistory {
    Good,
    Bad,
    /// No borrowing history at all
    None,
    Unknown,
}

/// Bad-debt classification reported by the credit bureau
///
/// Group 1 is current; groups 2 to 5 are overdue, substandard, doubtful
/// and loss respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadDebtGroup {
    None,
    Group1,
    Group2,
    Group3,
    Group4,
    Group5,
}

impl BadDebtGroup {
    /// Groups 2 to 5 reject the application outright
    pub fn is_disqualifying(&self) -> bool {
        matches!(
            self,
            BadDebtGroup::Group2 | BadDebtGroup::Group3 | BadDebtGroup::Group4 | BadDebtGroup::Group5
        )
    }

    /// Bureau group number (0 when no bad debt is recorded)
    pub fn group_number(&self) -> u8 {
        match self {
            BadDebtGroup::None => 0,
            BadDebtGroup::Group1 => 1,
            BadDebtGroup::Group2 => 2,
            BadDebtGroup::Group3 => 3,
            BadDebtGroup::Group4 => 4,
            BadDebtGroup::Group5 => 5,
        }
    }
}

/// How long the applicant has been with the current employer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentDuration {
    #[serde(rename = "lt1y")]
    LessThanOneYear,
    #[serde(rename = "1to3y")]
    OneToThreeYears,
    #[serde(rename = "3to5y")]
    ThreeToFiveYears,
    #[serde(rename = "gt5y")]
    MoreThanFiveYears,
}

impl EmploymentDuration {
    /// Code used in CSV and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentDuration::LessThanOneYear => "lt1y",
            EmploymentDuration::OneToThreeYears => "1to3y",
            EmploymentDuration::ThreeToFiveYears => "3to5y",
            EmploymentDuration::MoreThanFiveYears => "gt5y",
        }
    }
}

/// Completed survey answers, built once and passed by reference to the scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    /// Net monthly income
    pub monthly_income: f64,

    /// Monthly living expenses
    pub monthly_expenses: f64,

    /// Repayments already owed each month on other loans
    pub current_monthly_debt: f64,

    pub credit_history: CreditHistory,

    pub bad_debt_group: BadDebtGroup,

    /// Market value of pledged collateral, if any
    #[serde(default)]
    pub collateral_value: Option<f64>,

    /// Amount the applicant wants to borrow
    pub requested_loan_amount: f64,

    pub employment_duration: EmploymentDuration,
}

impl ApplicantProfile {
    /// Boundary validation of the numeric fields
    ///
    /// The scorer itself never fails; callers that want to reject malformed
    /// input before scoring run this first.
    pub fn validate(&self) -> Result<()> {
        require_amount("monthly_income", self.monthly_income)?;
        require_amount("monthly_expenses", self.monthly_expenses)?;
        require_amount("current_monthly_debt", self.current_monthly_debt)?;
        if let Some(collateral) = self.collateral_value {
            require_amount("collateral_value", collateral)?;
        }
        require_positive("requested_loan_amount", self.requested_loan_amount)?;
        Ok(())
    }

    /// Total monthly outgoings used by the debt-service ratio
    pub fn monthly_obligations(&self) -> f64 {
        self.monthly_expenses + self.current_monthly_debt
    }
}
