//! Comparison inputs: the loan being shopped for and the requested ordering

use super::amortization::term_periods;
use crate::error::Result;
use crate::lenders::ProductType;
use crate::numeric::require_positive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Loan parameters supplied by the borrower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanQuery {
    pub principal: f64,

    pub term_years: u32,

    pub product: ProductType,

    /// Lenders to compare; empty means every lender offering the product
    #[serde(default)]
    pub lender_ids: BTreeSet<String>,
}

impl LoanQuery {
    pub fn new(principal: f64, term_years: u32, product: ProductType) -> Self {
        Self {
            principal,
            term_years,
            product,
            lender_ids: BTreeSet::new(),
        }
    }

    /// Restrict the comparison to the given lenders
    pub fn with_lenders<I, S>(mut self, lender_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lender_ids = lender_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Number of monthly instalments
    pub fn periods(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }

    pub fn includes_lender(&self, lender_id: &str) -> bool {
        self.lender_ids.is_empty() || self.lender_ids.contains(lender_id)
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("principal", self.principal)?;
        term_periods(self.term_years)?;
        Ok(())
    }
}

/// Field a comparison is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    InterestRate,
    MonthlyPayment,
    TotalInterest,
    TotalPayment,
    ProcessingFee,
    TotalCost,
    ApprovalDays,
    Rating,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "interest_rate" | "rate" => Ok(SortKey::InterestRate),
            "monthly_payment" | "payment" => Ok(SortKey::MonthlyPayment),
            "total_interest" => Ok(SortKey::TotalInterest),
            "total_payment" => Ok(SortKey::TotalPayment),
            "processing_fee" | "fee" => Ok(SortKey::ProcessingFee),
            "total_cost" | "cost" => Ok(SortKey::TotalCost),
            "approval_days" => Ok(SortKey::ApprovalDays),
            "rating" => Ok(SortKey::Rating),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Sort key plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::ascending(SortKey::InterestRate)
    }
}
