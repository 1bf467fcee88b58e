//! Lender rate cards: one published offer per lender and product

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Loan product families offered in the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Home,
    Car,
    Business,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Home => "home",
            ProductType::Car => "car",
            ProductType::Business => "business",
        }
    }
}

impl std::str::FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(ProductType::Home),
            "car" => Ok(ProductType::Car),
            "business" => Ok(ProductType::Business),
            other => Err(format!("unknown product type '{}'", other)),
        }
    }
}

/// Published terms of one lender for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderRateCard {
    pub lender_id: String,

    /// Display name of the lender
    pub lender_name: String,

    pub product: ProductType,

    /// Nominal annual rate in percent (7.5 = 7.5%)
    pub annual_interest_rate_percent: f64,

    /// One-off processing fee as percent of principal
    pub processing_fee_percent: f64,

    pub max_term_years: u32,

    pub max_amount: f64,

    /// Fee on the outstanding balance when repaying early, in percent
    pub early_repayment_fee_percent: f64,

    #[serde(default)]
    pub required_documents: Vec<String>,

    /// Typical approval turnaround in days
    pub approval_days: u32,

    /// Customer rating on a 0 to 5 scale
    pub rating: f64,

    /// First day the card applies; `None` means always
    #[serde(default)]
    pub effective_from: Option<NaiveDate>,
}

impl LenderRateCard {
    /// Whether the card can fund `principal` over `term_years`
    pub fn covers(&self, principal: f64, term_years: u32) -> bool {
        self.max_amount >= principal && self.max_term_years >= term_years
    }

    /// Whether the card is in force on `date`
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_from.map(|from| from <= date).unwrap_or(true)
    }

    /// First malformed pricing field, if any
    pub(crate) fn pricing_defect(&self) -> Option<&'static str> {
        let fields = [
            ("annual_interest_rate_percent", self.annual_interest_rate_percent),
            ("processing_fee_percent", self.processing_fee_percent),
            ("early_repayment_fee_percent", self.early_repayment_fee_percent),
        ];
        fields
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
            .map(|(name, _)| name)
    }
}
