//! Scoring assumptions: factor weights, band breakpoints and category thresholds

use super::bands::{Band, BandTable};
use crate::applicant::{CreditHistory, EmploymentDuration};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Maximum points each factor may contribute to the 100-point score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub income: i32,
    pub credit: i32,
    pub collateral: i32,
    pub debt_service: i32,
    pub tenure: i32,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            income: 20,
            credit: 25,
            collateral: 20,
            debt_service: 25,
            tenure: 10,
        }
    }
}

impl FactorWeights {
    pub fn total(&self) -> i32 {
        self.income + self.credit + self.collateral + self.debt_service + self.tenure
    }
}

/// Points by declared credit history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditPoints {
    pub good: i32,
    pub none: i32,
    pub bad: i32,
    pub unknown: i32,
    /// Subtracted when the applicant sits in bad-debt group 1
    pub group1_penalty: i32,
}

impl Default for CreditPoints {
    fn default() -> Self {
        Self {
            good: 25,
            none: 15,
            bad: 5,
            unknown: 0,
            group1_penalty: 10,
        }
    }
}

impl CreditPoints {
    pub fn points_for(&self, history: CreditHistory) -> i32 {
        match history {
            CreditHistory::Good => self.good,
            CreditHistory::None => self.none,
            CreditHistory::Bad => self.bad,
            CreditHistory::Unknown => self.unknown,
        }
    }

    fn max_points(&self) -> i32 {
        self.good.max(self.none).max(self.bad).max(self.unknown)
    }
}

/// Points by employment duration band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenurePoints {
    pub more_than_five_years: i32,
    pub three_to_five_years: i32,
    pub one_to_three_years: i32,
    pub less_than_one_year: i32,
}

impl Default for TenurePoints {
    fn default() -> Self {
        Self {
            more_than_five_years: 10,
            three_to_five_years: 8,
            one_to_three_years: 5,
            less_than_one_year: 2,
        }
    }
}

impl TenurePoints {
    pub fn points_for(&self, duration: EmploymentDuration) -> i32 {
        match duration {
            EmploymentDuration::MoreThanFiveYears => self.more_than_five_years,
            EmploymentDuration::ThreeToFiveYears => self.three_to_five_years,
            EmploymentDuration::OneToThreeYears => self.one_to_three_years,
            EmploymentDuration::LessThanOneYear => self.less_than_one_year,
        }
    }

    fn max_points(&self) -> i32 {
        self.more_than_five_years
            .max(self.three_to_five_years)
            .max(self.one_to_three_years)
            .max(self.less_than_one_year)
    }
}

/// Minimum scores for categories A, B and C (anything lower is D)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryThresholds {
    pub a: u8,
    pub b: u8,
    pub c: u8,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self { a: 80, b: 60, c: 40 }
    }
}

/// Complete configuration of the eligibility scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringAssumptions {
    pub weights: FactorWeights,

    /// Monthly income bands (higher is better)
    pub income: BandTable,

    pub credit: CreditPoints,

    /// Collateral value / requested amount bands (higher is better)
    pub collateral: BandTable,

    /// (expenses + existing debt) / income bands (lower is better)
    pub debt_service: BandTable,

    pub tenure: TenurePoints,

    pub categories: CategoryThresholds,

    /// Minimum score to be eligible
    pub eligibility_threshold: u8,
}

impl Default for ScoringAssumptions {
    fn default() -> Self {
        Self {
            weights: FactorWeights::default(),
            income: BandTable::at_least(
                vec![
                    Band::new(20_000_000.0, 20),
                    Band::new(15_000_000.0, 16),
                    Band::new(10_000_000.0, 12),
                    Band::new(5_000_000.0, 8),
                ],
                4,
            ),
            credit: CreditPoints::default(),
            collateral: BandTable::at_least(
                vec![
                    Band::new(2.0, 20),
                    Band::new(1.5, 15),
                    Band::new(1.0, 10),
                    // Any collateral at all
                    Band::new(f64::MIN_POSITIVE, 5),
                ],
                0,
            ),
            debt_service: BandTable::below(
                vec![Band::new(0.3, 25), Band::new(0.5, 20), Band::new(0.7, 10)],
                5,
            ),
            tenure: TenurePoints::default(),
            categories: CategoryThresholds::default(),
            eligibility_threshold: 40,
        }
    }
}

impl ScoringAssumptions {
    /// Check internal consistency before the assumptions are used
    pub fn validate(&self) -> Result<()> {
        let tables = [
            ("income", &self.income, self.weights.income),
            ("collateral", &self.collateral, self.weights.collateral),
            ("debt_service", &self.debt_service, self.weights.debt_service),
        ];
        for (name, table, weight) in tables {
            table
                .check_monotonic()
                .map_err(|reason| EngineError::InvalidAssumptions(format!("{}: {}", name, reason)))?;
            if table.max_points() > weight {
                return Err(EngineError::InvalidAssumptions(format!(
                    "{} bands award {} points, above the factor weight {}",
                    name,
                    table.max_points(),
                    weight
                )));
            }
        }

        if self.credit.max_points() > self.weights.credit {
            return Err(EngineError::InvalidAssumptions(format!(
                "credit points exceed the factor weight {}",
                self.weights.credit
            )));
        }
        if self.credit.group1_penalty < 0 {
            return Err(EngineError::InvalidAssumptions(
                "group1 penalty must not be negative".to_string(),
            ));
        }
        if self.tenure.max_points() > self.weights.tenure {
            return Err(EngineError::InvalidAssumptions(format!(
                "tenure points exceed the factor weight {}",
                self.weights.tenure
            )));
        }
        if self.weights.total() > 100 {
            return Err(EngineError::InvalidAssumptions(format!(
                "factor weights sum to {}, above 100",
                self.weights.total()
            )));
        }

        let c = &self.categories;
        if !(c.a > c.b && c.b > c.c && c.a <= 100) {
            return Err(EngineError::InvalidAssumptions(format!(
                "category thresholds must satisfy 100 >= A > B > C, got A={} B={} C={}",
                c.a, c.b, c.c
            )));
        }
        if self.eligibility_threshold > 100 {
            return Err(EngineError::InvalidAssumptions(format!(
                "eligibility threshold {} is above 100",
                self.eligibility_threshold
            )));
        }
        Ok(())
    }
}
