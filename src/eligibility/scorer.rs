//! Weighted-sum eligibility scorer

use crate::applicant::ApplicantProfile;
use crate::assumptions::ScoringAssumptions;
use crate::error::Result;
use crate::numeric::sanitize;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Rejection reason for bad-debt groups 2 to 5
pub const BAD_DEBT_REASON: &str = "bad debt history";

/// Score category, A best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    A,
    B,
    C,
    D,
}

/// Scoring factor, used to label the breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Income,
    CreditHistory,
    Collateral,
    DebtService,
    Tenure,
}

/// Points contributed by one factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: Factor,
    pub points: i32,
}

/// Outcome of one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub category: Category,
    pub eligible: bool,
    pub rejection_reason: Option<String>,
    /// Per-factor breakdown; empty when the applicant was disqualified early
    pub factors: Vec<FactorScore>,
}

impl ScoreResult {
    fn disqualified(reason: &str) -> Self {
        Self {
            score: 0,
            category: Category::D,
            eligible: false,
            rejection_reason: Some(reason.to_string()),
            factors: Vec::new(),
        }
    }

    /// Points awarded for `factor`, if it was scored
    pub fn points_for(&self, factor: Factor) -> Option<i32> {
        self.factors
            .iter()
            .find(|f| f.factor == factor)
            .map(|f| f.points)
    }
}

/// Stateless scorer over a fixed set of assumptions
#[derive(Debug, Clone, Default)]
pub struct EligibilityScorer {
    assumptions: ScoringAssumptions,
}

impl EligibilityScorer {
    /// Create a scorer; the assumptions are validated first
    pub fn new(assumptions: ScoringAssumptions) -> Result<Self> {
        assumptions.validate()?;
        Ok(Self { assumptions })
    }

    pub fn assumptions(&self) -> &ScoringAssumptions {
        &self.assumptions
    }

    /// Score a profile. Never fails: a rejection is part of the result.
    pub fn evaluate(&self, profile: &ApplicantProfile) -> ScoreResult {
        if profile.bad_debt_group.is_disqualifying() {
            log::debug!(
                "disqualified on bad debt group {}",
                profile.bad_debt_group.group_number()
            );
            return ScoreResult::disqualified(BAD_DEBT_REASON);
        }

        let factors = vec![
            FactorScore {
                factor: Factor::Income,
                points: self.income_points(profile),
            },
            FactorScore {
                factor: Factor::CreditHistory,
                points: self.credit_points(profile),
            },
            FactorScore {
                factor: Factor::Collateral,
                points: self.collateral_points(profile),
            },
            FactorScore {
                factor: Factor::DebtService,
                points: self.debt_service_points(profile),
            },
            FactorScore {
                factor: Factor::Tenure,
                points: self.assumptions.tenure.points_for(profile.employment_duration),
            },
        ];

        let total: i32 = factors.iter().map(|f| f.points).sum();
        let score = total.clamp(0, 100) as u8;
        let category = self.category_for(score);
        let eligible = score >= self.assumptions.eligibility_threshold;
        let rejection_reason = if eligible {
            None
        } else {
            Some(format!(
                "score {} below eligibility threshold {}",
                score, self.assumptions.eligibility_threshold
            ))
        };

        ScoreResult {
            score,
            category,
            eligible,
            rejection_reason,
            factors,
        }
    }

    /// Validate the profile at the boundary, then score it
    pub fn try_evaluate(&self, profile: &ApplicantProfile) -> Result<ScoreResult> {
        profile.validate()?;
        Ok(self.evaluate(profile))
    }

    /// Score many profiles in parallel, preserving input order
    pub fn evaluate_batch(&self, profiles: &[ApplicantProfile]) -> Vec<ScoreResult> {
        log::debug!("scoring batch of {} profiles", profiles.len());
        profiles
            .par_iter()
            .map(|profile| self.evaluate(profile))
            .collect()
    }

    /// Category for a clamped score
    pub fn category_for(&self, score: u8) -> Category {
        let thresholds = &self.assumptions.categories;
        if score >= thresholds.a {
            Category::A
        } else if score >= thresholds.b {
            Category::B
        } else if score >= thresholds.c {
            Category::C
        } else {
            Category::D
        }
    }

    fn income_points(&self, profile: &ApplicantProfile) -> i32 {
        // Zero or malformed income lands in the lowest band
        self.assumptions.income.lookup(sanitize(profile.monthly_income))
    }

    fn credit_points(&self, profile: &ApplicantProfile) -> i32 {
        let credit = &self.assumptions.credit;
        let mut points = credit.points_for(profile.credit_history);
        if profile.bad_debt_group.group_number() == 1 {
            points -= credit.group1_penalty;
        }
        points
    }

    fn collateral_points(&self, profile: &ApplicantProfile) -> i32 {
        let table = &self.assumptions.collateral;
        let requested = profile.requested_loan_amount;
        match profile.collateral_value.map(sanitize) {
            Some(collateral) if collateral > 0.0 && requested.is_finite() && requested > 0.0 => {
                table.lookup(collateral / requested)
            }
            _ => table.worst(),
        }
    }

    fn debt_service_points(&self, profile: &ApplicantProfile) -> i32 {
        let table = &self.assumptions.debt_service;
        let income = sanitize(profile.monthly_income);
        if income == 0.0 {
            return table.worst();
        }
        let obligations = sanitize(profile.monthly_expenses) + sanitize(profile.current_monthly_debt);
        table.lookup(obligations / income)
    }
}
