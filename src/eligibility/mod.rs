//! Applicant eligibility scoring

mod scorer;

pub use scorer::{Category, EligibilityScorer, Factor, FactorScore, ScoreResult, BAD_DEBT_REASON};
