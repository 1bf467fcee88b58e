//! Loan Engine - eligibility scoring and lender comparison for a loan marketplace
//!
//! This library provides:
//! - Weighted-sum eligibility scoring of applicant survey profiles
//! - Lender comparison: level payments, interest, fees and ranking
//! - Amortization schedules and early repayment quotes
//! - Rate catalog and scoring assumption loading
//!
//! Every computation is a pure function of its inputs.

pub mod error;
pub mod numeric;
pub mod applicant;
pub mod assumptions;
pub mod eligibility;
pub mod lenders;
pub mod comparison;

// Re-export commonly used types
pub use error::{EngineError, Result};
pub use applicant::{ApplicantProfile, BadDebtGroup, CreditHistory, EmploymentDuration};
pub use assumptions::ScoringAssumptions;
pub use eligibility::{Category, EligibilityScorer, ScoreResult};
pub use lenders::{LenderRateCard, ProductType, RateCatalog};
pub use comparison::{ComparisonResult, LoanComparator, LoanQuery, SortDirection, SortKey, SortSpec};
