//! Scoring configuration: band tables, factor weights and thresholds

mod bands;
mod scoring;
pub mod loader;

pub use bands::{Band, BandDirection, BandTable};
pub use scoring::{CategoryThresholds, CreditPoints, FactorWeights, ScoringAssumptions, TenurePoints};
pub use loader::{load_assumptions, load_assumptions_from_reader};
