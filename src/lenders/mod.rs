//! Lender reference data: rate cards and the catalog that holds them

mod rate_card;
pub mod catalog;

pub use rate_card::{LenderRateCard, ProductType};
pub use catalog::RateCatalog;
