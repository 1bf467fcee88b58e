//! Applicant data structures and CSV loading

mod data;
pub mod loader;

pub use data::{ApplicantProfile, BadDebtGroup, CreditHistory, EmploymentDuration};
pub use loader::{load_profiles, load_profiles_from_reader, ApplicantRecord};
