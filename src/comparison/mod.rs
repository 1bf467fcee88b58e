//! Loan comparison across lender rate cards
//!
//! Pricing follows the level-payment annuity with an explicit zero-rate
//! branch. Results are ordered by a caller-chosen field with ties kept in
//! rate card order.

mod query;
mod comparator;
pub mod amortization;

pub use query::{LoanQuery, SortDirection, SortKey, SortSpec};
pub use comparator::{compare, sort_results, ComparisonResult, LoanComparator};
pub use amortization::{
    amortization_schedule, early_repayment_quote, level_payment, monthly_rate, outstanding_balance,
    term_periods, AmortizationRow, EarlyRepaymentQuote, MAX_TERM_YEARS,
};
