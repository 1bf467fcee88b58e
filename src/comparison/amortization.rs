//! Level-payment amortization: monthly payment, schedule and early payoff
//!
//! A zero rate is a first-class case everywhere here: the annuity formula
//! is 0/0 at r = 0, so the payment falls back to principal / periods.

use crate::error::{EngineError, Result};
use crate::lenders::LenderRateCard;
use crate::numeric::require_positive;
use serde::{Deserialize, Serialize};

/// Longest term any query, schedule or quote accepts
pub const MAX_TERM_YEARS: u32 = 100;

/// Monthly rate from a nominal annual percentage (7.5 -> 0.00625)
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Number of monthly instalments in a term of `term_years`
pub fn term_periods(term_years: u32) -> Result<u32> {
    if term_years == 0 {
        return Err(EngineError::invalid("term_years", "must be greater than zero"));
    }
    if term_years > MAX_TERM_YEARS {
        return Err(EngineError::invalid(
            "term_years",
            format!("term is too long, at most {} years", MAX_TERM_YEARS),
        ));
    }
    Ok(term_years * 12)
}

fn growth(rate: f64, periods: u32) -> f64 {
    (1.0 + rate).powi(i32::try_from(periods).unwrap_or(i32::MAX))
}

/// Whether the annuity formula degenerates to straight-line repayment
fn is_flat(rate: f64, periods: u32) -> bool {
    rate == 0.0 || growth(rate, periods) == 1.0
}

/// Level monthly payment for `principal` over `periods` months
///
/// `payment = P * r / (1 - (1+r)^-n)`, or `P / n` when r = 0 or when r is
/// too small to register in f64. As `(1+r)^n` overflows the payment tends
/// to the interest-only `P * r`.
pub fn level_payment(principal: f64, rate: f64, periods: u32) -> f64 {
    if periods == 0 {
        return principal;
    }
    if is_flat(rate, periods) {
        return principal / periods as f64;
    }
    principal * rate / (1.0 - growth(rate, periods).recip())
}

/// Balance still owed after `paid` level payments
pub fn outstanding_balance(principal: f64, rate: f64, periods: u32, paid: u32) -> f64 {
    if paid >= periods {
        return 0.0;
    }
    let payment = level_payment(principal, rate, periods);
    let balance = if is_flat(rate, periods) {
        principal - payment * paid as f64
    } else {
        // Present value of the payments still due
        payment * (1.0 - growth(rate, periods - paid).recip()) / rate
    };
    balance.max(0.0)
}

/// One month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based month number
    pub period: u32,
    pub opening_balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub closing_balance: f64,
}

/// Month-by-month schedule; the last row settles the remaining balance so
/// the loan closes at exactly zero
pub fn amortization_schedule(
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
) -> Result<Vec<AmortizationRow>> {
    require_positive("principal", principal)?;
    require_rate(annual_rate_percent)?;
    let periods = term_periods(term_years)?;
    let rate = monthly_rate(annual_rate_percent);
    let payment = level_payment(principal, rate, periods);

    let mut rows = Vec::with_capacity(periods as usize);
    let mut balance = principal;

    for period in 1..=periods {
        let interest = balance * rate;
        let (payment, principal_part) = if period == periods {
            (balance + interest, balance)
        } else {
            (payment, payment - interest)
        };
        let closing = if period == periods {
            0.0
        } else {
            balance - principal_part
        };

        rows.push(AmortizationRow {
            period,
            opening_balance: balance,
            payment,
            interest,
            principal: principal_part,
            closing_balance: closing,
        });
        balance = closing;
    }

    Ok(rows)
}

/// Cost of settling a loan early with a given lender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarlyRepaymentQuote {
    pub lender_id: String,
    /// Number of regular payments made before settling
    pub after_months: u32,
    pub outstanding_balance: f64,
    /// Early repayment fee charged on the outstanding balance
    pub fee: f64,
    /// Balance plus fee
    pub total_settlement: f64,
    /// Scheduled payments avoided, net of the balance and the fee
    pub interest_saved: f64,
}

/// Quote for settling after `after_months` payments under `card`
pub fn early_repayment_quote(
    card: &LenderRateCard,
    principal: f64,
    term_years: u32,
    after_months: u32,
) -> Result<EarlyRepaymentQuote> {
    require_positive("principal", principal)?;
    if let Some(field) = card.pricing_defect() {
        return Err(EngineError::invalid(field, "rate card carries a negative or non-finite value"));
    }
    let periods = term_periods(term_years)?;
    if after_months > periods {
        return Err(EngineError::invalid(
            "after_months",
            format!("{} exceeds the {}-month term", after_months, periods),
        ));
    }

    let rate = monthly_rate(card.annual_interest_rate_percent);
    let payment = level_payment(principal, rate, periods);
    let balance = outstanding_balance(principal, rate, periods, after_months);
    let fee = balance * card.early_repayment_fee_percent / 100.0;
    let remaining_payments = payment * (periods - after_months) as f64;

    Ok(EarlyRepaymentQuote {
        lender_id: card.lender_id.clone(),
        after_months,
        outstanding_balance: balance,
        fee,
        total_settlement: balance + fee,
        interest_saved: remaining_payments - balance - fee,
    })
}

fn require_rate(annual_rate_percent: f64) -> Result<()> {
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(EngineError::invalid(
            "annual_interest_rate_percent",
            format!("must be finite and non-negative, got {}", annual_rate_percent),
        ));
    }
    Ok(())
}
