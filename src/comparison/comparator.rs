//! Lender comparison: price every eligible rate card and rank the offers

use super::amortization::{level_payment, monthly_rate};
use super::query::{LoanQuery, SortDirection, SortKey, SortSpec};
use crate::error::Result;
use crate::lenders::LenderRateCard;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Priced offer of one lender for the queried loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub lender_id: String,
    pub lender_name: String,
    pub annual_interest_rate_percent: f64,
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_payment: f64,
    pub processing_fee_amount: f64,
    /// Interest plus processing fee
    pub total_cost: f64,
    pub approval_days: u32,
    pub rating: f64,
    pub required_documents: Vec<String>,
    /// 1-based position after sorting
    pub rank: u32,
    /// Position of the rate card in the input list, used to break ties
    pub input_order: usize,
}

impl ComparisonResult {
    /// Whether every priced amount is a finite number
    pub fn is_finite(&self) -> bool {
        [
            self.monthly_payment,
            self.total_interest,
            self.total_payment,
            self.processing_fee_amount,
            self.total_cost,
        ]
        .iter()
        .all(|value| value.is_finite())
    }

    /// Numeric value of the field `key` refers to
    pub fn value_for(&self, key: SortKey) -> f64 {
        match key {
            SortKey::InterestRate => self.annual_interest_rate_percent,
            SortKey::MonthlyPayment => self.monthly_payment,
            SortKey::TotalInterest => self.total_interest,
            SortKey::TotalPayment => self.total_payment,
            SortKey::ProcessingFee => self.processing_fee_amount,
            SortKey::TotalCost => self.total_cost,
            SortKey::ApprovalDays => self.approval_days as f64,
            SortKey::Rating => self.rating,
        }
    }
}

/// Stateless comparator, optionally pinned to a pricing date
#[derive(Debug, Clone, Copy, Default)]
pub struct LoanComparator {
    as_of: Option<NaiveDate>,
}

impl LoanComparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore rate cards that are not yet in force on `date`
    pub fn as_of(date: NaiveDate) -> Self {
        Self { as_of: Some(date) }
    }

    /// Price `query` against every applicable card and return the offers
    /// sorted by `sort`
    ///
    /// Only an invalid query is an error. Cards for another product, for
    /// lenders outside the query, below the requested amount or term, or
    /// with malformed pricing are left out of the result.
    pub fn compare(
        &self,
        query: &LoanQuery,
        rate_cards: &[LenderRateCard],
        sort: SortSpec,
    ) -> Result<Vec<ComparisonResult>> {
        query.validate()?;

        let mut results: Vec<ComparisonResult> = rate_cards
            .iter()
            .enumerate()
            .filter(|(_, card)| self.admits(query, card))
            .map(|(idx, card)| price(query, card, idx))
            .filter(|offer| {
                let finite = offer.is_finite();
                if !finite {
                    log::warn!("{}: pricing overflowed, skipping offer", offer.lender_id);
                }
                finite
            })
            .collect();

        log::debug!(
            "{} of {} rate cards priced for {} over {} years",
            results.len(),
            rate_cards.len(),
            query.product.as_str(),
            query.term_years
        );

        sort_results(&mut results, sort);
        Ok(results)
    }

    fn admits(&self, query: &LoanQuery, card: &LenderRateCard) -> bool {
        if card.product != query.product || !query.includes_lender(&card.lender_id) {
            return false;
        }
        if let Some(date) = self.as_of {
            if !card.is_effective_on(date) {
                log::debug!("{}: card not effective on {}", card.lender_id, date);
                return false;
            }
        }
        if !card.covers(query.principal, query.term_years) {
            log::debug!(
                "{}: outside limits (max amount {}, max term {} years)",
                card.lender_id,
                card.max_amount,
                card.max_term_years
            );
            return false;
        }
        if let Some(field) = card.pricing_defect() {
            log::warn!("{}: skipping rate card with invalid {}", card.lender_id, field);
            return false;
        }
        true
    }
}

/// Convenience wrapper around `LoanComparator::new().compare(..)`
pub fn compare(
    query: &LoanQuery,
    rate_cards: &[LenderRateCard],
    sort: SortSpec,
) -> Result<Vec<ComparisonResult>> {
    LoanComparator::new().compare(query, rate_cards, sort)
}

/// Re-order results in place and reassign ranks
///
/// Ties on the sort field keep the rate cards' input order, so sorting is a
/// total order and repeating a sort changes nothing.
pub fn sort_results(results: &mut [ComparisonResult], sort: SortSpec) {
    results.sort_by(|a, b| {
        let by_key = a.value_for(sort.key).total_cmp(&b.value_for(sort.key));
        let by_key = match sort.direction {
            SortDirection::Ascending => by_key,
            SortDirection::Descending => by_key.reverse(),
        };
        match by_key {
            Ordering::Equal => a.input_order.cmp(&b.input_order),
            other => other,
        }
    });

    for (idx, result) in results.iter_mut().enumerate() {
        result.rank = idx as u32 + 1;
    }
}

fn price(query: &LoanQuery, card: &LenderRateCard, input_order: usize) -> ComparisonResult {
    let principal = query.principal;
    let periods = query.periods();
    let rate = monthly_rate(card.annual_interest_rate_percent);

    let monthly_payment = level_payment(principal, rate, periods);
    let total_payment = monthly_payment * periods as f64;
    let total_interest = total_payment - principal;
    let processing_fee_amount = principal * card.processing_fee_percent / 100.0;

    ComparisonResult {
        lender_id: card.lender_id.clone(),
        lender_name: card.lender_name.clone(),
        annual_interest_rate_percent: card.annual_interest_rate_percent,
        monthly_payment,
        total_interest,
        total_payment,
        processing_fee_amount,
        total_cost: total_interest + processing_fee_amount,
        approval_days: card.approval_days,
        rating: card.rating,
        required_documents: card.required_documents.clone(),
        rank: 0,
        input_order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::lenders::{ProductType, RateCatalog};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn home_card(lender_id: &str, rate: f64, fee: f64, max_amount: f64, max_term_years: u32) -> LenderRateCard {
        LenderRateCard {
            lender_id: lender_id.to_string(),
            lender_name: lender_id.to_uppercase(),
            product: ProductType::Home,
            annual_interest_rate_percent: rate,
            processing_fee_percent: fee,
            max_term_years,
            max_amount,
            early_repayment_fee_percent: 1.0,
            required_documents: Vec::new(),
            approval_days: 5,
            rating: 4.0,
            effective_from: None,
        }
    }

    fn reference_query() -> LoanQuery {
        LoanQuery::new(100_000_000.0, 5, ProductType::Home)
    }

    #[test]
    fn test_reference_pricing() {
        let cards = vec![home_card("northbank", 7.5, 0.5, 1e10, 25)];
        let results = compare(&reference_query(), &cards, SortSpec::default()).expect("compare");

        assert_eq!(results.len(), 1);
        let offer = &results[0];
        assert_abs_diff_eq!(offer.monthly_payment, 2_003_795.0, epsilon = 5.0);
        assert_relative_eq!(offer.total_payment, offer.monthly_payment * 60.0);
        assert_relative_eq!(offer.total_interest, offer.total_payment - 100_000_000.0);
        assert_abs_diff_eq!(offer.processing_fee_amount, 500_000.0, epsilon = 1e-6);
        assert_relative_eq!(offer.total_cost, offer.total_interest + 500_000.0);
        assert_eq!(offer.rank, 1);
    }

    #[test]
    fn test_zero_rate_card() {
        let cards = vec![home_card("promo", 0.0, 0.0, 1e10, 25)];
        let results = compare(&reference_query(), &cards, SortSpec::default()).expect("compare");

        assert_eq!(results[0].monthly_payment, 100_000_000.0 / 60.0);
        assert!(results[0].total_interest.abs() < 1e-6);
        assert!(results[0].total_cost.is_finite());
    }

    #[test]
    fn test_limits_exclude_lenders() {
        let cards = vec![
            home_card("small", 7.0, 0.5, 50_000_000.0, 25),
            home_card("short", 6.5, 0.5, 1e10, 3),
            home_card("fits", 8.0, 0.5, 100_000_000.0, 5),
        ];
        let results = compare(&reference_query(), &cards, SortSpec::default()).expect("compare");

        let ids: Vec<&str> = results.iter().map(|r| r.lender_id.as_str()).collect();
        assert_eq!(ids, vec!["fits"]);
    }

    #[test]
    fn test_product_and_lender_filters() {
        let catalog = RateCatalog::default_catalog();

        let all_home = compare(&reference_query(), catalog.cards(), SortSpec::default()).expect("compare");
        assert!(all_home.len() >= 2);

        let query = reference_query().with_lenders(["harbor"]);
        let only_harbor = compare(&query, catalog.cards(), SortSpec::default()).expect("compare");
        assert_eq!(only_harbor.len(), 1);
        assert_eq!(only_harbor[0].lender_id, "harbor");
    }

    #[test]
    fn test_malformed_card_is_skipped() {
        let cards = vec![
            home_card("broken", f64::NAN, 0.5, 1e10, 25),
            home_card("negative", -1.0, 0.5, 1e10, 25),
            home_card("fine", 7.0, 0.5, 1e10, 25),
        ];
        let results = compare(&reference_query(), &cards, SortSpec::default()).expect("compare");
        assert_eq!(results.len(), 1);
        assert!(results.iter().all(|r| r.monthly_payment.is_finite()));
    }

    #[test]
    fn test_extreme_rate_prices_finitely() {
        let mut card = home_card("usury", 10_000.0, 0.5, 1e10, 30);
        card.product = ProductType::Business;
        let query = LoanQuery::new(1_000_000.0, 30, ProductType::Business);
        let results = compare(&query, &[card], SortSpec::default()).expect("compare");

        assert_eq!(results.len(), 1);
        let offer = &results[0];
        assert!(offer.is_finite());
        assert_relative_eq!(offer.monthly_payment, 1_000_000.0 * monthly_rate(10_000.0), max_relative = 1e-12);
        assert!(offer.total_interest > 0.0);
    }

    #[test]
    fn test_overflowing_offer_is_skipped() {
        let cards = vec![
            home_card("overflow", 1e306, 0.5, f64::MAX, 25),
            home_card("fine", 7.0, 0.5, 1e10, 25),
        ];
        let results = compare(&reference_query(), &cards, SortSpec::default()).expect("compare");
        let ids: Vec<&str> = results.iter().map(|r| r.lender_id.as_str()).collect();
        assert_eq!(ids, vec!["fine"]);
    }

    #[test]
    fn test_overlong_term_is_an_error() {
        let cards = vec![home_card("northbank", 7.5, 0.5, 1e10, u32::MAX)];
        let query = LoanQuery::new(1_000.0, 1_000, ProductType::Home);
        match compare(&query, &cards, SortSpec::default()) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "term_years"),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_query_is_an_error() {
        let cards = vec![home_card("northbank", 7.5, 0.5, 1e10, 25)];
        let query = LoanQuery::new(-5.0, 5, ProductType::Home);
        match compare(&query, &cards, SortSpec::default()) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "principal"),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_sorting_and_ranks() {
        let cards = vec![
            home_card("mid", 7.5, 0.2, 1e10, 25),
            home_card("high", 9.0, 0.0, 1e10, 25),
            home_card("low", 6.0, 2.0, 1e10, 25),
        ];
        let query = reference_query();

        let by_rate = compare(&query, &cards, SortSpec::ascending(SortKey::InterestRate)).expect("compare");
        let ids: Vec<&str> = by_rate.iter().map(|r| r.lender_id.as_str()).collect();
        assert_eq!(ids, vec!["low", "mid", "high"]);
        assert_eq!(by_rate.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);

        let by_fee = compare(&query, &cards, SortSpec::descending(SortKey::ProcessingFee)).expect("compare");
        let ids: Vec<&str> = by_fee.iter().map(|r| r.lender_id.as_str()).collect();
        assert_eq!(ids, vec!["low", "mid", "high"]);
    }

    #[test]
    fn test_ties_keep_input_order_in_both_directions() {
        let cards = vec![
            home_card("first", 7.0, 0.5, 1e10, 25),
            home_card("second", 7.0, 0.5, 1e10, 25),
            home_card("cheap", 5.0, 0.5, 1e10, 25),
        ];
        let query = reference_query();

        let asc = compare(&query, &cards, SortSpec::ascending(SortKey::InterestRate)).expect("compare");
        let ids: Vec<&str> = asc.iter().map(|r| r.lender_id.as_str()).collect();
        assert_eq!(ids, vec!["cheap", "first", "second"]);

        let desc = compare(&query, &cards, SortSpec::descending(SortKey::InterestRate)).expect("compare");
        let ids: Vec<&str> = desc.iter().map(|r| r.lender_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "cheap"]);
    }

    #[test]
    fn test_resort_is_idempotent() {
        let catalog = RateCatalog::default_catalog();
        let query = LoanQuery::new(500_000_000.0, 5, ProductType::Car);
        let mut results = compare(&query, catalog.cards(), SortSpec::default()).expect("compare");

        let spec = SortSpec::descending(SortKey::Rating);
        sort_results(&mut results, spec);
        let once = results.clone();
        sort_results(&mut results, spec);
        assert_eq!(once, results);
    }

    #[test]
    fn test_as_of_skips_future_cards() {
        let mut future = home_card("future", 5.0, 0.0, 1e10, 25);
        future.effective_from = NaiveDate::from_ymd_opt(2030, 1, 1);
        let cards = vec![future, home_card("current", 7.0, 0.0, 1e10, 25)];
        let date = NaiveDate::from_ymd_opt(2026, 10, 1).expect("date");

        let results = LoanComparator::as_of(date)
            .compare(&reference_query(), &cards, SortSpec::default())
            .expect("compare");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].lender_id, "current");

        let unpinned = LoanComparator::new()
            .compare(&reference_query(), &cards, SortSpec::default())
            .expect("compare");
        assert_eq!(unpinned.len(), 2);
    }
}
