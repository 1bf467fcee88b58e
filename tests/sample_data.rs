//! End-to-end runs over the CSV files shipped in `data/`

use chrono::NaiveDate;
use loan_engine::applicant::load_profiles;
use loan_engine::comparison::SortSpec;
use loan_engine::{Category, EligibilityScorer, LoanComparator, LoanQuery, ProductType, RateCatalog};
use std::path::PathBuf;

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

#[test]
fn sample_applicants_score_as_expected() {
    let records = load_profiles(data_path("applicants.csv")).expect("load applicants");
    assert_eq!(records.len(), 5);

    let scorer = EligibilityScorer::default();
    let profiles: Vec<_> = records.iter().map(|r| r.profile.clone()).collect();
    let results = scorer.evaluate_batch(&profiles);

    // 20 + 25 + 0 + 25 + 10
    assert_eq!(results[0].score, 80);
    assert_eq!(results[0].category, Category::A);

    // 12 + (15 - 10) + 15 + 20 + 8
    assert_eq!(results[1].score, 60);
    assert_eq!(results[1].category, Category::B);

    // group 3 bad debt
    assert_eq!(results[2].score, 0);
    assert!(!results[2].eligible);

    // zero income: 4 + 0 + 0 + 5 + 2
    assert_eq!(results[3].score, 11);
    assert!(!results[3].eligible);

    // 8 + 5 + 5 + 20 + 5
    assert_eq!(results[4].score, 43);
    assert_eq!(results[4].category, Category::C);
    assert!(results[4].eligible);
}

#[test]
fn sample_catalog_respects_effective_dates() {
    let catalog = RateCatalog::from_csv_path(data_path("rate_catalog.csv")).expect("load catalog");
    assert_eq!(catalog.len(), 8);

    let query = LoanQuery::new(300_000_000.0, 3, ProductType::Car);

    let early = LoanComparator::as_of(NaiveDate::from_ymd_opt(2026, 3, 1).expect("date"))
        .compare(&query, catalog.cards(), SortSpec::default())
        .expect("compare");
    assert!(early.iter().all(|offer| offer.lender_id != "harbor"));

    let later = LoanComparator::as_of(NaiveDate::from_ymd_opt(2026, 10, 1).expect("date"))
        .compare(&query, catalog.cards(), SortSpec::default())
        .expect("compare");
    assert_eq!(later[0].lender_id, "harbor");
    assert_eq!(later[0].monthly_payment, 300_000_000.0 / 36.0);
}
