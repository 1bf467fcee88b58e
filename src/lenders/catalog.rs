//! Rate catalog: the read-only set of rate cards a comparison runs against
//!
//! Cards come either from the built-in default catalog or from a CSV export
//! with the header:
//! `lender_id,lender_name,product,annual_interest_rate_percent,processing_fee_percent,max_term_years,max_amount,early_repayment_fee_percent,required_documents,approval_days,rating,effective_from`
//!
//! `required_documents` is a `;`-separated list and `effective_from`
//! (`YYYY-MM-DD`) may be empty.

use super::{LenderRateCard, ProductType};
use crate::error::Result;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct RateCatalog {
    cards: Vec<LenderRateCard>,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    lender_id: String,
    lender_name: String,
    product: ProductType,
    annual_interest_rate_percent: f64,
    processing_fee_percent: f64,
    max_term_years: u32,
    max_amount: f64,
    early_repayment_fee_percent: f64,
    #[serde(default)]
    required_documents: String,
    approval_days: u32,
    rating: f64,
    effective_from: Option<NaiveDate>,
}

impl From<CatalogRow> for LenderRateCard {
    fn from(row: CatalogRow) -> Self {
        let required_documents = row
            .required_documents
            .split(';')
            .map(str::trim)
            .filter(|doc| !doc.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            lender_id: row.lender_id,
            lender_name: row.lender_name,
            product: row.product,
            annual_interest_rate_percent: row.annual_interest_rate_percent,
            processing_fee_percent: row.processing_fee_percent,
            max_term_years: row.max_term_years,
            max_amount: row.max_amount,
            early_repayment_fee_percent: row.early_repayment_fee_percent,
            required_documents,
            approval_days: row.approval_days,
            rating: row.rating,
            effective_from: row.effective_from,
        }
    }
}

impl RateCatalog {
    pub fn new(cards: Vec<LenderRateCard>) -> Self {
        Self { cards }
    }

    /// Built-in catalog used when no export is supplied
    pub fn default_catalog() -> Self {
        let home_docs = ["national id", "proof of income", "property title"];
        let car_docs = ["national id", "proof of income", "vehicle quote"];
        let business_docs = ["business registration", "financial statements", "tax returns"];

        Self::new(vec![
            card("northbank", "North Bank", ProductType::Home, 7.5, 0.5, 25, 5_000_000_000.0, 2.0, &home_docs, 7, 4.5),
            card("northbank", "North Bank", ProductType::Car, 8.2, 1.0, 7, 1_500_000_000.0, 3.0, &car_docs, 3, 4.5),
            card("riverside", "Riverside Commercial Bank", ProductType::Home, 6.9, 1.0, 20, 3_000_000_000.0, 3.0, &home_docs, 10, 4.2),
            card("riverside", "Riverside Commercial Bank", ProductType::Business, 9.5, 1.5, 10, 10_000_000_000.0, 2.5, &business_docs, 14, 4.2),
            card("summit", "Summit Finance", ProductType::Car, 7.9, 1.5, 5, 800_000_000.0, 4.0, &car_docs, 2, 3.9),
            card("summit", "Summit Finance", ProductType::Business, 10.2, 0.8, 7, 2_000_000_000.0, 2.0, &business_docs, 5, 3.9),
            card("harbor", "Harbor Credit Union", ProductType::Home, 7.2, 0.0, 30, 2_000_000_000.0, 1.0, &home_docs, 15, 4.7),
            card("harbor", "Harbor Credit Union", ProductType::Car, 8.8, 0.0, 8, 1_000_000_000.0, 1.0, &car_docs, 4, 4.7),
        ])
    }

    /// Read a catalog from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut cards = Vec::new();

        for row in csv_reader.deserialize::<CatalogRow>() {
            cards.push(LenderRateCard::from(row?));
        }

        Ok(Self::new(cards))
    }

    /// Read a catalog from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let catalog = Self::from_reader(File::open(path)?)?;
        log::info!("loaded {} rate cards from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn cards(&self) -> &[LenderRateCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in force on `date`, in catalog order
    pub fn effective_on(&self, date: NaiveDate) -> Self {
        Self::new(
            self.cards
                .iter()
                .filter(|card| card.is_effective_on(date))
                .cloned()
                .collect(),
        )
    }

    /// Cards for one product, in catalog order
    pub fn for_product(&self, product: ProductType) -> impl Iterator<Item = &LenderRateCard> {
        self.cards.iter().filter(move |card| card.product == product)
    }

    /// Distinct lender ids in first-seen order
    pub fn lender_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for card in &self.cards {
            if !ids.contains(&card.lender_id.as_str()) {
                ids.push(&card.lender_id);
            }
        }
        ids
    }
}

#[allow(clippy::too_many_arguments)]
fn card(
    lender_id: &str,
    lender_name: &str,
    product: ProductType,
    rate: f64,
    fee: f64,
    max_term_years: u32,
    max_amount: f64,
    early_fee: f64,
    documents: &[&str],
    approval_days: u32,
    rating: f64,
) -> LenderRateCard {
    LenderRateCard {
        lender_id: lender_id.to_string(),
        lender_name: lender_name.to_string(),
        product,
        annual_interest_rate_percent: rate,
        processing_fee_percent: fee,
        max_term_years,
        max_amount,
        early_repayment_fee_percent: early_fee,
        required_documents: documents.iter().map(|d| d.to_string()).collect(),
        approval_days,
        rating,
        effective_from: None,
    }
}
