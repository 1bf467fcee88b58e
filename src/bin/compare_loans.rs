//! Compare lender offers for one loan and optionally dump the amortization
//! schedule of the top-ranked offer

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use loan_engine::comparison::{amortization_schedule, early_repayment_quote};
use loan_engine::numeric::format_grouped;
use loan_engine::{LoanComparator, LoanQuery, ProductType, RateCatalog, SortDirection, SortKey, SortSpec};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(about = "Rank lender offers for a loan")]
struct Args {
    /// Loan amount
    #[arg(long)]
    principal: f64,

    /// Term in whole years
    #[arg(long)]
    term_years: u32,

    /// home, car or business
    #[arg(long)]
    product: ProductType,

    /// Rate catalog CSV (built-in catalog when omitted)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Restrict to these lenders (repeatable)
    #[arg(long = "lender")]
    lenders: Vec<String>,

    /// interest_rate, monthly_payment, total_interest, total_payment,
    /// processing_fee, total_cost, approval_days or rating
    #[arg(long, default_value = "interest_rate")]
    sort: SortKey,

    #[arg(long)]
    descending: bool,

    /// Only use rate cards in force on this date (YYYY-MM-DD)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Write the top offer's amortization schedule to this CSV
    #[arg(long)]
    schedule: Option<PathBuf>,

    /// Quote early repayment of the top offer after this many months
    #[arg(long)]
    repay_after: Option<u32>,

    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => RateCatalog::from_csv_path(path)
            .with_context(|| format!("reading rate catalog {}", path.display()))?,
        None => RateCatalog::default_catalog(),
    };

    let query = LoanQuery::new(args.principal, args.term_years, args.product)
        .with_lenders(args.lenders.iter().cloned());
    let sort = SortSpec {
        key: args.sort,
        direction: if args.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    };
    let comparator = match args.as_of {
        Some(date) => LoanComparator::as_of(date),
        None => LoanComparator::new(),
    };

    let results = comparator.compare(&query, catalog.cards(), sort)?;
    if results.is_empty() {
        bail!(
            "no lender offers a {} loan of {} over {} years",
            args.product.as_str(),
            format_grouped(args.principal),
            args.term_years
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!(
            "{:<4} {:<28} {:>7} {:>16} {:>18} {:>14} {:>18}",
            "Rank", "Lender", "Rate%", "Monthly", "TotalInterest", "Fee", "TotalCost"
        );
        for r in &results {
            println!(
                "{:<4} {:<28} {:>7.2} {:>16} {:>18} {:>14} {:>18}",
                r.rank,
                r.lender_name,
                r.annual_interest_rate_percent,
                format_grouped(r.monthly_payment),
                format_grouped(r.total_interest),
                format_grouped(r.processing_fee_amount),
                format_grouped(r.total_cost),
            );
        }
    }

    let best = &results[0];
    let best_card = catalog
        .cards()
        .iter()
        .find(|card| card.lender_id == best.lender_id && card.product == args.product)
        .context("top offer missing from catalog")?;

    if let Some(path) = &args.schedule {
        let rows = amortization_schedule(args.principal, best_card.annual_interest_rate_percent, args.term_years)?;
        let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        writeln!(file, "Period,OpeningBalance,Payment,Interest,Principal,ClosingBalance")?;
        for row in &rows {
            writeln!(
                file,
                "{},{:.2},{:.2},{:.2},{:.2},{:.2}",
                row.period, row.opening_balance, row.payment, row.interest, row.principal, row.closing_balance
            )?;
        }
        eprintln!("Schedule for {} written to {}", best.lender_name, path.display());
    }

    if let Some(months) = args.repay_after {
        let quote = early_repayment_quote(best_card, args.principal, args.term_years, months)?;
        eprintln!(
            "Early repayment with {} after {} months: balance {}, fee {}, settlement {}, interest saved {}",
            best.lender_name,
            quote.after_months,
            format_grouped(quote.outstanding_balance),
            format_grouped(quote.fee),
            format_grouped(quote.total_settlement),
            format_grouped(quote.interest_saved),
        );
    }

    Ok(())
}
