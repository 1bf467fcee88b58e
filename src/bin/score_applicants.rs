//! Score a CSV of applicants and write one result row per applicant
//!
//! Scoring runs in parallel; output order matches the input file.

use anyhow::{Context, Result};
use clap::Parser;
use loan_engine::applicant::load_profiles;
use loan_engine::assumptions::load_assumptions;
use loan_engine::eligibility::{Category, EligibilityScorer, Factor};
use loan_engine::ApplicantProfile;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(about = "Batch eligibility scoring of applicant profiles")]
struct Args {
    /// Applicant CSV
    #[arg(short, long)]
    input: PathBuf,

    /// Result CSV (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Scoring assumptions JSON (built-in defaults when omitted)
    #[arg(short, long)]
    assumptions: Option<PathBuf>,

    /// Reject rows with negative or non-finite amounts instead of scoring them
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let records = load_profiles(&args.input)
        .with_context(|| format!("reading applicants from {}", args.input.display()))?;
    eprintln!("Loaded {} applicants in {:?}", records.len(), start.elapsed());

    let scorer = match &args.assumptions {
        Some(path) => {
            let assumptions = load_assumptions(path)
                .with_context(|| format!("reading assumptions from {}", path.display()))?;
            EligibilityScorer::new(assumptions)?
        }
        None => EligibilityScorer::default(),
    };

    if args.strict {
        for record in &records {
            record
                .profile
                .validate()
                .with_context(|| format!("applicant {}", record.applicant_id))?;
        }
    }

    let profiles: Vec<ApplicantProfile> = records.iter().map(|r| r.profile.clone()).collect();
    let score_start = Instant::now();
    let results = scorer.evaluate_batch(&profiles);
    eprintln!("Scored in {:?}", score_start.elapsed());

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let mut writer = csv::Writer::from_writer(&mut out);
    writer.write_record([
        "applicant_id",
        "score",
        "category",
        "eligible",
        "income_pts",
        "credit_pts",
        "collateral_pts",
        "debt_service_pts",
        "employment_duration",
        "tenure_pts",
        "rejection_reason",
    ])?;

    let factor_cell = |points: Option<i32>| points.map(|p| p.to_string()).unwrap_or_default();
    for (record, result) in records.iter().zip(&results) {
        writer.write_record([
            record.applicant_id.clone(),
            result.score.to_string(),
            format!("{:?}", result.category),
            result.eligible.to_string(),
            factor_cell(result.points_for(Factor::Income)),
            factor_cell(result.points_for(Factor::CreditHistory)),
            factor_cell(result.points_for(Factor::Collateral)),
            factor_cell(result.points_for(Factor::DebtService)),
            record.profile.employment_duration.as_str().to_string(),
            factor_cell(result.points_for(Factor::Tenure)),
            result.rejection_reason.clone().unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    drop(writer);

    let eligible = results.iter().filter(|r| r.eligible).count();
    eprintln!("\nBatch Summary:");
    eprintln!("  Applicants: {}", results.len());
    eprintln!("  Eligible:   {}", eligible);
    for category in [Category::A, Category::B, Category::C, Category::D] {
        let count = results.iter().filter(|r| r.category == category).count();
        eprintln!("  Category {:?}: {}", category, count);
    }
    eprintln!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
