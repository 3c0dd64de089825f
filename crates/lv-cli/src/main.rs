//! Label Verification CLI
//!
//! Takes a claim JSON file and an OCR-result JSON file (as produced by the
//! upstream OCR service) and prints a verification report. No OCR or image
//! handling happens here.

use clap::{Parser, Subcommand};
use lv_core::report::{self, ReportFormat};
use lv_core::{Claim, Evidence, ProductCategory, Verifier};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "lv-check")]
#[command(about = "Alcohol label claim verification")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a claim against OCR output from a label photograph
    Verify {
        /// Path to the claim JSON file
        #[arg(short, long)]
        claim: PathBuf,

        /// Path to the OCR result JSON file
        #[arg(short = 'i', long)]
        ocr: PathBuf,

        /// Product category (spirits, wine, beer)
        #[arg(short = 'p', long)]
        category: String,

        /// Output format (json, markdown)
        #[arg(short, long, default_value = "markdown")]
        output: String,

        /// Output file (defaults to stdout)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Print the approved container sizes for a product category
    Sizes {
        /// Product category (spirits, wine, beer)
        #[arg(short = 'p', long)]
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    match cli.command {
        Commands::Verify {
            claim,
            ocr,
            category,
            output,
            output_file,
        } => cmd_verify(claim, ocr, category, output, output_file),
        Commands::Sizes { category } => cmd_sizes(category),
    }
}

fn parse_category(raw: &str) -> ProductCategory {
    match raw.parse::<ProductCategory>() {
        Ok(category) => category,
        Err(_) => {
            error!("Unknown product category: {} (expected spirits, wine, or beer)", raw);
            std::process::exit(2);
        }
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &PathBuf, what: &str) -> T {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to read {} file {}: {}", what, path.display(), e);
            std::process::exit(1);
        }
    };
    match serde_json::from_str(&data) {
        Ok(value) => value,
        Err(e) => {
            error!("Failed to parse {} file {}: {}", what, path.display(), e);
            std::process::exit(1);
        }
    }
}

fn cmd_verify(
    claim_path: PathBuf,
    ocr_path: PathBuf,
    category: String,
    output_format: String,
    output_file: Option<PathBuf>,
) {
    let category = parse_category(&category);
    let claim: Claim = load_json(&claim_path, "claim");
    let evidence: Evidence = load_json(&ocr_path, "OCR result");

    // Boundary validation: out-of-invariant values never reach the engine
    if let Err(e) = claim.validate() {
        error!("{}", e);
        std::process::exit(2);
    }
    if let Err(e) = evidence.validate() {
        error!("{}", e);
        std::process::exit(2);
    }

    let verifier = Verifier::new();
    let result = verifier.verify(&claim, &evidence, category);
    info!(
        overall = result.overall_match,
        score = result.compliance_score,
        grade = %result.compliance_grade,
        "verification finished"
    );

    let format = match output_format.to_lowercase().as_str() {
        "json" => ReportFormat::Json,
        _ => ReportFormat::Markdown,
    };

    match report::generate_report(&result, format) {
        Ok(content) => {
            if let Some(path) = output_file {
                if let Err(e) = std::fs::write(&path, &content) {
                    error!("Failed to write report to {}: {}", path.display(), e);
                    std::process::exit(1);
                }
                info!("Report written to: {}", path.display());
            } else {
                println!("{}", content);
            }
        }
        Err(e) => {
            error!("Report generation failed: {}", e);
            std::process::exit(1);
        }
    }

    if !result.overall_match {
        std::process::exit(1);
    }
}

fn cmd_sizes(category: String) {
    let category = parse_category(&category);
    match lv_rules::units::standard_sizes(category) {
        Some(sizes) => {
            println!("Approved container sizes for {} (ml):", category);
            for size in sizes {
                println!("  {:.0}", size);
            }
        }
        None => {
            println!("{} has no standards of fill; any container size is valid", category);
        }
    }
}
