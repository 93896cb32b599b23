//! assay - verification & audit ledger for review-report scores
//!
//! Operator surface over the ledger core: verify a report into the audit
//! history, print the truth report, or check a claimed score. The report
//! text can come from a file or stdin; where it originally came from (API
//! response, pasted text) is not this tool's business.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use assay_extract::scores::PASS_THRESHOLD_PERCENT;
use assay_ledger::ledger::VerificationLedger;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// assay - verification & audit ledger for review-report scores
#[derive(Parser, Debug)]
#[command(name = "assay")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Storage directory holding the audit log and verified scores
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify a report and append the result to the audit ledger
    Verify {
        /// Report text file (`-` reads stdin)
        report: PathBuf,

        /// Phase label, e.g. "Phase 1"
        phase: String,

        /// Attempt number (positive, caller-assigned)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        attempt: u32,

        /// Report timestamp (ISO-8601); defaults to the current time
        #[arg(long)]
        timestamp: Option<String>,
    },

    /// Print the truth report across all phases
    Report,

    /// Check a claimed overall percentage against the verified score
    Check {
        /// The percentage being claimed
        claimed_percentage: u32,

        /// Phase label the claim is about
        phase: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let mut ledger = VerificationLedger::open(&cli.dir)
        .with_context(|| format!("opening ledger in {}", cli.dir.display()))?;
    tracing::debug!(
        dir = %cli.dir.display(),
        entries = ledger.entries().len(),
        "ledger opened"
    );

    match cli.command {
        Commands::Verify {
            report,
            phase,
            attempt,
            timestamp,
        } => {
            let raw_text = read_report(&report)?;
            let entry = ledger
                .verify_and_log(&raw_text, &phase, attempt, timestamp)
                .context("verification could not be persisted")?;

            match entry.scores.overall_percentage {
                Some(pct) => println!("Verified score: {pct}%"),
                None => println!("Verified score: Unknown"),
            }
            println!(
                "Passed {PASS_THRESHOLD_PERCENT}% threshold: {}",
                entry.passed_threshold
            );
        }

        Commands::Report => {
            println!("{}", ledger.render_truth_report());
        }

        Commands::Check {
            claimed_percentage,
            phase,
        } => {
            let verdict = ledger.check_claim(claimed_percentage, &phase);
            println!("Truthful: {}", verdict.truthful);
            println!("Explanation: {}", verdict.explanation);
        }
    }

    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).with_context(|| format!("invalid log level: {level}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn read_report(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading report from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading report file {}", path.display()))
    }
}
