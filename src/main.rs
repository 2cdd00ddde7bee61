//! # News Date Scraper
//!
//! Collects the article listings published on a given day by Bahamian news
//! sites and writes them to a CSV file.
//!
//! ## Usage
//!
//! ```sh
//! news_date_scraper --date 2024-03-15
//! ```
//!
//! ## Architecture
//!
//! The application is a one-way pipeline:
//! 1. **Input**: Validate the target date before any network activity
//! 2. **Scraping**: Fetch each source's listing page and extract matching articles
//! 3. **Aggregation**: Concatenate the sources' records in a fixed order
//! 4. **Output**: Stamp the batch and overwrite the CSV (and optional JSON) file
//!
//! Steps 1-4 live in [`pipeline::run`]; `main` only wires up logging, the CLI
//! and the configuration.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::process;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod cli;
mod config;
mod dates;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::Config;
use models::{ArticleRecord, Source};
use outputs::csv::WriteOutcome;
use pipeline::RunError;
use scrapers::{HttpFetcher, default_extractors};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("news_date_scraper starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration: defaults < config file < CLI ----
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(user_agent) = args.user_agent {
        config.user_agent = user_agent;
    }

    // ---- Target date (prompted for when not on the command line) ----
    let raw_date = match args.date {
        Some(date) => date,
        None => cli::prompt_for_date()?,
    };

    // ---- Run: date check, scrape, aggregate, persist ----
    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let extractors = default_extractors(&config.sources);
    let report = match pipeline::run(
        &fetcher,
        &extractors,
        &raw_date,
        &config.output,
        args.json_output.as_deref(),
        Local::now().naive_local(),
        || Local::now().naive_local(),
    )
    .await
    {
        Ok(report) => report,
        Err(RunError::InvalidDate(e)) => {
            error!(error = %e, "Rejected target date");
            eprintln!("{e}");
            process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "Run failed");
            return Err(e.into());
        }
    };

    match &report.outcome {
        WriteOutcome::Skipped => println!("No articles found for the specified date."),
        WriteOutcome::Written {
            path, last_updated, ..
        } => {
            println!("Articles updated in {}", path.display());
            println!("Last updated: {last_updated}");
        }
    }

    for line in summary_lines(&report.articles) {
        println!("{line}");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Per-source article counts, in aggregation order.
fn summary_lines(articles: &[ArticleRecord]) -> Vec<String> {
    let mut lines = vec![String::new(), "=== Article Count Summary ===".to_string()];
    for source in Source::ALL {
        let count = articles.iter().filter(|a| a.source == source).count();
        lines.push(format!("{}: {count} articles", source.display_name()));
    }
    lines.push(format!("Total: {} articles", articles.len()));
    lines.push("===========================".to_string());
    lines
}
