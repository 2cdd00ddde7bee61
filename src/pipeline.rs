//! One end-to-end run: validate the date, scrape, aggregate, persist.
//!
//! `main` only handles CLI and config layering and then hands over here, so
//! the whole flow can be driven with an in-memory fetcher.

use crate::aggregator::collect_articles;
use crate::dates::{DateError, parse_target_date};
use crate::models::ArticleRecord;
use crate::outputs::csv::WriteOutcome;
use crate::outputs::{self, PersistError};
use crate::scrapers::{FetchPage, SourceExtractor};
use chrono::NaiveDateTime;
use std::path::Path;
use tracing::{error, info, instrument};

/// Errors that end a run.
///
/// Everything else (failed fetches, broken fragments, a failed JSON copy) is
/// logged and degrades to less data.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The target date was rejected; nothing was fetched.
    #[error(transparent)]
    InvalidDate(#[from] DateError),
    /// The CSV file could not be written.
    #[error("Failed to write output: {0}")]
    Persist(#[from] PersistError),
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunReport {
    /// Whether the CSV file was written or skipped.
    pub outcome: WriteOutcome,
    /// The aggregated batch, stamped if it was written.
    pub articles: Vec<ArticleRecord>,
}

/// Run the pipeline for one operator-supplied date.
///
/// # Arguments
///
/// * `fetcher` - Transport for the listing pages
/// * `extractors` - Sources to scrape, in aggregation order
/// * `raw_date` - The operator's `YYYY-MM-DD` input, validated before any fetch
/// * `output` - CSV file to overwrite
/// * `json_output` - Optional JSON copy of the written rows
/// * `reference` - Instant relative time phrases are resolved against
/// * `now` - Clock read once, after scraping, for the `last_updated` stamp
///
/// # Returns
///
/// A [`RunReport`]; an empty result is [`WriteOutcome::Skipped`], not an error.
///
/// # Errors
///
/// [`RunError::InvalidDate`] before any network activity, or
/// [`RunError::Persist`] if the CSV file cannot be written.
#[instrument(level = "info", skip_all, fields(%raw_date, output = %output.display()))]
pub async fn run<F: FetchPage>(
    fetcher: &F,
    extractors: &[Box<dyn SourceExtractor>],
    raw_date: &str,
    output: &Path,
    json_output: Option<&Path>,
    reference: NaiveDateTime,
    now: impl FnOnce() -> NaiveDateTime,
) -> Result<RunReport, RunError> {
    let target = parse_target_date(raw_date)?;
    info!(%target, "Searching for articles");

    let mut articles = collect_articles(fetcher, extractors, target, reference).await;
    let outcome = outputs::csv::write_articles(&mut articles, output, now()).await?;

    if let (WriteOutcome::Written { .. }, Some(json_path)) = (&outcome, json_output) {
        if let Err(e) = outputs::json::write_articles(&articles, json_path).await {
            error!(path = %json_path.display(), error = %e, "Failed to write JSON output");
        }
    }

    Ok(RunReport { outcome, articles })
}
