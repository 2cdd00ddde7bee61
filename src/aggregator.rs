//! Runs every source extractor and combines their output.

use crate::models::ArticleRecord;
use crate::scrapers::{FetchPage, SourceExtractor, scrape_source};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, instrument};

/// Scrape each source in order and concatenate the results.
///
/// Records are not deduplicated; the same link from two sources yields two
/// records. A source that fails contributes nothing and does not affect the
/// others.
#[instrument(level = "info", skip(fetcher, extractors), fields(sources = extractors.len()))]
pub async fn collect_articles<F: FetchPage>(
    fetcher: &F,
    extractors: &[Box<dyn SourceExtractor>],
    target: NaiveDate,
    reference: NaiveDateTime,
) -> Vec<ArticleRecord> {
    let mut articles = Vec::new();
    for extractor in extractors {
        let batch = scrape_source(fetcher, extractor.as_ref(), target, reference).await;
        info!(source = %extractor.source(), count = batch.len(), "Source finished");
        articles.extend(batch);
    }
    info!(count = articles.len(), "Total matching articles");
    articles
}
