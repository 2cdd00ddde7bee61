//! Output generation for collected articles.
//!
//! # Submodules
//!
//! - [`csv`]: Writes the batch to the CSV file (the primary output)
//! - [`json`]: Optionally writes the same rows as a JSON array
//!
//! Both formats share [`ArticleRow`], so their columns never drift apart:
//!
//! ```text
//! source,title,link,date,last_updated
//! OurNews,Some headline,https://ournews.bs/some-headline/,2024-03-15,2024-03-15 10:00:00
//! ZNS Bahamas,Other headline,https://znsbahamas.com/other/,Date not available,2024-03-15 10:00:00
//! ```

pub mod csv;
pub mod json;

use crate::models::ArticleRecord;
use serde::Serialize;

/// Format of the `last_updated` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One output row, in column order.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ArticleRow<'a> {
    pub source: &'a str,
    pub title: &'a str,
    pub link: &'a str,
    pub date: String,
    pub last_updated: String,
}

impl<'a> From<&'a ArticleRecord> for ArticleRow<'a> {
    fn from(record: &'a ArticleRecord) -> Self {
        Self {
            source: record.source.label(),
            title: &record.title,
            link: &record.link,
            date: record.publication_date.to_string(),
            last_updated: record
                .last_updated()
                .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }
}
