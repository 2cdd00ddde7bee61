//! Data models for scraped article listings.
//!
//! This module defines the structures passed between the pipeline stages:
//! - [`Source`]: Which news site produced a record
//! - [`PublicationDate`]: A resolved calendar date, or the "unavailable" marker
//! - [`ArticleRecord`]: One article listing extracted from a page fragment

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Literal written in place of a date for sources that do not publish one.
pub const DATE_NOT_AVAILABLE: &str = "Date not available";

/// The news sites the scraper knows how to read.
///
/// The declaration order is the aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Source {
    #[serde(rename = "OurNews")]
    OurNews,
    #[serde(rename = "ZNS Bahamas")]
    ZnsBahamas,
    #[serde(rename = "Eyewitness News")]
    EyewitnessNews,
}

impl Source {
    /// All sources, in aggregation order.
    pub const ALL: [Source; 3] = [Source::OurNews, Source::ZnsBahamas, Source::EyewitnessNews];

    /// Label written to the `source` column.
    pub fn label(&self) -> &'static str {
        match self {
            Source::OurNews => "OurNews",
            Source::ZnsBahamas => "ZNS Bahamas",
            Source::EyewitnessNews => "Eyewitness News",
        }
    }

    /// Human-facing name used in the run summary.
    ///
    /// Differs from [`Source::label`] only for OurNews, which the site itself
    /// writes as two words.
    pub fn display_name(&self) -> &'static str {
        match self {
            Source::OurNews => "Our News",
            other => other.label(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Publication date of an article as far as the source lets us know it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationDate {
    /// Calendar date derived from the page, already matched to the target date.
    Resolved(NaiveDate),
    /// The source publishes no usable time; written as [`DATE_NOT_AVAILABLE`].
    Unavailable,
}

impl fmt::Display for PublicationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicationDate::Resolved(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PublicationDate::Unavailable => f.write_str(DATE_NOT_AVAILABLE),
        }
    }
}

/// A single article listing scraped from a news site.
///
/// Records are built by an extractor and left untouched afterwards, except for
/// `last_updated`, which persistence stamps once for the whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// Site the listing was scraped from.
    pub source: Source,
    /// Headline; empty only if the markup offered no title at all.
    pub title: String,
    /// Link exactly as it appears in the markup (relative or absolute).
    pub link: String,
    /// Date the article was published, when the source tells us.
    pub publication_date: PublicationDate,
    /// Run timestamp, set once by [`stamp_batch`] at persistence time.
    last_updated: Option<NaiveDateTime>,
}

impl ArticleRecord {
    /// Create an unstamped record.
    ///
    /// # Arguments
    ///
    /// * `source` - Site that produced the record
    /// * `title` - Headline text
    /// * `link` - Link taken verbatim from the markup
    /// * `publication_date` - Resolved date or [`PublicationDate::Unavailable`]
    pub fn new(
        source: Source,
        title: String,
        link: String,
        publication_date: PublicationDate,
    ) -> Self {
        Self {
            source,
            title,
            link,
            publication_date,
            last_updated: None,
        }
    }

    /// Timestamp of the run that wrote this record, `None` before persistence.
    pub fn last_updated(&self) -> Option<NaiveDateTime> {
        self.last_updated
    }
}

/// Stamp every record of a batch with the same run timestamp.
///
/// # Arguments
///
/// * `records` - The whole batch about to be written
/// * `at` - The single timestamp shared by every record
pub fn stamp_batch(records: &mut [ArticleRecord], at: NaiveDateTime) {
    for record in records.iter_mut() {
        record.last_updated = Some(at);
    }
}
