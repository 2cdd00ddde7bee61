//! News source scrapers for pulling dated article listings.
//!
//! Every source follows the same shape:
//!
//! 1. **Fetching**: Download the source's listing page
//! 2. **Fragments**: Select each repeated article container on the page
//! 3. **Fields**: Pull a title, a link and (optionally) a time phrase
//! 4. **Filtering**: Keep the record if its date matches the target date
//!
//! Only the selectors and the date handling differ between sites, so each site
//! is a small [`SourceExtractor`] implementation and the shared steps live here.
//!
//! # Supported Sources
//!
//! | Source | Module | Dates |
//! |--------|--------|-------|
//! | OurNews | [`ournews`] | Relative ("2 hours ago"), filtered by target date |
//! | ZNS Bahamas | [`zns`] | Not published, every listing kept |
//! | Eyewitness News | [`ewnews`] | Not published, every listing kept |
//!
//! Failures degrade to less data: a failed fetch yields no records for that
//! source and a broken fragment is logged and skipped.

pub mod ewnews;
pub mod ournews;
pub mod zns;

use crate::config::SourceUrls;
use crate::dates::DateError;
use crate::models::{ArticleRecord, PublicationDate, Source};
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error, info, instrument, warn};

/// Turns a time phrase into a date-time relative to a reference instant.
pub type DateResolver = fn(&str, NaiveDateTime) -> Result<NaiveDateTime, DateError>;

/// Failure to download a listing page.
///
/// Never fatal to a run: [`scrape_source`] logs it and the source contributes
/// no records.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection, TLS, body decoding or client construction failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-2xx status.
    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },
}

/// Failure to turn one article fragment into a record.
///
/// Isolated to that fragment: it is logged and extraction moves on.
#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    /// The anchor was found but lacks an attribute the site always sets.
    #[error("Missing required attribute: {0}")]
    MissingAttribute(&'static str),
    /// The anchor's `href` is missing or blank.
    #[error("Article link is empty")]
    EmptyLink,
    /// A dated source produced no time phrase for this fragment.
    #[error("Missing time text for a dated source")]
    MissingTime,
    /// The time phrase could not be resolved to a date.
    #[error(transparent)]
    Date(#[from] DateError),
}

/// Fields pulled out of one article fragment.
///
/// This is the raw output of [`SourceExtractor::extract_fields`]; the shared
/// pipeline validates it and turns it into an [`ArticleRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Headline, already trimmed (may be empty if the markup has none).
    pub title: String,
    /// Link exactly as it appears in the `href` attribute.
    pub link: String,
    /// Raw time phrase, for sources that publish one.
    pub time_text: Option<String>,
}

/// Per-site configuration of the shared extraction steps.
///
/// Implementors only describe *where* things are on their page; fetching,
/// error isolation and date filtering are done once in [`extract_articles`]
/// and [`scrape_source`]. The trait is object safe so the aggregator can hold
/// the sources as `Box<dyn SourceExtractor>`.
pub trait SourceExtractor {
    /// Label stamped on every record this extractor produces.
    fn source(&self) -> Source;

    /// Listing page to fetch.
    fn listing_url(&self) -> &str;

    /// Selector matching one article container.
    fn container(&self) -> &Selector;

    /// Pull the fields out of one container.
    ///
    /// `Ok(None)` means the fragment lacks the elements this site needs and is
    /// skipped without a warning.
    fn extract_fields(&self, fragment: ElementRef<'_>) -> Result<Option<Fragment>, FragmentError>;

    /// Resolver for the site's time phrases; `None` for sites that publish no dates.
    fn date_resolver(&self) -> Option<DateResolver> {
        None
    }
}

/// Downloads listing pages.
///
/// The HTTP transport sits behind this trait so tests can serve pages from
/// memory. Callers only use it generically on the current task, so the
/// returned future carries no `Send` bound.
#[allow(async_fn_in_trait)]
pub trait FetchPage {
    /// Fetch `url` and return the response body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure or a non-success status.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`FetchPage`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests carry `user_agent`.
    ///
    /// No timeout or retry policy is configured; a hanging server blocks the
    /// run.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Request`] if the TLS backend cannot be initialized.
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response.text().await?)
    }
}

/// The three supported sites, in aggregation order.
///
/// # Arguments
///
/// * `urls` - Listing page for each site (built-in defaults or from config)
pub fn default_extractors(urls: &SourceUrls) -> Vec<Box<dyn SourceExtractor>> {
    vec![
        Box::new(ournews::OurNews::new(urls.ournews.clone())),
        Box::new(zns::ZnsBahamas::new(urls.zns.clone())),
        Box::new(ewnews::EyewitnessNews::new(urls.ewnews.clone())),
    ]
}

/// Fetch a source's listing page and extract its matching records.
///
/// # Arguments
///
/// * `fetcher` - Transport used to download the listing page
/// * `extractor` - The site being scraped
/// * `target` - Date a dated source's articles must have been published on
/// * `reference` - Instant relative time phrases are resolved against
///
/// # Returns
///
/// The matching records in page order. A failed fetch is logged and yields
/// an empty vector rather than an error.
#[instrument(level = "info", skip_all, fields(source = %extractor.source(), url = %extractor.listing_url()))]
pub async fn scrape_source<F, E>(
    fetcher: &F,
    extractor: &E,
    target: NaiveDate,
    reference: NaiveDateTime,
) -> Vec<ArticleRecord>
where
    F: FetchPage,
    E: SourceExtractor + ?Sized,
{
    match fetcher.fetch(extractor.listing_url()).await {
        Ok(html) => extract_articles(extractor, &html, target, reference),
        Err(e) => {
            error!(error = %e, source = %extractor.source(), "Fetching listing page failed");
            Vec::new()
        }
    }
}

/// Extract records from an already fetched listing page.
///
/// Each fragment is handled on its own: fragments the site cannot use are
/// skipped silently, broken ones are logged with their index and skipped,
/// and neither stops the remaining fragments from being read.
///
/// # Arguments
///
/// * `extractor` - The site whose selectors and date rules apply
/// * `html` - Raw listing page
/// * `target` - Inclusion date, ignored by sources without dates
/// * `reference` - Instant relative time phrases are resolved against
///
/// # Returns
///
/// The records that survived extraction and date filtering. A page with no
/// matching containers yields an empty vector.
pub fn extract_articles<E>(
    extractor: &E,
    html: &str,
    target: NaiveDate,
    reference: NaiveDateTime,
) -> Vec<ArticleRecord>
where
    E: SourceExtractor + ?Sized,
{
    let source = extractor.source();
    let document = Html::parse_document(html);
    let fragments: Vec<ElementRef<'_>> = document.select(extractor.container()).collect();
    info!(%source, count = fragments.len(), "Found article fragments");

    let mut records = Vec::new();
    for (index, fragment) in fragments.into_iter().enumerate() {
        match build_record(extractor, fragment, target, reference) {
            Ok(Some(record)) => {
                debug!(
                    %source,
                    title = %record.title,
                    link = %record.link,
                    date = %record.publication_date,
                    "Found article"
                );
                records.push(record);
            }
            Ok(None) => {}
            Err(e) => warn!(%source, index, error = %e, "Skipping article fragment"),
        }
    }

    info!(%source, count = records.len(), %target, "Extracted matching articles");
    records
}

fn build_record<E>(
    extractor: &E,
    fragment: ElementRef<'_>,
    target: NaiveDate,
    reference: NaiveDateTime,
) -> Result<Option<ArticleRecord>, FragmentError>
where
    E: SourceExtractor + ?Sized,
{
    let Some(fields) = extractor.extract_fields(fragment)? else {
        return Ok(None);
    };
    if fields.link.trim().is_empty() {
        return Err(FragmentError::EmptyLink);
    }

    let publication_date = match extractor.date_resolver() {
        None => PublicationDate::Unavailable,
        Some(resolve) => {
            let text = fields.time_text.as_deref().ok_or(FragmentError::MissingTime)?;
            let published = resolve(text, reference)?.date();
            if published != target {
                debug!(title = %fields.title, %published, %text, "Article outside target date");
                return Ok(None);
            }
            PublicationDate::Resolved(published)
        }
    };

    Ok(Some(ArticleRecord::new(
        extractor.source(),
        fields.title,
        fields.link,
        publication_date,
    )))
}

/// Collected text of an element with surrounding whitespace removed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory [`FetchPage`] keyed by URL; unknown URLs fail like a 404.
    ///
    /// Every requested URL is recorded, served or not.
    #[derive(Debug, Default)]
    pub(crate) struct StubFetcher {
        pub pages: HashMap<String, String>,
        pub requested: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        pub(crate) fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }
    }

    impl FetchPage for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            })
        }
    }

    static ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("div.item").unwrap());
    static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

    /// Minimal dated extractor over `<div class="item"><a href>title</a>TIME</div>`.
    struct Dated;

    impl SourceExtractor for Dated {
        fn source(&self) -> Source {
            Source::OurNews
        }

        fn listing_url(&self) -> &str {
            "https://example.com/"
        }

        fn container(&self) -> &Selector {
            &ITEM
        }

        fn extract_fields(&self, fragment: ElementRef<'_>) -> Result<Option<Fragment>, FragmentError> {
            let Some(link) = fragment.select(&LINK).next() else {
                return Ok(None);
            };
            Ok(Some(Fragment {
                title: element_text(link),
                link: link.value().attr("href").unwrap_or_default().to_string(),
                time_text: fragment.value().attr("data-time").map(str::to_string),
            }))
        }

        fn date_resolver(&self) -> Option<DateResolver> {
            Some(crate::dates::resolve_relative as DateResolver)
        }
    }

    fn target() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn reference() -> NaiveDateTime {
        target().and_hms_opt(10, 0, 0).unwrap()
    }

    #[test]
    fn test_blank_link_is_skipped() {
        let html = r#"
            <div class="item" data-time="1 hour ago"><a href="  ">Blank</a></div>
            <div class="item" data-time="1 hour ago"><a href="/ok">Ok</a></div>
        "#;

        let records = extract_articles(&Dated, html, target(), reference());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].link, "/ok");
    }

    #[test]
    fn test_malformed_time_is_skipped_not_fatal() {
        let html = r#"
            <div class="item" data-time="some hours ago"><a href="/bad">Bad</a></div>
            <div class="item"><a href="/no-time">No time</a></div>
            <div class="item" data-time="30 minutes ago"><a href="/good">Good</a></div>
        "#;

        let records = extract_articles(&Dated, html, target(), reference());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Good");
        assert_eq!(records[0].publication_date, PublicationDate::Resolved(target()));
    }

    #[tokio::test]
    async fn test_scrape_source_uses_fetched_page() {
        let fetcher = StubFetcher::default().with_page(
            "https://example.com/",
            r#"<div class="item" data-time="2 hours ago"><a href="/a">A</a></div>"#,
        );

        let records = scrape_source(&fetcher, &Dated, target(), reference()).await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source, Source::OurNews);
        assert_eq!(*fetcher.requested.borrow(), vec!["https://example.com/".to_string()]);
    }

    #[tokio::test]
    async fn test_scrape_source_swallows_fetch_errors() {
        let fetcher = StubFetcher::default();

        let records = scrape_source(&fetcher, &Dated, target(), reference()).await;

        assert!(records.is_empty());
    }

    #[test]
    fn test_default_extractors_order() {
        let extractors = default_extractors(&SourceUrls::default());
        let sources: Vec<Source> = extractors.iter().map(|e| e.source()).collect();
        assert_eq!(sources, Source::ALL.to_vec());
    }
}
