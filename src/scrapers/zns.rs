//! ZNS Bahamas news category scraper.
//!
//! The [ZNS](https://znsbahamas.com/category/news/) listing wraps each story in
//! `div.feat-holder` with an `a.p-flink` whose `title` attribute carries the
//! headline. No publication time is shown, so every listing is kept.

use super::{Fragment, FragmentError, SourceExtractor};
use crate::models::Source;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

/// Default listing page.
pub const LISTING_URL: &str = "https://znsbahamas.com/category/news/";

static HOLDER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.feat-holder").expect("valid holder selector"));
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a.p-flink").expect("valid link selector"));

/// Extractor for the ZNS Bahamas news category.
///
/// Titles come from the `title` attribute of `a.p-flink`; every listing is
/// kept with [`PublicationDate::Unavailable`](crate::models::PublicationDate::Unavailable).
#[derive(Debug, Clone)]
pub struct ZnsBahamas {
    /// Page fetched for listings.
    listing_url: String,
}

impl ZnsBahamas {
    /// Read listings from `listing_url` instead of the built-in [`LISTING_URL`].
    pub fn new(listing_url: String) -> Self {
        Self { listing_url }
    }
}

impl Default for ZnsBahamas {
    fn default() -> Self {
        Self::new(LISTING_URL.to_string())
    }
}

impl SourceExtractor for ZnsBahamas {
    fn source(&self) -> Source {
        Source::ZnsBahamas
    }

    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn container(&self) -> &Selector {
        &HOLDER
    }

    fn extract_fields(&self, fragment: ElementRef<'_>) -> Result<Option<Fragment>, FragmentError> {
        let Some(link) = fragment.select(&LINK).next() else {
            return Ok(None);
        };
        let attrs = link.value();

        Ok(Some(Fragment {
            title: attrs.attr("title").unwrap_or_default().trim().to_string(),
            link: attrs.attr("href").unwrap_or_default().to_string(),
            time_text: None,
        }))
    }
}
