//! Eyewitness News homepage scraper.
//!
//! [Eyewitness News](https://ewnews.com/) renders stories as `article.jeg_post`.
//! The headline is usually the link's `aria-label`; when that is blank the link
//! text is used instead. No publication time is shown, so every listing is kept.

use super::{Fragment, FragmentError, SourceExtractor, element_text};
use crate::models::Source;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

/// Default listing page.
pub const LISTING_URL: &str = "https://ewnews.com/";

static POST: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article.jeg_post").expect("valid post selector"));
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid link selector"));

/// Extractor for the Eyewitness News homepage.
///
/// Every listing is kept; the site shows no publication time.
#[derive(Debug, Clone)]
pub struct EyewitnessNews {
    /// Page fetched for listings.
    listing_url: String,
}

impl EyewitnessNews {
    /// Read listings from `listing_url` instead of the built-in [`LISTING_URL`].
    pub fn new(listing_url: String) -> Self {
        Self { listing_url }
    }
}

impl Default for EyewitnessNews {
    fn default() -> Self {
        Self::new(LISTING_URL.to_string())
    }
}

impl SourceExtractor for EyewitnessNews {
    fn source(&self) -> Source {
        Source::EyewitnessNews
    }

    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn container(&self) -> &Selector {
        &POST
    }

    fn extract_fields(&self, fragment: ElementRef<'_>) -> Result<Option<Fragment>, FragmentError> {
        let Some(link) = fragment.select(&LINK).next() else {
            return Ok(None);
        };

        let mut title = link.value().attr("aria-label").unwrap_or_default().trim().to_string();
        if title.is_empty() {
            title = element_text(link);
        }

        Ok(Some(Fragment {
            title,
            link: link.value().attr("href").unwrap_or_default().to_string(),
            time_text: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PublicationDate;
    use crate::scrapers::extract_articles;
    use chrono::NaiveDate;

    #[test]
    fn test_title_prefers_aria_label() {
        let html = r#"
            <div class="jeg_posts">
              <article class="jeg_post jeg_pl_md_2 format-standard">
                <div class="jeg_thumb">
                  <a href="https://ewnews.com/labelled" aria-label="Labelled headline"><img src="x.jpg"></a>
                </div>
              </article>
              <article class="jeg_post">
                <a href="https://ewnews.com/text" aria-label="  ">  Text headline </a>
              </article>
              <article class="jeg_post"><h3>No link at all</h3></article>
              <article class="jeg_post">
                <a href="/relative-link">Relative</a>
              </article>
            </div>
        "#;
        let target = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let reference = target.and_hms_opt(10, 0, 0).unwrap();

        let records = extract_articles(&EyewitnessNews::default(), html, target, reference);

        let pairs: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.title.as_str(), r.link.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Labelled headline", "https://ewnews.com/labelled"),
                ("Text headline", "https://ewnews.com/text"),
                ("Relative", "/relative-link"),
            ]
        );
        assert!(records
            .iter()
            .all(|r| r.publication_date == PublicationDate::Unavailable));
    }

    #[test]
    fn test_no_posts_yields_nothing() {
        let target = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let reference = target.and_hms_opt(10, 0, 0).unwrap();

        let records = extract_articles(
            &EyewitnessNews::default(),
            "<html><body></body></html>",
            target,
            reference,
        );

        assert!(records.is_empty());
    }
}
