//! OurNews latest-news scraper.
//!
//! This module reads the [OurNews](https://ournews.bs/latest-news/) listing,
//! which shows each story as an `li.mvp-blog-story-wrap` with a link and a
//! relative time such as `"3 hours ago"` in `span.mvp-cd-date`.
//!
//! This is the only source with usable dates, so it is the only one whose
//! listings are filtered by the target date.

use super::{DateResolver, Fragment, FragmentError, SourceExtractor, element_text};
use crate::dates::resolve_relative;
use crate::models::Source;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

/// Default listing page.
pub const LISTING_URL: &str = "https://ournews.bs/latest-news/";

static STORY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li.mvp-blog-story-wrap").expect("valid story selector"));
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid link selector"));
static DATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.mvp-cd-date").expect("valid date selector"));

/// Extractor for the OurNews latest-news listing.
///
/// The only dated source: listings whose relative time does not fall on the
/// target date are dropped.
#[derive(Debug, Clone)]
pub struct OurNews {
    /// Page fetched for listings.
    listing_url: String,
}

impl OurNews {
    /// Read listings from `listing_url` instead of the built-in [`LISTING_URL`].
    pub fn new(listing_url: String) -> Self {
        Self { listing_url }
    }
}

impl Default for OurNews {
    fn default() -> Self {
        Self::new(LISTING_URL.to_string())
    }
}

impl SourceExtractor for OurNews {
    fn source(&self) -> Source {
        Source::OurNews
    }

    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn container(&self) -> &Selector {
        &STORY
    }

    fn extract_fields(&self, fragment: ElementRef<'_>) -> Result<Option<Fragment>, FragmentError> {
        let (Some(link), Some(date)) = (fragment.select(&LINK).next(), fragment.select(&DATE).next())
        else {
            return Ok(None);
        };

        let href = link
            .value()
            .attr("href")
            .ok_or(FragmentError::MissingAttribute("href"))?;

        Ok(Some(Fragment {
            title: element_text(link),
            link: href.to_string(),
            time_text: Some(element_text(date)),
        }))
    }

    fn date_resolver(&self) -> Option<DateResolver> {
        Some(resolve_relative as DateResolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PublicationDate;
    use crate::scrapers::extract_articles;
    use chrono::{NaiveDate, NaiveDateTime};

    fn target() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn reference() -> NaiveDateTime {
        target().and_hms_opt(10, 0, 0).unwrap()
    }

    fn story(href: &str, title: &str, when: &str) -> String {
        format!(
            r#"<li class="mvp-blog-story-wrap left relative infinite-post">
                 <a href="{href}" rel="bookmark">
                   <div class="mvp-blog-story-text"><h2>{title}</h2></div>
                 </a>
                 <div class="mvp-cat-date-wrap"><span class="mvp-cd-date">{when}</span></div>
               </li>"#
        )
    }

    fn page(stories: &[String]) -> String {
        format!(
            r#"<html><body><ul class="mvp-blog-story-list">{}</ul></body></html>"#,
            stories.concat()
        )
    }

    #[test]
    fn test_keeps_only_target_date() {
        let html = page(&[
            story("https://ournews.bs/fresh/", "Fresh story", "2 hours ago"),
            story("https://ournews.bs/old/", "Old story", "2 days ago"),
        ]);

        let records = extract_articles(&OurNews::default(), &html, target(), reference());

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.source, Source::OurNews);
        assert_eq!(record.title, "Fresh story");
        assert_eq!(record.link, "https://ournews.bs/fresh/");
        assert_eq!(record.publication_date, PublicationDate::Resolved(target()));
    }

    #[test]
    fn test_minutes_and_unknown_units_count_as_today() {
        let html = page(&[
            story("/a/", "Minutes", "45 minutes ago"),
            story("/b/", "Weeks", "3 weeks ago"),
        ]);

        let records = extract_articles(&OurNews::default(), &html, target(), reference());

        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Minutes", "Weeks"]);
    }

    #[test]
    fn test_missing_anchor_does_not_stop_later_fragments() {
        let broken = r#"<li class="mvp-blog-story-wrap">
                          <span class="mvp-cd-date">1 hour ago</span>
                        </li>"#
            .to_string();
        let html = page(&[
            broken,
            story("/after/", "After the broken one", "1 hour ago"),
        ]);

        let records = extract_articles(&OurNews::default(), &html, target(), reference());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].link, "/after/");
    }

    #[test]
    fn test_missing_date_span_is_skipped() {
        let html = page(&[
            r#"<li class="mvp-blog-story-wrap"><a href="/undated/">Undated</a></li>"#.to_string(),
        ]);

        let records = extract_articles(&OurNews::default(), &html, target(), reference());

        assert!(records.is_empty());
    }

    #[test]
    fn test_unparseable_time_is_skipped() {
        let html = page(&[
            story("/bad/", "Bad time", "Yesterday"),
            story("/good/", "Good time", "5 minutes ago"),
        ]);

        let records = extract_articles(&OurNews::default(), &html, target(), reference());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Good time");
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        let html = "<html><body><p>Nothing here</p></body></html>";

        let records = extract_articles(&OurNews::default(), html, target(), reference());

        assert!(records.is_empty());
    }
}
