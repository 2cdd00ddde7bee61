//! Optional YAML configuration.
//!
//! Every field is optional; anything left out falls back to the built-in
//! defaults, and CLI flags win over the file.
//!
//! ```yaml
//! output: data/news_articles.csv
//! user_agent: news_date_scraper/0.1
//! sources:
//!   ournews: https://ournews.bs/latest-news/
//!   zns: https://znsbahamas.com/category/news/
//!   ewnews: https://ewnews.com/
//! ```

use crate::scrapers::{ewnews, ournews, zns};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use url::Url;

/// CSV file written when neither the config file nor the CLI names one.
pub const DEFAULT_OUTPUT: &str = "news_articles.csv";
/// User-Agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("news_date_scraper/", env!("CARGO_PKG_VERSION"));

/// Errors raised while loading the YAML configuration.
///
/// These are fatal: a config file that was asked for but cannot be used ends
/// the run before any network activity.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not valid YAML or has fields of the wrong type.
    #[error("Failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// A listing URL is not an absolute URL.
    #[error("Invalid listing URL for {name}: {url} ({source})")]
    InvalidUrl {
        name: &'static str,
        url: String,
        source: url::ParseError,
    },
}

/// Listing page for each source.
///
/// Overriding a URL is useful for mirrors or local captures; the selectors
/// applied to the page stay the same.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceUrls {
    /// OurNews latest-news listing.
    pub ournews: String,
    /// ZNS Bahamas news category listing.
    pub zns: String,
    /// Eyewitness News homepage.
    pub ewnews: String,
}

impl Default for SourceUrls {
    fn default() -> Self {
        Self {
            ournews: ournews::LISTING_URL.to_string(),
            zns: zns::LISTING_URL.to_string(),
            ewnews: ewnews::LISTING_URL.to_string(),
        }
    }
}

impl SourceUrls {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [
            ("ournews", &self.ournews),
            ("zns", &self.zns),
            ("ewnews", &self.ewnews),
        ] {
            Url::parse(url).map_err(|source| ConfigError::InvalidUrl {
                name,
                url: url.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

/// Run configuration after merging the YAML file over the defaults.
///
/// CLI flags are applied on top of this in `main`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CSV file to overwrite with the run's results.
    pub output: PathBuf,
    /// User-Agent header for every listing request.
    pub user_agent: String,
    /// Listing page per source.
    pub sources: SourceUrls,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            sources: SourceUrls::default(),
        }
    }
}

impl Config {
    /// Parse a configuration from YAML text.
    ///
    /// Missing fields keep their defaults and an empty document yields
    /// [`Config::default`].
    ///
    /// # Arguments
    ///
    /// * `yaml` - The YAML document
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] for malformed YAML and
    /// [`ConfigError::InvalidUrl`] if a listing URL does not parse.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.sources.validate()?;
        Ok(config)
    }

    /// Read and parse the configuration file at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the YAML file
    ///
    /// # Returns
    ///
    /// The merged [`Config`], or an error if the file cannot be read or parsed.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] when the file is unreadable, plus every error of
    /// [`Config::from_yaml`].
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&yaml)?;
        info!(output = %config.output.display(), "Loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output, PathBuf::from("news_articles.csv"));
        assert_eq!(config.sources.ournews, "https://ournews.bs/latest-news/");
        assert_eq!(config.sources.zns, "https://znsbahamas.com/category/news/");
        assert_eq!(config.sources.ewnews, "https://ewnews.com/");
        assert!(config.user_agent.starts_with("news_date_scraper/"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml(
            r#"
output: out/today.csv
sources:
  zns: https://mirror.example.com/zns/
"#,
        )
        .unwrap();

        assert_eq!(config.output, PathBuf::from("out/today.csv"));
        assert_eq!(config.sources.zns, "https://mirror.example.com/zns/");
        assert_eq!(config.sources.ournews, ournews::LISTING_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = Config::from_yaml("sources:\n  ewnews: not a url\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { name: "ewnews", .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "user_agent: test-agent").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
