//! Feed loader configuration: where to read the feed from and how long to wait.

use anyhow::{Result, bail};
use reqwest::Url;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// USGS summary feed covering all events of the past seven days.
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const FEED_URL_ENV: &str = "QUAKE_FEED_URL";
pub const TIMEOUT_ENV: &str = "QUAKE_FEED_TIMEOUT_SECS";

/// Where the feed document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(Url),
    File(PathBuf),
}

impl FeedSource {
    /// Treats `http://` and `https://` input as a URL and everything else as
    /// a local path.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            bail!("feed source must not be empty");
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(FeedSource::Url(Url::parse(raw)?))
        } else {
            Ok(FeedSource::File(PathBuf::from(raw)))
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Url(url) => write!(f, "{url}"),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub source: FeedSource,
    pub timeout: Duration,
}

impl LoaderConfig {
    pub fn new(source: &str, timeout_secs: u64) -> Result<Self> {
        if timeout_secs == 0 {
            bail!("request timeout must be at least one second");
        }
        Ok(Self {
            source: FeedSource::parse(source)?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            source: FeedSource::Url(
                Url::parse(DEFAULT_FEED_URL).expect("default feed URL is valid"),
            ),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
