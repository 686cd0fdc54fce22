//! Feed loader: one GET (or one file read) per call, no retries, no caching.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use crate::config::FeedSource;
use crate::error::FeedError;
use crate::feed::RawFeed;
use crate::parser::parse_feed;
use reqwest::Url;
use tracing::debug;

/// Issues a GET against `url` and returns the body bytes.
///
/// Transport failures, timeouts and non-success statuses all surface as
/// [`FeedError::Network`].
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &Url) -> Result<Vec<u8>, FeedError> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.clone());

    let resp = client
        .execute(req)
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|e| FeedError::network(url.as_str(), e))?;

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| FeedError::network(url.as_str(), e))?;
    Ok(bytes.to_vec())
}

/// Loads and parses the feed from `source`.
#[tracing::instrument(skip_all, fields(source = %source))]
pub async fn load_feed<C: HttpClient>(client: &C, source: &FeedSource) -> Result<RawFeed, FeedError> {
    let bytes = match source {
        FeedSource::Url(url) => fetch_bytes(client, url).await?,
        FeedSource::File(path) => {
            tokio::fs::read(path).await.map_err(|e| FeedError::Io {
                path: path.clone(),
                source: e,
            })?
        }
    };
    debug!(bytes = bytes.len(), "Feed bytes received, parsing");

    let feed = parse_feed(&bytes)?;
    debug!(features = feed.features.len(), "Feed parsed successfully");
    Ok(feed)
}
