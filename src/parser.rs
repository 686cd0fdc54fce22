//! JSON parser for the earthquake GeoJSON feed.

use crate::error::FeedError;
use crate::feed::RawFeed;

/// Decodes a GeoJSON `FeatureCollection` into a [`RawFeed`].
///
/// # Errors
///
/// Returns [`FeedError::Parse`] if the bytes are not JSON or the document
/// has no `features` array.
pub fn parse_feed(bytes: &[u8]) -> Result<RawFeed, FeedError> {
    Ok(serde_json::from_slice(bytes)?)
}
