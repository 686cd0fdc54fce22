//! Error taxonomy for loading, projecting and rendering the feed.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while obtaining or interpreting the earthquake feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The HTTP request could not complete, timed out, or the server
    /// answered with a non-success status.
    #[error("failed to fetch feed from {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body is not JSON, or is JSON without the expected `features` list.
    #[error("feed body is not a valid earthquake feed: {0}")]
    Parse(#[from] serde_json::Error),

    /// A single feature lacks the geometry or properties a record needs.
    #[error("feature {index} is malformed: {reason}")]
    DataShape { index: usize, reason: String },

    #[error("failed to read feed file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FeedError {
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        FeedError::Network {
            url: url.into(),
            source,
        }
    }

    pub fn data_shape(index: usize, reason: impl Into<String>) -> Self {
        FeedError::DataShape {
            index,
            reason: reason.into(),
        }
    }

    /// Short machine-friendly tag used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::Network { .. } => "network_error",
            FeedError::Parse(_) => "parse_error",
            FeedError::DataShape { .. } => "data_shape_error",
            FeedError::Io { .. } => "io_error",
        }
    }
}

/// Failure while handing a chart to a rendering backend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to draw {chart}: {message}")]
    Draw { chart: String, message: String },

    #[error("failed to encode chart descriptors: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RenderError {
    pub(crate) fn draw(chart: &str, err: impl std::fmt::Display) -> Self {
        RenderError::Draw {
            chart: chart.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_shape_message_names_feature() {
        let err = FeedError::data_shape(7, "missing time");
        assert_eq!(err.to_string(), "feature 7 is malformed: missing time");
        assert_eq!(err.kind(), "data_shape_error");
    }

    #[test]
    fn test_parse_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FeedError = serde_err.into();
        assert_eq!(err.kind(), "parse_error");
        assert!(err.to_string().starts_with("feed body is not a valid earthquake feed"));
    }
}
