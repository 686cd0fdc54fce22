//! Typed view of the USGS GeoJSON summary feed.
//!
//! Only the fields the charts need are modelled. The document must be a JSON
//! object with a `features` array; below that, every field is read leniently.
//! A null or mis-typed value becomes `None` (or the empty default) instead of
//! failing the whole document, and the record projector decides what to do
//! with the gaps.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeed {
    #[serde(default, deserialize_with = "lenient")]
    pub metadata: Option<FeedMetadata>,
    #[serde(deserialize_with = "lenient_features")]
    pub features: Vec<RawFeature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedMetadata {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    /// Epoch milliseconds at which USGS generated the document.
    #[serde(default, deserialize_with = "epoch_millis")]
    pub generated: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub count: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeature {
    #[serde(default, deserialize_with = "lenient")]
    pub geometry: Option<RawGeometry>,
    /// `null` or a non-object reads as empty properties.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub properties: RawProperties,
}

/// Point geometry stored as `[longitude, latitude, depth]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGeometry {
    #[serde(default)]
    pub coordinates: Vec<Option<f64>>,
}

impl RawGeometry {
    pub fn longitude(&self) -> Option<f64> {
        self.coordinate(0)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinate(1)
    }

    pub fn depth(&self) -> Option<f64> {
        self.coordinate(2)
    }

    fn coordinate(&self, index: usize) -> Option<f64> {
        self.coordinates
            .get(index)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProperties {
    #[serde(default, deserialize_with = "lenient")]
    pub mag: Option<f64>,
    /// Event origin time, epoch milliseconds.
    #[serde(default, deserialize_with = "epoch_millis")]
    pub time: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub place: Option<String>,
}

/// Reads any JSON value and keeps it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Integer milliseconds, or a whole float such as `1.7e12`.
fn epoch_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|v| v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64)
            .map(|v| v as i64)
    }))
}

/// A feature that is not an object keeps its slot as an empty feature, so
/// indices in later errors still match the document.
fn lenient_features<'de, D>(deserializer: D) -> Result<Vec<RawFeature>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap_or_default())
        .collect())
}
