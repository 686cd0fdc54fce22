//! Record projector: turns raw feed features into [`EarthquakeRecord`]s.

use crate::error::FeedError;
use crate::feed::{RawFeature, RawFeed};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

/// One seismic event, normalized from a feed feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeRecord {
    pub time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    /// Kilometers below the surface.
    pub depth: Option<f64>,
    pub magnitude: Option<f64>,
    pub place: Option<String>,
}

/// What to do with a feature that cannot become a record.
///
/// Missing magnitude or depth never makes a feature malformed; missing or
/// out-of-range latitude/longitude and a missing or unrepresentable time do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Drop the feature and log a warning.
    #[default]
    Skip,
    /// Abort on the first malformed feature.
    FailFast,
}

impl EarthquakeRecord {
    /// Builds a record from the feature at position `index` in the feed.
    pub fn from_feature(index: usize, feature: &RawFeature) -> Result<Self, FeedError> {
        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| FeedError::data_shape(index, "missing geometry"))?;

        let longitude = geometry
            .longitude()
            .ok_or_else(|| FeedError::data_shape(index, "missing longitude"))?;
        let latitude = geometry
            .latitude()
            .ok_or_else(|| FeedError::data_shape(index, "missing latitude"))?;

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(FeedError::data_shape(
                index,
                format!("longitude {longitude} out of range"),
            ));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(FeedError::data_shape(
                index,
                format!("latitude {latitude} out of range"),
            ));
        }

        let millis = feature
            .properties
            .time
            .ok_or_else(|| FeedError::data_shape(index, "missing time"))?;
        let time = DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| FeedError::data_shape(index, format!("time {millis} out of range")))?;

        Ok(EarthquakeRecord {
            time,
            latitude,
            longitude,
            depth: geometry.depth(),
            magnitude: feature.properties.mag.filter(|m| m.is_finite()),
            place: feature.properties.place.clone(),
        })
    }

    /// UTC calendar day of the event, `YYYY-MM-DD`.
    pub fn day_key(&self) -> String {
        self.time.format("%Y-%m-%d").to_string()
    }
}

/// Projects every feature, skipping malformed ones.
pub fn project(feed: &RawFeed) -> Vec<EarthquakeRecord> {
    feed.features
        .iter()
        .enumerate()
        .filter_map(|(index, feature)| match EarthquakeRecord::from_feature(index, feature) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "Skipping malformed feature");
                None
            }
        })
        .collect()
}

/// Projects every feature under the given policy. Output order is feed order.
pub fn project_with(
    feed: &RawFeed,
    policy: MalformedPolicy,
) -> Result<Vec<EarthquakeRecord>, FeedError> {
    match policy {
        MalformedPolicy::Skip => Ok(project(feed)),
        MalformedPolicy::FailFast => feed
            .features
            .iter()
            .enumerate()
            .map(|(index, feature)| EarthquakeRecord::from_feature(index, feature))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{RawGeometry, RawProperties};

    fn feature(coordinates: Vec<Option<f64>>, mag: Option<f64>, time: Option<i64>) -> RawFeature {
        RawFeature {
            geometry: Some(RawGeometry { coordinates }),
            properties: RawProperties {
                mag,
                time,
                place: None,
            },
        }
    }

    fn feed(features: Vec<RawFeature>) -> RawFeed {
        RawFeed {
            metadata: None,
            features,
        }
    }

    #[test]
    fn test_projects_single_feature() {
        let feed = feed(vec![feature(
            vec![Some(10.0), Some(20.0), Some(5.0)],
            Some(3.4),
            Some(1_700_000_000_000),
        )]);

        let records = project(&feed);

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.longitude, 10.0);
        assert_eq!(r.latitude, 20.0);
        assert_eq!(r.depth, Some(5.0));
        assert_eq!(r.magnitude, Some(3.4));
        assert_eq!(
            r.time.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "2023-11-14T22:13:20.000Z"
        );
        assert_eq!(r.day_key(), "2023-11-14");
    }

    #[test]
    fn test_preserves_feed_order_and_length() {
        let features = (0..5)
            .map(|i| {
                feature(
                    vec![Some(i as f64), Some(0.0), Some(1.0)],
                    Some(1.0),
                    Some(1_700_000_000_000 - i * 1000),
                )
            })
            .collect();
        let records = project(&feed(features));

        assert_eq!(records.len(), 5);
        for (i, r) in records.iter().enumerate() {
            assert_eq!(r.longitude, i as f64);
        }
    }

    #[test]
    fn test_missing_magnitude_and_depth_are_kept_as_none() {
        let feed = feed(vec![feature(
            vec![Some(1.0), Some(2.0)],
            None,
            Some(1_700_000_000_000),
        )]);

        let records = project(&feed);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].magnitude, None);
        assert_eq!(records[0].depth, None);
    }

    #[test]
    fn test_skip_policy_drops_malformed_and_keeps_order() {
        let feed = feed(vec![
            feature(vec![Some(1.0), Some(1.0), Some(1.0)], Some(1.0), Some(0)),
            feature(vec![Some(2.0), Some(2.0), Some(2.0)], Some(2.0), None),
            RawFeature::default(),
            feature(vec![Some(3.0), Some(95.0), Some(3.0)], Some(3.0), Some(0)),
            feature(vec![Some(4.0), Some(4.0), Some(4.0)], Some(4.0), Some(0)),
        ]);

        let records = project_with(&feed, MalformedPolicy::Skip).unwrap();

        let longitudes: Vec<f64> = records.iter().map(|r| r.longitude).collect();
        assert_eq!(longitudes, vec![1.0, 4.0]);
    }

    #[test]
    fn test_fail_fast_reports_first_malformed_index() {
        let feed = feed(vec![
            feature(vec![Some(1.0), Some(1.0), Some(1.0)], Some(1.0), Some(0)),
            feature(vec![Some(2.0), None, Some(2.0)], Some(2.0), Some(0)),
            RawFeature::default(),
        ]);

        let err = project_with(&feed, MalformedPolicy::FailFast).unwrap_err();
        match err {
            FeedError::DataShape { index, reason } => {
                assert_eq!(index, 1);
                assert_eq!(reason, "missing latitude");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fail_fast_on_clean_feed_matches_skip() {
        let feed = feed(vec![
            feature(vec![Some(1.0), Some(1.0), Some(1.0)], Some(1.0), Some(0)),
            feature(vec![Some(2.0), Some(2.0), None], None, Some(86_400_000)),
        ]);

        let strict = project_with(&feed, MalformedPolicy::FailFast).unwrap();
        assert_eq!(strict, project(&feed));
    }

    #[test]
    fn test_out_of_range_time_is_malformed() {
        let f = feature(vec![Some(1.0), Some(1.0)], Some(1.0), Some(i64::MAX));
        let err = EarthquakeRecord::from_feature(0, &f).unwrap_err();
        assert_eq!(err.kind(), "data_shape_error");
    }

    #[test]
    fn test_null_properties_only_drop_their_feature() {
        let feed = crate::parser::parse_feed(
            br#"{"features": [
                {"properties": {"mag": 3.4, "time": 1700000000000}, "geometry": {"coordinates": [10, 20, 5]}},
                {"properties": null, "geometry": {"coordinates": [11, 21, 6]}},
                {"properties": {"mag": "4.1", "time": 1.7e12}, "geometry": {"coordinates": [12, 22, 7]}}
            ]}"#,
        )
        .unwrap();

        let records = project_with(&feed, MalformedPolicy::Skip).unwrap();
        let longitudes: Vec<f64> = records.iter().map(|r| r.longitude).collect();
        assert_eq!(longitudes, vec![10.0, 12.0]);
        assert_eq!(records[1].magnitude, None);

        match project_with(&feed, MalformedPolicy::FailFast).unwrap_err() {
            FeedError::DataShape { index, reason } => {
                assert_eq!(index, 1);
                assert_eq!(reason, "missing time");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
