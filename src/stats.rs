use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::assemblers::class::{MAGNITUDE_CLASSES, magnitude_class};
use crate::assemblers::utility::{mean, min_max, stddev};
use crate::record::EarthquakeRecord;

/// Overview of one projected feed, logged before charts are built.
#[derive(Debug, Default, Serialize)]
pub struct FeedSummary {
    pub total_features: usize,
    pub records: usize,
    pub skipped: usize,

    pub missing_magnitude: usize,
    pub missing_depth: usize,

    pub magnitude_mean: f64,
    pub magnitude_stddev: f64,
    pub magnitude_min: Option<f64>,
    pub magnitude_max: Option<f64>,

    pub first_event: Option<DateTime<Utc>>,
    pub last_event: Option<DateTime<Utc>>,

    pub by_class: BTreeMap<&'static str, usize>,
}

impl FeedSummary {
    pub fn from_records(total_features: usize, records: &[EarthquakeRecord]) -> Self {
        let magnitudes: Vec<f64> = records.iter().filter_map(|r| r.magnitude).collect();
        let magnitude_mean = mean(&magnitudes);
        let range = min_max(&magnitudes);

        let mut by_class: BTreeMap<&'static str, usize> =
            MAGNITUDE_CLASSES.iter().map(|c| (*c, 0)).collect();
        for m in &magnitudes {
            *by_class.entry(magnitude_class(*m)).or_default() += 1;
        }

        FeedSummary {
            total_features,
            records: records.len(),
            skipped: total_features.saturating_sub(records.len()),
            missing_magnitude: records.len() - magnitudes.len(),
            missing_depth: records.iter().filter(|r| r.depth.is_none()).count(),
            magnitude_mean,
            magnitude_stddev: stddev(&magnitudes, magnitude_mean),
            magnitude_min: range.map(|(lo, _)| lo),
            magnitude_max: range.map(|(_, hi)| hi),
            first_event: records.iter().map(|r| r.time).min(),
            last_event: records.iter().map(|r| r.time).max(),
            by_class,
        }
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn magnitude_coverage_pct(&self) -> f64 {
        Self::pct(self.records - self.missing_magnitude, self.records)
    }
}
