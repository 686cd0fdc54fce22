//! Chart assemblers.
//!
//! Each assembler takes the projected records and derives the series one
//! chart needs. [`Chart`] ties the four together so the pipeline and the
//! renderers can treat them uniformly.

pub mod class;
pub mod geographic;
pub mod histogram;
pub mod scatter;
pub mod timeseries;
pub mod types;
pub mod utility;

use crate::record::EarthquakeRecord;
use geographic::GeoChart;
use histogram::HistogramChart;
use scatter::ScatterChart;
use timeseries::{DayOrder, TimeSeriesChart};
use types::ChartDescriptor;

/// Identifies one of the four charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartId {
    WorldMap,
    MagnitudeHistogram,
    DailyCounts,
    MagnitudeVsDepth,
}

impl ChartId {
    pub const ALL: [ChartId; 4] = [
        ChartId::WorldMap,
        ChartId::MagnitudeHistogram,
        ChartId::DailyCounts,
        ChartId::MagnitudeVsDepth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartId::WorldMap => geographic::CHART_ID,
            ChartId::MagnitudeHistogram => histogram::CHART_ID,
            ChartId::DailyCounts => timeseries::CHART_ID,
            ChartId::MagnitudeVsDepth => scatter::CHART_ID,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Geo(GeoChart),
    Histogram(HistogramChart),
    TimeSeries(TimeSeriesChart),
    Scatter(ScatterChart),
}

impl Chart {
    /// Runs the assembler for `id` over `records`.
    pub fn assemble(id: ChartId, records: &[EarthquakeRecord], order: DayOrder) -> Self {
        match id {
            ChartId::WorldMap => Chart::Geo(geographic::assemble(records)),
            ChartId::MagnitudeHistogram => Chart::Histogram(histogram::assemble(records)),
            ChartId::DailyCounts => Chart::TimeSeries(timeseries::assemble(records, order)),
            ChartId::MagnitudeVsDepth => Chart::Scatter(scatter::assemble(records)),
        }
    }

    pub fn id(&self) -> ChartId {
        match self {
            Chart::Geo(_) => ChartId::WorldMap,
            Chart::Histogram(_) => ChartId::MagnitudeHistogram,
            Chart::TimeSeries(_) => ChartId::DailyCounts,
            Chart::Scatter(_) => ChartId::MagnitudeVsDepth,
        }
    }

    pub fn descriptor(&self) -> ChartDescriptor {
        match self {
            Chart::Geo(c) => c.descriptor(),
            Chart::Histogram(c) => c.descriptor(),
            Chart::TimeSeries(c) => c.descriptor(),
            Chart::Scatter(c) => c.descriptor(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::record::EarthquakeRecord;
    use chrono::{DateTime, Utc};

    pub fn record(
        longitude: f64,
        latitude: f64,
        magnitude: Option<f64>,
        depth: Option<f64>,
        millis: i64,
    ) -> EarthquakeRecord {
        EarthquakeRecord {
            time: DateTime::<Utc>::from_timestamp_millis(millis).unwrap(),
            latitude,
            longitude,
            depth,
            magnitude,
            place: None,
        }
    }
}
