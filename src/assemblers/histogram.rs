use crate::assemblers::types::{ChartDescriptor, ChartKind, Layout, SeriesData};
use crate::record::EarthquakeRecord;

pub const CHART_ID: &str = "magnitude_histogram";

/// Flat list of magnitudes; binning is left to the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramChart {
    pub magnitudes: Vec<f64>,
}

/// Records without a magnitude contribute nothing.
pub fn assemble(records: &[EarthquakeRecord]) -> HistogramChart {
    HistogramChart {
        magnitudes: records.iter().filter_map(|r| r.magnitude).collect(),
    }
}

impl HistogramChart {
    pub fn descriptor(&self) -> ChartDescriptor {
        let layout = Layout {
            title: "Earthquake Magnitude Histogram".to_string(),
            x_axis: Some("Magnitude".to_string()),
            y_axis: Some("Number of Earthquakes".to_string()),
            ..Default::default()
        };

        ChartDescriptor::new(CHART_ID, ChartKind::Histogram, layout).with_series(
            "x",
            SeriesData::Numbers(self.magnitudes.iter().copied().map(Some).collect()),
        )
    }
}
