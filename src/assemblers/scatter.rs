use crate::assemblers::types::{ChartDescriptor, ChartKind, Layout, SeriesData};
use crate::record::EarthquakeRecord;

pub const CHART_ID: &str = "magnitude_vs_depth";

/// Magnitude (x) against depth (y), index-aligned with the input records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterChart {
    pub magnitudes: Vec<Option<f64>>,
    pub depths: Vec<Option<f64>>,
}

pub fn assemble(records: &[EarthquakeRecord]) -> ScatterChart {
    let (magnitudes, depths) = records.iter().map(|r| (r.magnitude, r.depth)).unzip();
    ScatterChart { magnitudes, depths }
}

impl ScatterChart {
    /// Points where both coordinates are present.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.magnitudes
            .iter()
            .zip(&self.depths)
            .filter_map(|(m, d)| Some(((*m)?, (*d)?)))
    }

    pub fn descriptor(&self) -> ChartDescriptor {
        let layout = Layout {
            title: "Earthquake Magnitude vs Depth".to_string(),
            x_axis: Some("Magnitude".to_string()),
            y_axis: Some("Depth (km)".to_string()),
            mode: Some("markers".to_string()),
            ..Default::default()
        };

        ChartDescriptor::new(CHART_ID, ChartKind::Scatter, layout)
            .with_series("x", SeriesData::Numbers(self.magnitudes.clone()))
            .with_series("y", SeriesData::Numbers(self.depths.clone()))
    }
}
