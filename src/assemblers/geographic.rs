use crate::assemblers::types::{ChartDescriptor, ChartKind, Layout, SeriesData};
use crate::record::EarthquakeRecord;

pub const CHART_ID: &str = "earthquake_map";

/// Marker diameter per unit of magnitude.
pub const SIZE_PER_MAGNITUDE: f64 = 2.0;

/// Parallel per-event arrays for the world map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoChart {
    pub longitudes: Vec<f64>,
    pub latitudes: Vec<f64>,
    pub labels: Vec<String>,
    pub sizes: Vec<Option<f64>>,
    /// Raw magnitudes; mapped through the Viridis colorscale when drawn.
    pub colors: Vec<Option<f64>>,
}

/// Every record becomes one marker, including those without a magnitude.
pub fn assemble(records: &[EarthquakeRecord]) -> GeoChart {
    let mut chart = GeoChart::default();

    for r in records {
        chart.longitudes.push(r.longitude);
        chart.latitudes.push(r.latitude);
        chart.labels.push(match r.magnitude {
            Some(m) => format!("Magnitude: {m}"),
            None => "Magnitude: unknown".to_string(),
        });
        chart.sizes.push(r.magnitude.map(|m| m * SIZE_PER_MAGNITUDE));
        chart.colors.push(r.magnitude);
    }

    chart
}

impl GeoChart {
    pub fn len(&self) -> usize {
        self.longitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.longitudes.is_empty()
    }

    pub fn descriptor(&self) -> ChartDescriptor {
        let layout = Layout {
            title: "Earthquake Locations Worldwide".to_string(),
            colorscale: Some("Viridis".to_string()),
            colorbar_title: Some("Magnitude".to_string()),
            mode: Some("markers".to_string()),
            ..Default::default()
        };

        ChartDescriptor::new(CHART_ID, ChartKind::ScatterGeo, layout)
            .with_series("lon", numbers(&self.longitudes))
            .with_series("lat", numbers(&self.latitudes))
            .with_series("text", SeriesData::Text(self.labels.clone()))
            .with_series("size", SeriesData::Numbers(self.sizes.clone()))
            .with_series("color", SeriesData::Numbers(self.colors.clone()))
    }
}

fn numbers(values: &[f64]) -> SeriesData {
    SeriesData::Numbers(values.iter().copied().map(Some).collect())
}
