//! Chart-ready data produced by the assemblers.
//!
//! Each assembler returns a typed chart (`GeoChart`, `HistogramChart`, ...)
//! that renderers draw directly, and every chart can describe itself as a
//! backend-neutral [`ChartDescriptor`] for JSON export or Plotly.

use serde::Serialize;

/// Which kind of trace a chart draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    ScatterGeo,
    Histogram,
    LineMarkers,
    Scatter,
}

/// One named data array of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub data: SeriesData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    /// Numeric values; `None` serializes as `null`.
    Numbers(Vec<Option<f64>>),
    Counts(Vec<u64>),
    Text(Vec<String>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Numbers(v) => v.len(),
            SeriesData::Counts(v) => v.len(),
            SeriesData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<String>,
    /// Plotly drawing mode such as `markers` or `lines+markers`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar_title: Option<String>,
}

/// Backend-neutral description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescriptor {
    pub id: String,
    pub kind: ChartKind,
    pub series: Vec<Series>,
    pub layout: Layout,
}

impl ChartDescriptor {
    pub fn new(id: &str, kind: ChartKind, layout: Layout) -> Self {
        Self {
            id: id.to_string(),
            kind,
            series: Vec::new(),
            layout,
        }
    }

    pub fn with_series(mut self, name: &str, data: SeriesData) -> Self {
        self.series.push(Series {
            name: name.to_string(),
            data,
        });
        self
    }

    pub fn series(&self, name: &str) -> Option<&SeriesData> {
        self.series.iter().find(|s| s.name == name).map(|s| &s.data)
    }
}
