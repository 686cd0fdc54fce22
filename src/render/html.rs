//! Interactive HTML page that hands chart descriptors to Plotly.

use serde_json::{Map, Value, json};
use std::fmt::Write;

use crate::assemblers::types::{ChartDescriptor, ChartKind};
use crate::error::RenderError;

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Series that Plotly expects under `marker` rather than on the trace.
const MARKER_SERIES: [&str; 2] = ["size", "color"];

/// Converts a descriptor into a Plotly `(trace, layout)` pair.
pub fn plotly_figure(d: &ChartDescriptor) -> Result<(Value, Value), RenderError> {
    let trace_type = match d.kind {
        ChartKind::ScatterGeo => "scattergeo",
        ChartKind::Histogram => "histogram",
        ChartKind::LineMarkers | ChartKind::Scatter => "scatter",
    };

    let mut trace = Map::new();
    trace.insert("type".into(), json!(trace_type));
    if let Some(mode) = &d.layout.mode {
        trace.insert("mode".into(), json!(mode));
    }

    let mut marker = Map::new();
    for s in &d.series {
        let data = serde_json::to_value(&s.data)?;
        if MARKER_SERIES.contains(&s.name.as_str()) {
            marker.insert(s.name.clone(), data);
        } else {
            trace.insert(s.name.clone(), data);
        }
    }
    if let Some(scale) = &d.layout.colorscale {
        marker.insert("colorscale".into(), json!(scale));
    }
    if let Some(title) = &d.layout.colorbar_title {
        marker.insert("colorbar".into(), json!({ "title": title }));
    }
    if !marker.is_empty() {
        trace.insert("marker".into(), Value::Object(marker));
    }

    let mut layout = Map::new();
    layout.insert("title".into(), json!(d.layout.title));
    if let Some(x) = &d.layout.x_axis {
        layout.insert("xaxis".into(), json!({ "title": x }));
    }
    if let Some(y) = &d.layout.y_axis {
        layout.insert("yaxis".into(), json!({ "title": y }));
    }
    if d.kind == ChartKind::ScatterGeo {
        layout.insert("geo".into(), json!({ "scope": "world", "showland": true }));
    }

    Ok((Value::Object(trace), Value::Object(layout)))
}

/// Builds one page with a `<div>` and a `Plotly.newPlot` call per chart.
pub fn render_html(descriptors: &[ChartDescriptor]) -> Result<String, RenderError> {
    let mut divs = String::new();
    let mut calls = String::new();

    for d in descriptors {
        let (trace, layout) = plotly_figure(d)?;
        // write! into a String cannot fail
        let _ = writeln!(divs, r#"  <div id="{}" class="chart"></div>"#, d.id);
        let _ = writeln!(
            calls,
            "  Plotly.newPlot({}, [{}], {});",
            script_json(&json!(d.id))?,
            script_json(&trace)?,
            script_json(&layout)?,
        );
    }

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Recent Earthquakes</title>
  <script src="{PLOTLY_CDN}"></script>
  <style>.chart {{ width: 100%; height: 540px; }}</style>
</head>
<body>
{divs}<script>
{calls}</script>
</body>
</html>
"#
    ))
}

/// JSON safe to embed inside a `<script>` element.
fn script_json(value: &Value) -> Result<String, RenderError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemblers::test_support::record;
    use crate::assemblers::timeseries::DayOrder;
    use crate::assemblers::{Chart, ChartId};

    #[test]
    fn test_geo_figure_moves_size_and_color_under_marker() {
        let chart = Chart::assemble(
            ChartId::WorldMap,
            &[record(10.0, 20.0, Some(3.4), Some(5.0), 0)],
            DayOrder::FirstSeen,
        );
        let (trace, layout) = plotly_figure(&chart.descriptor()).unwrap();

        assert_eq!(trace["type"], "scattergeo");
        assert_eq!(trace["mode"], "markers");
        assert_eq!(trace["lon"], json!([10.0]));
        assert_eq!(trace["text"], json!(["Magnitude: 3.4"]));
        assert_eq!(trace["marker"]["size"], json!([6.8]));
        assert_eq!(trace["marker"]["color"], json!([3.4]));
        assert_eq!(trace["marker"]["colorscale"], "Viridis");
        assert_eq!(layout["geo"]["scope"], "world");
    }

    #[test]
    fn test_missing_magnitude_serializes_as_null() {
        let chart = Chart::assemble(
            ChartId::MagnitudeVsDepth,
            &[record(0.0, 0.0, None, Some(5.0), 0)],
            DayOrder::FirstSeen,
        );
        let (trace, _) = plotly_figure(&chart.descriptor()).unwrap();
        assert_eq!(trace["x"], json!([null]));
        assert_eq!(trace["y"], json!([5.0]));
    }

    #[test]
    fn test_time_series_figure() {
        let chart = Chart::assemble(
            ChartId::DailyCounts,
            &[record(0.0, 0.0, Some(1.0), None, 0)],
            DayOrder::FirstSeen,
        );
        let (trace, layout) = plotly_figure(&chart.descriptor()).unwrap();

        assert_eq!(trace["mode"], "lines+markers");
        assert_eq!(trace["x"], json!(["1970-01-01"]));
        assert_eq!(trace["y"], json!([1]));
        assert_eq!(layout["xaxis"]["title"], "Date");
        assert!(trace.get("marker").is_none());
    }

    #[test]
    fn test_histogram_trace_has_no_mode() {
        let chart = Chart::assemble(
            ChartId::MagnitudeHistogram,
            &[record(0.0, 0.0, Some(2.5), None, 0)],
            DayOrder::FirstSeen,
        );
        let (trace, _) = plotly_figure(&chart.descriptor()).unwrap();

        assert_eq!(trace["type"], "histogram");
        assert!(trace.get("mode").is_none());
    }

    #[test]
    fn test_page_has_one_plot_per_chart() {
        let descriptors: Vec<_> = ChartId::ALL
            .iter()
            .map(|id| Chart::assemble(*id, &[], DayOrder::FirstSeen).descriptor())
            .collect();
        let page = render_html(&descriptors).unwrap();

        assert_eq!(page.matches("Plotly.newPlot(").count(), 4);
        for id in ChartId::ALL {
            assert!(page.contains(&format!(r#"<div id="{}""#, id.as_str())));
        }
    }

    #[test]
    fn test_script_json_escapes_closing_tags() {
        let escaped = script_json(&json!("</script>")).unwrap();
        assert_eq!(escaped, r#""<\/script>""#);
    }
}
