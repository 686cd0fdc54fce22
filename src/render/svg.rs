//! Static SVG rendering through `plotters`.

use plotters::prelude::*;

use crate::assemblers::Chart;
use crate::assemblers::geographic::GeoChart;
use crate::assemblers::histogram::HistogramChart;
use crate::assemblers::scatter::ScatterChart;
use crate::assemblers::timeseries::TimeSeriesChart;
use crate::assemblers::utility::min_max;
use crate::error::RenderError;
use crate::render::colormap::viridis;

pub const WIDTH: u32 = 900;
pub const HEIGHT: u32 = 540;

/// Width of one histogram bin in magnitude units.
pub const BIN_WIDTH: f64 = 0.5;

/// Drawable magnitude range. Values outside it are drawn at the nearest edge.
pub const MAGNITUDE_AXIS: (f64, f64) = (-2.0, 10.0);

/// Drawable depth range in kilometers, same clamping rule.
pub const DEPTH_AXIS_KM: (f64, f64) = (-10.0, 1000.0);

/// Largest marker radius on the world map, in pixels.
const MAX_MARKER_RADIUS: f64 = 40.0;

const MISSING_COLOR: RGBColor = RGBColor(150, 150, 150);

/// Draws `chart` into a standalone SVG document.
pub fn render_svg(chart: &Chart) -> Result<String, RenderError> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (WIDTH, HEIGHT)).into_drawing_area();
        let id = chart.id().as_str();
        root.fill(&WHITE).map_err(|e| RenderError::draw(id, e))?;

        match chart {
            Chart::Geo(c) => draw_geo(&root, c),
            Chart::Histogram(c) => draw_histogram(&root, c),
            Chart::TimeSeries(c) => draw_time_series(&root, c),
            Chart::Scatter(c) => draw_scatter(&root, c),
        }
        .map_err(|e| RenderError::draw(id, e))?;

        root.present().map_err(|e| RenderError::draw(id, e))?;
    }
    Ok(buf)
}

type Area<'a> = DrawingArea<SVGBackend<'a>, plotters::coord::Shift>;
type DrawResult = Result<(), DrawingAreaErrorKind<std::io::Error>>;

/// Equirectangular world map; marker radius is the magnitude, color follows
/// Viridis over the observed magnitude range.
fn draw_geo<'a>(root: &Area<'a>, c: &GeoChart) -> DrawResult {
    let mut chart = ChartBuilder::on(root)
        .caption(&c.descriptor().layout.title, ("sans-serif", 28.0).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-180f64..180f64, -90f64..90f64)?;

    chart
        .configure_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .draw()?;

    let present: Vec<f64> = c
        .colors
        .iter()
        .filter_map(|m| m.map(|m| clamp_to(MAGNITUDE_AXIS, m)))
        .collect();
    let (lo, hi) = min_max(&present).unwrap_or((0.0, 1.0));

    let markers = (0..c.len()).map(|i| {
        let at = (c.longitudes[i], c.latitudes[i]);
        match (c.sizes[i], c.colors[i]) {
            (Some(size), Some(m)) => {
                let radius = (size / 2.0).round().clamp(1.0, MAX_MARKER_RADIUS) as i32;
                let color = viridis(clamp_to(MAGNITUDE_AXIS, m), lo, hi);
                Circle::new(at, radius, color.mix(0.75).filled())
            }
            _ => Circle::new(at, 1, MISSING_COLOR.filled()),
        }
    });
    chart.draw_series(markers)?;

    Ok(())
}

/// Counts per fixed-width bin aligned to multiples of [`BIN_WIDTH`].
///
/// Magnitudes are clamped to [`MAGNITUDE_AXIS`] first, so the edge bins
/// also hold everything beyond them and the bin count stays bounded.
pub fn bin_magnitudes(magnitudes: &[f64]) -> Vec<(f64, u64)> {
    let clamped: Vec<f64> = magnitudes
        .iter()
        .map(|m| clamp_to(MAGNITUDE_AXIS, *m))
        .collect();
    let Some((lo, hi)) = min_max(&clamped) else {
        return Vec::new();
    };
    let first = (lo / BIN_WIDTH).floor() as i64;
    let last = (hi / BIN_WIDTH).floor() as i64;

    let mut counts = vec![0u64; (last - first + 1) as usize];
    for m in &clamped {
        let slot = (m / BIN_WIDTH).floor() as i64 - first;
        counts[slot as usize] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, n)| ((first + i as i64) as f64 * BIN_WIDTH, n))
        .collect()
}

fn draw_histogram<'a>(root: &Area<'a>, c: &HistogramChart) -> DrawResult {
    let bins = bin_magnitudes(&c.magnitudes);
    let x_lo = bins.first().map(|b| b.0).unwrap_or(0.0);
    let x_hi = bins.last().map(|b| b.0 + BIN_WIDTH).unwrap_or(1.0);
    let y_hi = bins.iter().map(|b| b.1).max().unwrap_or(0).max(1) as f64 * 1.1;

    let layout = c.descriptor().layout;
    let mut chart = ChartBuilder::on(root)
        .caption(&layout.title, ("sans-serif", 28.0).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, 0f64..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(layout.x_axis.unwrap_or_default())
        .y_desc(layout.y_axis.unwrap_or_default())
        .draw()?;

    chart.draw_series(bins.iter().map(|(start, n)| {
        Rectangle::new(
            [(*start, 0.0), (start + BIN_WIDTH, *n as f64)],
            BLUE.mix(0.6).filled(),
        )
    }))?;

    Ok(())
}

/// Day axis is positional; tick labels are the day keys in series order.
fn draw_time_series<'a>(root: &Area<'a>, c: &TimeSeriesChart) -> DrawResult {
    let n = c.days.len() as i32;
    let y_hi = c.counts.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.1;

    let layout = c.descriptor().layout;
    let mut chart = ChartBuilder::on(root)
        .caption(&layout.title, ("sans-serif", 28.0).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-1i32..n.max(1), 0f64..y_hi)?;

    let day_label = |x: &i32| {
        usize::try_from(*x)
            .ok()
            .and_then(|i| c.days.get(i))
            .cloned()
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .x_labels(c.days.len().clamp(1, 10))
        .x_label_formatter(&day_label)
        .x_desc(layout.x_axis.unwrap_or_default())
        .y_desc(layout.y_axis.unwrap_or_default())
        .draw()?;

    let points: Vec<(i32, f64)> = c
        .counts
        .iter()
        .enumerate()
        .map(|(i, n)| (i as i32, *n as f64))
        .collect();
    chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
    chart.draw_series(points.iter().map(|p| Circle::new(*p, 3, BLUE.filled())))?;

    Ok(())
}

fn draw_scatter<'a>(root: &Area<'a>, c: &ScatterChart) -> DrawResult {
    let points: Vec<(f64, f64)> = c
        .points()
        .map(|(m, d)| (clamp_to(MAGNITUDE_AXIS, m), clamp_to(DEPTH_AXIS_KM, d)))
        .collect();
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let (x_lo, x_hi) = padded(min_max(&xs).unwrap_or((0.0, 10.0)));
    let (y_lo, y_hi) = padded(min_max(&ys).unwrap_or((0.0, 100.0)));

    let layout = c.descriptor().layout;
    let mut chart = ChartBuilder::on(root)
        .caption(&layout.title, ("sans-serif", 28.0).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(layout.x_axis.unwrap_or_default())
        .y_desc(layout.y_axis.unwrap_or_default())
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|p| Circle::new(*p, 3, RED.mix(0.6).filled())),
    )?;

    Ok(())
}

fn clamp_to((lo, hi): (f64, f64), value: f64) -> f64 {
    value.clamp(lo, hi)
}

/// Widens a range by 5% on each side, and by at least 0.5.
fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let pad = ((hi - lo) * 0.05).max(0.5);
    (lo - pad, hi + pad)
}
