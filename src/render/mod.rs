//! Rendering collaborators: static SVG through `plotters` and an
//! interactive Plotly page.

mod colormap;
pub mod html;
pub mod svg;

pub use html::render_html;
pub use svg::render_svg;

/// Output formats the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `<chart id>.svg` per chart.
    Svg,
    /// `index.html` with all four charts in Plotly.
    Html,
    /// `charts.json` with every chart descriptor.
    Json,
}
