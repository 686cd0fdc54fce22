//! One shared feed fetch fanned out to the four chart builders.
//!
//! The feed is loaded and projected once; the resulting records are shared
//! read-only with one blocking task per chart. A chart that fails is logged
//! and reported, and the others still complete.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::assemblers::timeseries::DayOrder;
use crate::assemblers::types::ChartDescriptor;
use crate::assemblers::{Chart, ChartId};
use crate::config::LoaderConfig;
use crate::error::FeedError;
use crate::fetch::{HttpClient, load_feed};
use crate::output::write_json;
use crate::record::{EarthquakeRecord, MalformedPolicy, project_with};
use crate::render::{OutputFormat, render_html, render_svg};
use crate::stats::FeedSummary;

pub const DESCRIPTORS_FILE: &str = "charts.json";
pub const HTML_FILE: &str = "index.html";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub loader: LoaderConfig,
    pub policy: MalformedPolicy,
    pub day_order: DayOrder,
    pub output_dir: PathBuf,
    pub formats: Vec<OutputFormat>,
}

/// Result of building one chart.
#[derive(Debug)]
pub struct ChartOutcome {
    pub id: ChartId,
    pub descriptor: Option<ChartDescriptor>,
    pub svg_path: Option<PathBuf>,
    pub error: Option<String>,
}

impl ChartOutcome {
    fn failed(id: ChartId, error: String) -> Self {
        Self {
            id,
            descriptor: None,
            svg_path: None,
            error: Some(error),
        }
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub summary: FeedSummary,
    pub charts: Vec<ChartOutcome>,
    pub written: Vec<PathBuf>,
}

impl RunReport {
    pub fn failed_charts(&self) -> usize {
        self.charts.iter().filter(|c| c.error.is_some()).count()
    }
}

/// Loads the feed once and projects it, returning the feature count
/// alongside the records.
pub async fn load_records<C: HttpClient>(
    client: &C,
    loader: &LoaderConfig,
    policy: MalformedPolicy,
) -> Result<(usize, Vec<EarthquakeRecord>), FeedError> {
    let feed = load_feed(client, &loader.source).await?;
    if let Some(meta) = &feed.metadata {
        debug!(
            title = meta.title.as_deref().unwrap_or(""),
            generated = meta.generated,
            count = meta.count,
            "Feed metadata"
        );
    }

    let records = project_with(&feed, policy)?;
    Ok((feed.features.len(), records))
}

#[tracing::instrument(skip_all, fields(source = %config.loader.source, output_dir = %config.output_dir.display()))]
pub async fn run<C: HttpClient>(client: &C, config: &PipelineConfig) -> Result<RunReport> {
    let (total, records) = load_records(client, &config.loader, config.policy).await?;

    let summary = FeedSummary::from_records(total, &records);
    info!(
        features = summary.total_features,
        records = summary.records,
        skipped = summary.skipped,
        missing_magnitude = summary.missing_magnitude,
        "Feed projected"
    );

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| format!("failed to create {}", config.output_dir.display()))?;

    let svg_dir = config
        .formats
        .contains(&OutputFormat::Svg)
        .then(|| config.output_dir.clone());
    let records: Arc<[EarthquakeRecord]> = records.into();

    let mut tasks = vec![];
    for id in ChartId::ALL {
        let records = Arc::clone(&records);
        let svg_dir = svg_dir.clone();
        let order = config.day_order;
        let span = tracing::info_span!("build_chart", chart = id.as_str());

        let task = tokio::task::spawn_blocking(move || {
            let _enter = span.enter();
            build_chart(id, &records, order, svg_dir.as_deref())
        });
        tasks.push((id, task));
    }

    let mut charts = Vec::with_capacity(tasks.len());
    let mut written = Vec::new();
    for (id, task) in tasks {
        let outcome = match task.await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                error!(chart = id.as_str(), error = %e, "Chart failed");
                ChartOutcome::failed(id, format!("{e:#}"))
            }
            Err(e) => {
                error!(chart = id.as_str(), error = %e, "Chart task panicked");
                ChartOutcome::failed(id, e.to_string())
            }
        };
        written.extend(outcome.svg_path.clone());
        charts.push(outcome);
    }

    let descriptors: Vec<ChartDescriptor> =
        charts.iter().filter_map(|c| c.descriptor.clone()).collect();

    if config.formats.contains(&OutputFormat::Json) {
        let path = config.output_dir.join(DESCRIPTORS_FILE);
        write_json(&path, &descriptors).await?;
        written.push(path);
    }
    if config.formats.contains(&OutputFormat::Html) {
        let path = config.output_dir.join(HTML_FILE);
        let page = render_html(&descriptors)?;
        tokio::fs::write(&path, page)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }

    info!(
        charts = charts.len(),
        failed = charts.iter().filter(|c| c.error.is_some()).count(),
        files = written.len(),
        "Charts complete"
    );

    Ok(RunReport {
        summary,
        charts,
        written,
    })
}

/// Assembles one chart and, when `svg_dir` is set, renders it to
/// `<svg_dir>/<chart id>.svg`.
fn build_chart(
    id: ChartId,
    records: &[EarthquakeRecord],
    order: DayOrder,
    svg_dir: Option<&Path>,
) -> Result<ChartOutcome> {
    let chart = Chart::assemble(id, records, order);
    let descriptor = chart.descriptor();
    debug!(series = descriptor.series.len(), "Chart assembled");

    let svg_path = match svg_dir {
        Some(dir) => {
            let svg = render_svg(&chart)?;
            let path = dir.join(format!("{}.svg", id.as_str()));
            std::fs::write(&path, svg)
                .with_context(|| format!("failed to write {}", path.display()))?;
            debug!(path = %path.display(), "SVG written");
            Some(path)
        }
        None => None,
    };

    Ok(ChartOutcome {
        id,
        descriptor: Some(descriptor),
        svg_path,
        error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemblers::test_support::record;

    #[test]
    fn test_build_chart_without_svg() {
        let records = vec![record(1.0, 2.0, Some(3.0), Some(4.0), 0)];
        let outcome = build_chart(ChartId::MagnitudeHistogram, &records, DayOrder::FirstSeen, None)
            .unwrap();

        assert_eq!(outcome.id, ChartId::MagnitudeHistogram);
        assert!(outcome.svg_path.is_none());
        assert!(outcome.error.is_none());
        assert_eq!(outcome.descriptor.unwrap().id, "magnitude_histogram");
    }

    #[test]
    fn test_build_chart_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![record(1.0, 2.0, Some(3.0), Some(4.0), 0)];

        let outcome =
            build_chart(ChartId::WorldMap, &records, DayOrder::FirstSeen, Some(dir.path())).unwrap();

        let path = outcome.svg_path.unwrap();
        assert_eq!(path, dir.path().join("earthquake_map.svg"));
        assert!(std::fs::read_to_string(path).unwrap().contains("<svg"));
    }

    #[test]
    fn test_build_chart_reports_unwritable_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let result = build_chart(ChartId::MagnitudeVsDepth, &[], DayOrder::FirstSeen, Some(&missing));
        assert!(result.is_err());
    }
}
