use quake_charts::assemblers::ChartId;
use quake_charts::assemblers::timeseries::DayOrder;
use quake_charts::config::LoaderConfig;
use quake_charts::fetch::BasicClient;
use quake_charts::pipeline::{DESCRIPTORS_FILE, HTML_FILE, PipelineConfig, run};
use quake_charts::record::MalformedPolicy;
use quake_charts::render::OutputFormat;
use std::path::PathBuf;

fn fixture() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/sample_week.geojson")
        .display()
        .to_string()
}

fn config(output_dir: PathBuf, formats: Vec<OutputFormat>, policy: MalformedPolicy) -> PipelineConfig {
    PipelineConfig {
        loader: LoaderConfig::new(&fixture(), 5).unwrap(),
        policy,
        day_order: DayOrder::Chronological,
        output_dir,
        formats,
    }
}

#[tokio::test]
async fn test_run_writes_every_format() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(
        dir.path().join("out"),
        vec![OutputFormat::Svg, OutputFormat::Html, OutputFormat::Json],
        MalformedPolicy::Skip,
    );
    let client = BasicClient::new(config.loader.timeout).unwrap();

    let report = run(&client, &config).await.unwrap();

    assert_eq!(report.failed_charts(), 0);
    assert_eq!(report.summary.records, 6);
    assert_eq!(report.charts.len(), 4);
    assert_eq!(report.written.len(), 6);

    let out = dir.path().join("out");
    for id in ChartId::ALL {
        let svg = std::fs::read_to_string(out.join(format!("{}.svg", id.as_str()))).unwrap();
        assert!(svg.contains("<svg"));
    }

    let descriptors: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join(DESCRIPTORS_FILE)).unwrap()).unwrap();
    let descriptors = descriptors.as_array().unwrap();
    assert_eq!(descriptors.len(), 4);
    let daily = descriptors
        .iter()
        .find(|d| d["id"] == "daily_counts")
        .unwrap();
    assert_eq!(daily["kind"], "line_markers");
    assert_eq!(daily["series"][0]["data"], serde_json::json!(["2023-11-14", "2023-11-16"]));

    let page = std::fs::read_to_string(out.join(HTML_FILE)).unwrap();
    assert_eq!(page.matches("Plotly.newPlot(").count(), 4);
}

#[tokio::test]
async fn test_run_json_only() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(
        dir.path().to_path_buf(),
        vec![OutputFormat::Json],
        MalformedPolicy::Skip,
    );
    let client = BasicClient::new(config.loader.timeout).unwrap();

    let report = run(&client, &config).await.unwrap();

    assert_eq!(report.written, vec![dir.path().join(DESCRIPTORS_FILE)]);
    assert!(report.charts.iter().all(|c| c.svg_path.is_none()));
}

#[tokio::test]
async fn test_strict_run_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let config = config(out.clone(), vec![OutputFormat::Json], MalformedPolicy::FailFast);
    let client = BasicClient::new(config.loader.timeout).unwrap();

    let err = run(&client, &config).await.unwrap_err();

    assert!(err.to_string().contains("feature 4 is malformed"));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_one_failed_chart_leaves_the_others_written() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    std::fs::create_dir_all(out.join("daily_counts.svg")).unwrap();
    let config = config(
        out.clone(),
        vec![OutputFormat::Svg, OutputFormat::Html, OutputFormat::Json],
        MalformedPolicy::Skip,
    );
    let client = BasicClient::new(config.loader.timeout).unwrap();

    let report = run(&client, &config).await.unwrap();

    assert_eq!(report.failed_charts(), 1);
    let failed = report.charts.iter().find(|c| c.error.is_some()).unwrap();
    assert_eq!(failed.id, ChartId::DailyCounts);
    assert!(failed.descriptor.is_none());

    for id in ChartId::ALL.into_iter().filter(|id| *id != ChartId::DailyCounts) {
        assert!(out.join(format!("{}.svg", id.as_str())).is_file());
    }
    assert_eq!(report.written.len(), 5);

    let descriptors: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join(DESCRIPTORS_FILE)).unwrap()).unwrap();
    let ids: Vec<&str> = descriptors
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["earthquake_map", "magnitude_histogram", "magnitude_vs_depth"]);

    let page = std::fs::read_to_string(out.join(HTML_FILE)).unwrap();
    assert_eq!(page.matches("Plotly.newPlot(").count(), 3);
}
