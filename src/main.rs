//! CLI entry point for quake_charts.
//!
//! Fetches the USGS earthquake feed once and renders the world map,
//! magnitude histogram, daily counts and magnitude-vs-depth charts, or
//! summarizes / exports the projected records.

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use quake_charts::assemblers::timeseries::DayOrder;
use quake_charts::config::{
    DEFAULT_FEED_URL, DEFAULT_TIMEOUT_SECS, FEED_URL_ENV, LoaderConfig, TIMEOUT_ENV,
};
use quake_charts::fetch::BasicClient;
use quake_charts::output::{append_records, print_json, print_pretty, write_json};
use quake_charts::pipeline::{PipelineConfig, load_records, run};
use quake_charts::record::MalformedPolicy;
use quake_charts::render::OutputFormat;
use quake_charts::stats::FeedSummary;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "quake_charts")]
#[command(about = "Chart recent earthquakes from the USGS GeoJSON feed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Feed URL or path to a local GeoJSON file
    #[arg(short, long, env = FEED_URL_ENV, default_value = DEFAULT_FEED_URL)]
    source: String,

    /// Whole-request timeout in seconds
    #[arg(short, long, env = TIMEOUT_ENV, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Abort on the first malformed feature instead of skipping it
    #[arg(long, default_value_t = false)]
    strict: bool,
}

impl SourceArgs {
    fn loader(&self) -> Result<LoaderConfig> {
        LoaderConfig::new(&self.source, self.timeout_secs)
    }

    fn policy(&self) -> MalformedPolicy {
        if self.strict {
            MalformedPolicy::FailFast
        } else {
            MalformedPolicy::Skip
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the feed once and render all four charts
    Render {
        #[command(flatten)]
        source: SourceArgs,

        /// Directory to write charts into
        #[arg(short, long, default_value = "charts")]
        output_dir: PathBuf,

        /// Output formats, comma separated
        #[arg(
            short,
            long,
            value_enum,
            value_delimiter = ',',
            default_values_t = [OutputFormat::Svg, OutputFormat::Html, OutputFormat::Json]
        )]
        format: Vec<OutputFormat>,

        /// Sort the daily-count axis by date instead of first appearance
        #[arg(long, default_value_t = false)]
        sort_days: bool,
    },
    /// Log a summary of the current feed
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        /// Optional: also write the summary as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Append the projected records to a CSV file
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// CSV file to append records to
        #[arg(short, long, default_value = "earthquakes.csv")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/quake_charts.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("quake_charts.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let result = execute(cli.command).await;
    if let Err(e) = &result {
        error!(error = %format!("{e:#}"), "quake_charts failed");
    }

    // Flush the file log before a non-zero exit skips destructors.
    drop(file_guard);
    if result.is_err() {
        std::process::exit(1);
    }
    Ok(())
}

async fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Render {
            source,
            output_dir,
            format,
            sort_days,
        } => {
            let loader = source.loader()?;
            let client = BasicClient::new(loader.timeout)?;
            let config = PipelineConfig {
                loader,
                policy: source.policy(),
                day_order: if sort_days {
                    DayOrder::Chronological
                } else {
                    DayOrder::FirstSeen
                },
                output_dir,
                formats: format,
            };

            let report = run(&client, &config).await?;
            for path in &report.written {
                info!(path = %path.display(), "Wrote");
            }

            let failed = report.failed_charts();
            if failed > 0 {
                bail!("{failed} of {} charts failed", report.charts.len());
            }
        }
        Commands::Summary { source, json } => {
            let loader = source.loader()?;
            let client = BasicClient::new(loader.timeout)?;
            let (total, records) = load_records(&client, &loader, source.policy()).await?;

            let summary = FeedSummary::from_records(total, &records);
            print_pretty(&summary);
            print_json(&summary)?;
            info!(
                records = summary.records,
                magnitude_coverage_pct = summary.magnitude_coverage_pct(),
                "Feed summary"
            );
            if summary.skipped > 0 {
                warn!(skipped = summary.skipped, "Malformed features were skipped");
            }

            if let Some(path) = json {
                write_json(&path, &summary).await?;
                info!(path = %path.display(), "Summary written");
            }
        }
        Commands::Export { source, output } => {
            let loader = source.loader()?;
            let client = BasicClient::new(loader.timeout)?;
            let (total, records) = load_records(&client, &loader, source.policy()).await?;

            let rows = records.len();
            let path = output.clone();
            tokio::task::spawn_blocking(move || append_records(&path, &records)).await??;
            info!(
                features = total,
                rows,
                path = %output.display(),
                "Records exported"
            );
        }
    }

    Ok(())
}
