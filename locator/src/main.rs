use anyhow::Context;
use bridge::server::ReportBridge;
use clap::Parser;
use firecore::prelude::{GeoPoint, DEFAULT_MOTION_THRESHOLD_KMH};
use generator::scenario::{build_scenario, ScenarioConfig};
use ingest::load_snapshot;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::{DatasetSpec, WorkflowConfig};
use workflow::runner::{AnalysisReport, Runner};

mod bridge;
mod generator;
mod ingest;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Finds the nearest moving fire from two hotspot snapshots")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 41.4161, allow_hyphen_values = true)]
    lat: f64,
    #[arg(long, default_value_t = -81.8583, allow_hyphen_values = true)]
    lon: f64,
    /// Minimum velocity (km/h) for a fire to count as moving
    #[arg(long, default_value_t = DEFAULT_MOTION_THRESHOLD_KMH)]
    threshold: f64,
    /// Hotspot CSV for the most recent lookback window
    #[arg(long)]
    recent: Option<PathBuf>,
    #[arg(long, default_value_t = 48.0)]
    recent_hours: f64,
    /// Hotspot CSV for the older lookback window
    #[arg(long)]
    previous: Option<PathBuf>,
    #[arg(long, default_value_t = 168.0)]
    previous_hours: f64,
    /// Analyse a generated scenario instead of hotspot files
    #[arg(long, default_value_t = false)]
    synthetic: bool,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Append the JSON report to this file
    #[arg(long)]
    report: Option<PathBuf>,
    /// Keep the report bridge alive for incoming analyses
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long, default_value_t = 9000)]
    port: u16,
}

fn print_report(report: &AnalysisReport) {
    println!(
        "Snapshots -> {} fires at t={}, {} fires at t={} ({} paired, {} unpaired, {})",
        report.previous_count,
        report.previous_time_frame,
        report.recent_count,
        report.recent_time_frame,
        report.paired,
        report.unpaired,
        report.correspondence
    );
    match &report.nearest_moving {
        Some(fire) => println!(
            "Nearest moving fire: {:.2} km at ({:.4}, {:.4}), velocity {:.4} km/h",
            fire.distance_km,
            fire.location.lat,
            fire.location.lon,
            fire.velocity_kmh.unwrap_or_default()
        ),
        None => println!(
            "No fire moving faster than {} km/h",
            report.config.motion_threshold_kmh
        ),
    }
}

/// Appends `report` as one JSON line, creating parent directories as needed.
fn append_report(report_path: &Path, report: &AnalysisReport) -> anyhow::Result<()> {
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("writing report {}", report_path.display()))?;
    }
    let line = serde_json::to_string(report).context("serialising report")?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(report_path)
        .with_context(|| format!("opening report {}", report_path.display()))?;
    writeln!(file, "{}", line)
        .with_context(|| format!("writing report {}", report_path.display()))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(
            GeoPoint::new(args.lat, args.lon),
            args.threshold,
            args.recent.map(|path| DatasetSpec {
                path,
                time_frame: args.recent_hours,
            }),
            args.previous.map(|path| DatasetSpec {
                path,
                time_frame: args.previous_hours,
            }),
        )
    };

    let runner = Runner::new(workflow_config.to_analysis_config());
    let bridge = ReportBridge::new(Arc::new(runner.clone()));

    let snapshots = if args.synthetic {
        let scenario = ScenarioConfig {
            seed: args.seed,
            recent_hours: args.recent_hours,
            previous_hours: args.previous_hours,
            ..Default::default()
        };
        Some(build_scenario(&runner.config().observer, &scenario)?)
    } else {
        match (&workflow_config.previous, &workflow_config.recent) {
            (Some(previous), Some(recent)) => {
                Some((load_snapshot(previous)?, load_snapshot(recent)?))
            }
            (None, None) if args.serve => None,
            _ => anyhow::bail!("both --previous and --recent hotspot files are required"),
        }
    };

    if let Some((previous, recent)) = snapshots {
        let report = runner.execute(&previous, &recent)?;
        print_report(&report);
        bridge.publish(&report);

        if let Some(report_path) = args.report {
            append_report(&report_path, &report)?;
        }

        let metrics = runner.metrics();
        println!(
            "Metrics -> datasets {}, fires {}, pairs {}, unpaired {}, selection failures {}",
            metrics.datasets_ranked,
            metrics.fires_ranked,
            metrics.pairs_correlated,
            metrics.fires_unpaired,
            metrics.selection_failures
        );
    }

    if args.serve {
        bridge.serve(SocketAddr::from(([127, 0, 0, 1], args.port)));
        bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
