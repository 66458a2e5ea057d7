use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Instant;

use fairway_geom::config::FileConfig;
use fairway_geom::features::{
    ProbeRequest, RouteRequest, cross_section_feature, feature_collection, route_feature,
};
use fairway_geom::{ProbeConfig, RouteConfig, build_route, probe_width};

/// Derive fairway geometry from chart data
///
/// Examples:
///   # Smooth a route through waypoints with turning radii
///   fairway-geom route route.json -o route.geojson
///
///   # Measure the fairway width at a point near a navigation line
///   fairway-geom probe probe.json --search-cutoff 2000
///
///   # Use a config file and debug logging
///   fairway-geom --config my-settings.toml -v route route.json
#[derive(Parser, Debug)]
#[command(name = "fairway-geom")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches fairway-geom.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a turning-arc route from a waypoint request
    Route {
        /// Route request JSON file
        input: PathBuf,

        /// Output GeoJSON path (defaults to stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Segments per sampled turning arc
        #[arg(long)]
        arc_steps: Option<usize>,
    },
    /// Probe the fairway width at a point near a navigation line
    Probe {
        /// Probe request JSON file
        input: PathBuf,

        /// Output GeoJSON path (defaults to stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Ignore boundary hits farther than this many meters
        #[arg(long)]
        search_cutoff: Option<f64>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => Some(FileConfig::from_path(path)?),
        None => FileConfig::load(),
    };
    let verbose = args.verbose || file_config.as_ref().is_some_and(|c| c.verbose);

    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let route_config = file_config.as_ref().map(|c| c.route).unwrap_or_default();
    let probe_config = file_config.as_ref().map(|c| c.probe).unwrap_or_default();

    match args.command {
        Command::Route {
            input,
            output,
            arc_steps,
        } => {
            let config = match arc_steps {
                Some(steps) => route_config.with_arc_steps(steps),
                None => route_config,
            };
            config.validate().context("Invalid route settings")?;
            run_route(&input, output.as_deref(), &config)
        }
        Command::Probe {
            input,
            output,
            search_cutoff,
        } => {
            let config = match search_cutoff {
                Some(meters) => probe_config.with_search_cutoff(meters),
                None => probe_config,
            };
            config.validate().context("Invalid probe settings")?;
            run_probe(&input, output.as_deref(), &config)
        }
    }
}

fn run_route(input: &Path, output: Option<&Path>, config: &RouteConfig) -> Result<()> {
    let start = Instant::now();

    let request = RouteRequest::from_path(input).context("Failed to load route request")?;
    let resolved = request.resolve().context("Invalid route request")?;
    let route = build_route(&resolved.waypoints, config);

    log::info!(
        "Built route: {} waypoints -> {} coordinates [{:.1}ms]",
        resolved.waypoints.len(),
        route.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let features = if route.len() >= 2 {
        vec![route_feature(&route, &resolved.frame)]
    } else {
        Vec::new()
    };
    write_output(output, &feature_collection(features))
}

fn run_probe(input: &Path, output: Option<&Path>, config: &ProbeConfig) -> Result<()> {
    let start = Instant::now();

    let request = ProbeRequest::from_path(input).context("Failed to load probe request")?;
    let resolved = request.resolve();
    let section = probe_width(resolved.point, &resolved.line, &resolved.areas, config);

    match &section {
        Some(s) => log::info!(
            "Fairway width {:.1}m across {} candidate areas [{:.1}ms]",
            s.width,
            resolved.areas.len(),
            start.elapsed().as_secs_f64() * 1000.0
        ),
        None => log::info!(
            "No cross-section across {} candidate areas [{:.1}ms]",
            resolved.areas.len(),
            start.elapsed().as_secs_f64() * 1000.0
        ),
    }

    let features = section
        .iter()
        .map(|s| cross_section_feature(s, &resolved.frame))
        .collect();
    write_output(output, &feature_collection(features))
}

fn write_output(output: Option<&Path>, collection: &Value) -> Result<()> {
    let rendered =
        serde_json::to_string_pretty(collection).context("Failed to serialize GeoJSON")?;

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
