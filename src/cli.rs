use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    time::Duration,
};

use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use thiserror::Error;
use wayfriend_core::{
    Coordinate, Locale, RouteFilter, RouteSummary, StepSynthesizer, TransportMode,
    request::{
        DEFAULT_ROUTE_PATH, HttpRouteProvider, Place, RoutePlanner, RouteQuery, RouteResponse,
    },
    routing::{StepInput, route_to_geojson},
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Core(#[from] wayfriend_core::Error),
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("failed to start async runtime: {0}")]
    Runtime(io::Error),
    #[error("{0} of the routes could not be synthesised")]
    Partial(usize),
}

#[derive(Debug, Parser)]
#[command(name = "wayfriend", version, about = "Turn routed polylines into step-by-step directions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Synthesise steps from backend route JSON files.
    Steps {
        /// Route files; `-` reads standard input.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long, default_value_t = TransportMode::Walking)]
        mode: TransportMode,
        #[arg(long, default_value_t = Locale::Ko)]
        locale: Locale,
        /// Print a GeoJSON FeatureCollection instead of the step summary.
        #[arg(long)]
        geojson: bool,
    },
    /// Ask the routing backend for a route and print its steps.
    Plan(PlanArgs),
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Origin as `LAT,LNG`.
    #[arg(long, value_parser = parse_lat_lng)]
    pub from: Coordinate,
    /// Destination as `LAT,LNG`.
    #[arg(long, value_parser = parse_lat_lng)]
    pub to: Coordinate,
    #[arg(long, default_value_t = TransportMode::Walking)]
    pub mode: TransportMode,
    #[arg(long, default_value_t = RouteFilter::Safest)]
    pub filter: RouteFilter,
    /// Obstacle category to avoid; may be repeated.
    #[arg(long = "avoid")]
    pub avoid: Vec<String>,
    #[arg(long, env = "BACKEND_URL", default_value = "http://localhost:8000")]
    pub backend_url: String,
    #[arg(long, default_value = DEFAULT_ROUTE_PATH)]
    pub route_path: String,
    #[arg(long, default_value_t = 15)]
    pub timeout_secs: u64,
    #[arg(long, default_value_t = Locale::Ko)]
    pub locale: Locale,
}

pub fn parse_lat_lng(raw: &str) -> Result<Coordinate, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got {raw:?}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude {lat:?}: {e}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude {lng:?}: {e}"))?;
    Ok(Coordinate::new(lat, lng))
}

fn read_route(path: &Path) -> Result<RouteResponse, CliError> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        buf
    } else {
        fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?
    };
    serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Result of a `steps` run: the JSON to print and how many files failed.
#[derive(Debug)]
pub struct StepsOutput {
    pub value: Value,
    pub failures: usize,
}

/// Synthesises every file, in parallel when there are several. A single
/// file yields its result directly; several yield an array of
/// `{file, result}` or `{file, error}` entries.
pub fn steps(
    files: &[PathBuf],
    mode: TransportMode,
    locale: Locale,
    geojson: bool,
) -> Result<StepsOutput, CliError> {
    let inputs = files
        .iter()
        .map(|path| {
            let response = read_route(path)?;
            Ok(StepInput {
                polyline: response.route,
                total_distance_m: response.distance_m,
                mode,
                hazards: response.risk_factors,
            })
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    let synthesizer = StepSynthesizer::new(locale);
    let mut rendered: Vec<Result<Value, CliError>> = synthesizer
        .synthesize_batch(&inputs)
        .into_iter()
        .zip(&inputs)
        .map(|(result, input)| render(result?, input, geojson))
        .collect();

    if rendered.len() == 1 {
        let value = rendered.remove(0)?;
        return Ok(StepsOutput { value, failures: 0 });
    }

    let mut failures = 0;
    let entries = files
        .iter()
        .zip(rendered)
        .map(|(path, value)| {
            let file = path.display().to_string();
            match value {
                Ok(value) => json!({ "file": file, "result": value }),
                Err(e) => {
                    log::error!("{file}: {e}");
                    failures += 1;
                    json!({ "file": file, "error": e.to_string() })
                }
            }
        })
        .collect();

    Ok(StepsOutput {
        value: Value::Array(entries),
        failures,
    })
}

fn render(summary: RouteSummary, input: &StepInput, geojson: bool) -> Result<Value, CliError> {
    let value = if geojson {
        serde_json::to_value(route_to_geojson(&input.polyline, &summary)?)
    } else {
        serde_json::to_value(&summary)
    };
    value.map_err(CliError::Output)
}

pub async fn plan(args: PlanArgs) -> Result<Value, CliError> {
    let provider = HttpRouteProvider::new(
        &args.backend_url,
        &args.route_path,
        Duration::from_secs(args.timeout_secs),
    )?;
    let planner = RoutePlanner::new(provider, args.locale);

    let mut query = RouteQuery::new(
        Place::new(args.from.lat, args.from.lng, args.from.to_string()),
        Place::new(args.to.lat, args.to.lng, args.to.to_string()),
    );
    query.mode = args.mode;
    query.filter = args.filter;
    query.avoid = args.avoid;

    let planned = planner.plan(&query).await;
    Ok(serde_json::to_value(&planned)?)
}
