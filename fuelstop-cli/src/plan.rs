//! Plan command implementation for the fuel stop CLI.

use std::io::{self, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::{Parser, ValueEnum};
use fuelstop_core::{
    FuelPlan, FuelPlanner, PlanRequest, Planner, PlannerConfig, ProjectionConfig,
    ProjectionStrategy, VehicleProfile,
};
use fuelstop_data::load_station_catalog;
use fuelstop_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_PLAN_END, ARG_PLAN_MAX_RANGE, ARG_PLAN_MAX_STATION_DISTANCE, ARG_PLAN_MPG,
    ARG_PLAN_OSRM_BASE_URL, ARG_PLAN_OSRM_PROFILE, ARG_PLAN_START, ARG_PLAN_STATIONS,
    ARG_PLAN_STRATEGY, ARG_PLAN_TIMEOUT_SECS, CliError, ENV_PLAN_END, ENV_PLAN_START,
};

/// Catalogue file used when `--stations` is not given.
pub(crate) const DEFAULT_STATIONS_FILE: &str = "stations.json";

/// Projection strategy as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum StrategyArg {
    /// Snap stations to the nearest sampled route point.
    NearestSample,
    /// Project stations onto the nearest sampled route segment.
    Segment,
}

impl From<StrategyArg> for ProjectionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::NearestSample => Self::NearestSample,
            StrategyArg::Segment => Self::Segment,
        }
    }
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan the cheapest refuelling stops between two coordinates. \
                 Stations are read from a JSON catalogue and the route is \
                 fetched from an OSRM instance. The plan is printed as JSON.",
    about = "Plan fuel stops along a route"
)]
#[ortho_config(prefix = "FUELSTOP")]
pub(crate) struct PlanArgs {
    /// Trip origin as "lat,lng".
    #[arg(long = ARG_PLAN_START, value_name = "lat,lng", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) start: Option<String>,
    /// Trip destination as "lat,lng".
    #[arg(long = ARG_PLAN_END, value_name = "lat,lng", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) end: Option<String>,
    /// Path to the JSON station catalogue (defaults to `stations.json`).
    #[arg(long = ARG_PLAN_STATIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) stations: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_PLAN_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// OSRM routing profile.
    #[arg(long = ARG_PLAN_OSRM_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) osrm_profile: Option<String>,
    /// Per-request routing timeout in seconds.
    #[arg(long = ARG_PLAN_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Miles the vehicle can drive on a full tank.
    #[arg(long = ARG_PLAN_MAX_RANGE, value_name = "miles")]
    #[serde(default)]
    pub(crate) max_range: Option<f64>,
    /// Fuel efficiency in miles per gallon.
    #[arg(long = ARG_PLAN_MPG, value_name = "mpg")]
    #[serde(default)]
    pub(crate) mpg: Option<f64>,
    /// Ignore stations farther than this many miles from the route.
    #[arg(long = ARG_PLAN_MAX_STATION_DISTANCE, value_name = "miles")]
    #[serde(default)]
    pub(crate) max_station_distance: Option<f64>,
    /// How stations are placed along the route.
    #[arg(long = ARG_PLAN_STRATEGY, value_enum)]
    #[serde(default)]
    pub(crate) strategy: Option<StrategyArg>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Trip origin.
    pub(crate) start: Coord<f64>,
    /// Trip destination.
    pub(crate) end: Coord<f64>,
    /// Path to the station catalogue.
    pub(crate) stations: Utf8PathBuf,
    /// OSRM client settings.
    pub(crate) routing: HttpRouteProviderConfig,
    /// Planner tunables, including the vehicle.
    pub(crate) planner: PlannerConfig,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.stations, ARG_PLAN_STATIONS)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match path_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let raw_start = args.start.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_START,
            env: ENV_PLAN_START,
        })?;
        let raw_end = args.end.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_END,
            env: ENV_PLAN_END,
        })?;
        let start = parse_coordinate(ARG_PLAN_START, &raw_start)?;
        let end = parse_coordinate(ARG_PLAN_END, &raw_end)?;

        let stations = args
            .stations
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STATIONS_FILE));

        let mut routing = HttpRouteProviderConfig::default();
        if let Some(base_url) = args.osrm_base_url {
            routing.base_url = base_url;
        }
        if let Some(profile) = args.osrm_profile {
            routing = routing.with_profile(profile);
        }
        if let Some(secs) = args.timeout_secs {
            if secs == 0 {
                return Err(CliError::InvalidOption {
                    field: ARG_PLAN_TIMEOUT_SECS,
                    value: secs.to_string(),
                    reason: "must be at least one second",
                });
            }
            routing = routing.with_timeout(Duration::from_secs(secs));
        }

        let vehicle = VehicleProfile::default().with_overrides(args.max_range, args.mpg);
        vehicle.validate().map_err(CliError::InvalidVehicle)?;

        let mut projection = ProjectionConfig::default();
        if let Some(miles) = args.max_station_distance {
            if !miles.is_finite() || miles <= 0.0 {
                return Err(CliError::InvalidOption {
                    field: ARG_PLAN_MAX_STATION_DISTANCE,
                    value: miles.to_string(),
                    reason: "must be a positive number of miles",
                });
            }
            projection = projection.with_max_station_distance(miles);
        }
        if let Some(strategy) = args.strategy {
            projection = projection.with_strategy(strategy.into());
        }

        Ok(Self {
            start,
            end,
            stations,
            routing,
            planner: PlannerConfig {
                projection,
                vehicle,
                ..PlannerConfig::default()
            },
        })
    }
}

/// Parse a `"lat,lng"` pair into a coordinate.
pub(crate) fn parse_coordinate(field: &'static str, raw: &str) -> Result<Coord<f64>, CliError> {
    let invalid = |reason: &'static str| CliError::InvalidOption {
        field,
        value: raw.to_owned(),
        reason,
    };
    let (raw_lat, raw_lng) = raw
        .split_once(',')
        .ok_or_else(|| invalid("expected \"lat,lng\""))?;
    let lat: f64 = raw_lat
        .trim()
        .parse()
        .map_err(|_| invalid("latitude is not a number"))?;
    let lng: f64 = raw_lng
        .trim()
        .parse()
        .map_err(|_| invalid("longitude is not a number"))?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(invalid("latitude must be within [-90, 90]"));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(invalid("longitude must be within [-180, 180]"));
    }
    Ok(Coord { x: lng, y: lat })
}

fn path_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Builds a planner instance for the current plan invocation.
pub(crate) trait PlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Planner>, CliError>;
}

pub(crate) struct DefaultPlannerBuilder;

impl PlannerBuilder for DefaultPlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Planner>, CliError> {
        let store = load_station_catalog(&config.stations)?;
        let provider = HttpRouteProvider::with_config(config.routing.clone()).map_err(|source| {
            CliError::BuildRouteProvider {
                base_url: config.routing.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(FuelPlanner::new(provider, store, config.planner)))
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    let builder = DefaultPlannerBuilder;
    run_plan_with(args, &builder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let plan = execute_plan(args, builder)?;
    write_plan(writer, &plan)
}

fn execute_plan(args: PlanArgs, builder: &dyn PlannerBuilder) -> Result<FuelPlan, CliError> {
    let config = resolve_plan_config(args)?;
    let planner = builder.build(&config)?;
    log::info!(
        "Planning from ({}, {}) to ({}, {})",
        config.start.y,
        config.start.x,
        config.end.y,
        config.end.x
    );
    let plan = planner
        .plan(&PlanRequest::new(config.start, config.end))
        .map_err(|source| CliError::Plan { source })?;
    log::info!(
        "Plan has {} stops costing ${:.2} over {:.1} miles",
        plan.fuel_stops.len(),
        plan.total_fuel_cost,
        plan.total_distance
    );
    Ok(plan)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn write_plan(writer: &mut dyn Write, plan: &FuelPlan) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(plan).map_err(CliError::SerialisePlan)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer.write_all(b"\n").map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
