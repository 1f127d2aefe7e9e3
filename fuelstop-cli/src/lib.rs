//! Command-line interface for the fuel stop planner.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::CliError;

const ARG_PLAN_START: &str = "start";
const ARG_PLAN_END: &str = "end";
const ARG_PLAN_STATIONS: &str = "stations";
const ARG_PLAN_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_PLAN_OSRM_PROFILE: &str = "osrm-profile";
const ARG_PLAN_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_PLAN_MAX_RANGE: &str = "max-range";
const ARG_PLAN_MPG: &str = "mpg";
const ARG_PLAN_MAX_STATION_DISTANCE: &str = "max-station-distance";
const ARG_PLAN_STRATEGY: &str = "strategy";
const ENV_PLAN_START: &str = "FUELSTOP_CMDS_PLAN_START";
const ENV_PLAN_END: &str = "FUELSTOP_CMDS_PLAN_END";

/// Run the fuel stop CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration, planning or
/// output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "fuelstop",
    about = "Plan the cheapest refuelling stops along a driving route",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan fuel stops between two coordinates.
    Plan(plan::PlanArgs),
}

#[cfg(test)]
mod tests;
