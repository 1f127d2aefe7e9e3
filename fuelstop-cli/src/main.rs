//! Entry point for the `fuelstop` command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use fuelstop_cli::CliError;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match fuelstop_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        // Help and version requests surface as clap errors; let clap print them.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
