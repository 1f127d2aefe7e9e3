//! Error types emitted by the fuel stop CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use fuelstop_core::{InvalidInputError, PlanError};
use fuelstop_data::{CatalogError, ProviderBuildError};
use thiserror::Error;

/// Errors emitted by the fuel stop CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// An option was supplied with a value the planner cannot use.
    #[error("invalid {field} {value:?}: {reason}")]
    InvalidOption {
        /// Flag name of the option.
        field: &'static str,
        /// Value as supplied.
        value: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// The vehicle overrides describe an impossible vehicle.
    #[error("invalid vehicle: {0}")]
    InvalidVehicle(#[source] InvalidInputError),
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name of the option.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name of the option.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name of the option.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Loading the station catalogue failed.
    #[error(transparent)]
    LoadCatalog(#[from] CatalogError),
    /// Constructing the route provider failed.
    #[error("failed to build route provider for {base_url:?}: {source}")]
    BuildRouteProvider {
        /// OSRM base URL the provider was configured with.
        base_url: String,
        /// Underlying construction error.
        #[source]
        source: ProviderBuildError,
    },
    /// The planner rejected the request.
    #[error("planning failed: {source}")]
    Plan {
        /// Underlying planner error.
        source: PlanError,
    },
    /// Serializing the plan failed.
    #[error("failed to serialize fuel plan: {0}")]
    SerialisePlan(#[source] serde_json::Error),
    /// Writing the plan output failed.
    #[error("failed to write fuel plan: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
