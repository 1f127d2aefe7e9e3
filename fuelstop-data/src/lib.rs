//! External data adapters for the fuel stop planner.
//!
//! Responsibilities:
//! - Fetch driving routes from an OSRM service ([`routing`]).
//! - Load the station catalogue from JSON files ([`catalog`]).
//!
//! Boundaries:
//! - Do not encode planning rules (live in `fuelstop-core`).
//! - Keep blocking I/O off async executors.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod routing;

pub use catalog::{CatalogError, load_station_catalog, read_station_catalog};
pub use routing::{HttpRouteProvider, HttpRouteProviderConfig, ProviderBuildError};
