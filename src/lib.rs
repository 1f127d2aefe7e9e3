//! Facade crate for the fuel stop planner.
//!
//! This crate re-exports the core domain types and exposes the OSRM route
//! provider and station catalog loader behind the `provider-osrm` feature.

#![forbid(unsafe_code)]

pub use fuelstop_core::{
    EncodedGeometry, FuelPlan, FuelPlanner, FuelStop, FuelStopOptimizer, IndexedStationStore,
    InvalidInputError, PlanError, PlanRequest, Planner, PlannerConfig, ProjectedStation,
    ProjectionConfig, ProjectionStrategy, ProviderError, Route, RouteProvider, RouteProviderError,
    Station, StationProjector, StationQueryError, StationStore, VehicleProfile,
};

#[cfg(feature = "provider-osrm")]
pub use fuelstop_data::catalog::{CatalogError, load_station_catalog};
#[cfg(feature = "provider-osrm")]
pub use fuelstop_data::routing::{HttpRouteProvider, HttpRouteProviderConfig, ProviderBuildError};
