//! Core domain types and algorithms for the fuel stop planner.
//!
//! The crate turns a driving route, a set of candidate stations and a vehicle
//! profile into the cheapest ordered sequence of refuelling stops. It is split
//! into pure building blocks ([`geometry`], [`StationProjector`],
//! [`FuelStopOptimizer`]) and the [`FuelPlanner`] orchestrator, which talks to
//! the outside world only through the [`RouteProvider`] and [`StationStore`]
//! traits.
//!
//! Coordinates are WGS84 [`geo::Coord`] values with `x = longitude` and
//! `y = latitude`. Distances are miles throughout.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod geometry;
pub mod optimizer;
pub mod plan;
pub mod planner;
pub mod projection;
pub mod provider;
pub mod route;
pub mod station;
pub mod store;
pub mod units;
pub mod vehicle;

#[doc(hidden)]
pub mod test_support;

pub use error::{InvalidInputError, PlanError, ProviderError};
pub use optimizer::{FuelStopOptimizer, OptimizationNode};
pub use plan::{FuelPlan, FuelStop};
pub use planner::{FuelPlanner, PlanRequest, Planner, PlannerConfig};
pub use projection::{ProjectionConfig, ProjectionStrategy, StationProjector};
pub use provider::{RouteProvider, RouteProviderError};
pub use route::{EncodedGeometry, Route};
pub use station::{ProjectedStation, Station};
pub use store::{IndexedStationStore, StationQueryError, StationStore};
pub use vehicle::VehicleProfile;
