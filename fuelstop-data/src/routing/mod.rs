//! HTTP route provider backed by an OSRM routing service.
//!
//! This module provides [`HttpRouteProvider`], an implementation of
//! [`fuelstop_core::RouteProvider`] that fetches driving routes from the OSRM
//! Route API and decodes their polyline geometry.
//!
//! # Architecture
//!
//! The provider calls `{base}/route/v1/{profile}/{lng,lat;...}` with
//! `overview=full&geometries=polyline`. The synchronous
//! [`RouteProvider`](fuelstop_core::RouteProvider) trait is implemented by
//! blocking on async HTTP calls internally, keeping the core library embeddable
//! in synchronous contexts.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use fuelstop_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
//! use fuelstop_core::RouteProvider;
//! use geo::Coord;
//!
//! let config = HttpRouteProviderConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(30))
//!     .with_user_agent("my-app/1.0");
//! let provider = HttpRouteProvider::with_config(config)?;
//!
//! let route = provider.route(Coord { x: -96.79, y: 46.88 }, Coord { x: -87.63, y: 41.88 })?;
//! println!("{:.1} miles", route.total_miles());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod osrm;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, DEFAULT_USER_AGENT, HttpRouteProvider,
    HttpRouteProviderConfig, ProviderBuildError,
};
