//! Error kinds surfaced by planning.
//!
//! Callers see three classifications through [`PlanError`]: the plan is
//! infeasible, a collaborator failed, or the inputs were malformed. None of
//! them is ever papered over with a default or partial plan.

use thiserror::Error;

use crate::provider::RouteProviderError;
use crate::store::StationQueryError;

/// Malformed or degenerate planning inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    /// The route polyline has no points.
    #[error("route must contain at least one point")]
    EmptyRoute,
    /// The cumulative distance array does not match the polyline.
    #[error("route has {points} points but {cumulative} cumulative distances")]
    CumulativeLengthMismatch {
        /// Number of polyline vertices.
        points: usize,
        /// Number of cumulative distance entries.
        cumulative: usize,
    },
    /// Cumulative distances do not start at zero or decrease.
    #[error("cumulative distances must start at zero and never decrease (index {index})")]
    NonMonotonicCumulative {
        /// First offending index.
        index: usize,
    },
    /// A route distance is negative or not finite.
    #[error("route distance must be a finite, non-negative number of miles, got {miles}")]
    InvalidDistance {
        /// Offending distance.
        miles: f64,
    },
    /// The tank range is zero, negative or not finite.
    #[error("max range must be a positive number of miles, got {miles}")]
    InvalidRange {
        /// Offending range.
        miles: f64,
    },
    /// Fuel efficiency is zero, negative or not finite.
    #[error("fuel efficiency must be a positive number of miles per gallon, got {mpg}")]
    InvalidEfficiency {
        /// Offending efficiency.
        mpg: f64,
    },
    /// A station carries a negative or non-finite price.
    #[error("station {station_id} has invalid price {price}")]
    InvalidPrice {
        /// Station identifier.
        station_id: u64,
        /// Offending price per gallon.
        price: f64,
    },
    /// Projected stations are not ordered by distance from start.
    #[error("stations must be sorted by distance from start (station {station_id} out of order)")]
    UnsortedStations {
        /// First station found out of order.
        station_id: u64,
    },
    /// A projected station lies past the end of the route.
    #[error("station {station_id} is {distance} miles along a {total} mile route")]
    StationBeyondRoute {
        /// Offending station.
        station_id: u64,
        /// Its distance from the start in miles.
        distance: f64,
        /// Total route distance in miles.
        total: f64,
    },
}

/// Failure of an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The route provider failed, timed out or found no route.
    #[error("route provider failed: {0}")]
    Route(#[from] RouteProviderError),
    /// The spatial station query failed.
    #[error("station query failed: {0}")]
    Stations(#[from] StationQueryError),
}

/// Errors returned by [`Planner::plan`](crate::Planner::plan) and the
/// [`FuelStopOptimizer`](crate::FuelStopOptimizer).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// No stop sequence connects start and destination within the tank range.
    #[error(
        "destination is unreachable with a max range of {max_range_miles} miles; \
         a gap between consecutive stations exceeds the vehicle range"
    )]
    Unreachable {
        /// Tank range that could not be satisfied.
        max_range_miles: f64,
    },
    /// A route or station collaborator failed.
    #[error(transparent)]
    ProviderUnavailable(#[from] ProviderError),
    /// The inputs were rejected before optimisation.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl From<RouteProviderError> for PlanError {
    fn from(err: RouteProviderError) -> Self {
        Self::ProviderUnavailable(ProviderError::Route(err))
    }
}

impl From<StationQueryError> for PlanError {
    fn from(err: StationQueryError) -> Self {
        Self::ProviderUnavailable(ProviderError::Stations(err))
    }
}
