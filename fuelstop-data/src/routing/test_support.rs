//! Test utilities for route providers.
//!
//! [`StubRouteProvider`] is a deterministic test double for [`RouteProvider`]
//! that returns pre-configured responses without making HTTP requests.

use fuelstop_core::{EncodedGeometry, Route, RouteProvider, RouteProviderError};
use geo::Coord;

/// Stub `RouteProvider` for testing.
///
/// # Example
///
/// ```
/// use fuelstop_data::routing::test_support::StubRouteProvider;
/// use fuelstop_core::{RouteProvider, RouteProviderError};
/// use geo::Coord;
///
/// let provider = StubRouteProvider::with_error(RouteProviderError::NoRoute);
/// let result = provider.route(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
/// assert_eq!(result, Err(RouteProviderError::NoRoute));
/// ```
#[derive(Debug, Clone)]
pub struct StubRouteProvider {
    response: Result<Route, RouteProviderError>,
}

impl StubRouteProvider {
    /// Create a provider that returns `route` for every request.
    #[must_use]
    pub const fn with_route(route: Route) -> Self {
        Self {
            response: Ok(route),
        }
    }

    /// Create a provider that returns `error` for every request with at least
    /// two waypoints.
    #[must_use]
    pub const fn with_error(error: RouteProviderError) -> Self {
        Self {
            response: Err(error),
        }
    }

    /// Create a provider returning the polyline through `points`, reporting
    /// `total_miles` as the driving distance.
    ///
    /// # Errors
    /// Returns [`RouteProviderError::ParseError`] for an empty or
    /// unencodable polyline or an invalid distance.
    pub fn with_points(points: &[Coord<f64>], total_miles: f64) -> Result<Self, RouteProviderError> {
        let encoded = polyline::encode_coordinates(points.iter().copied(), 5).map_err(|err| {
            RouteProviderError::ParseError {
                message: err.to_string(),
            }
        })?;
        let geometry = EncodedGeometry::new(encoded);
        let route = Route::new(geometry, points.to_vec(), total_miles).map_err(|err| {
            RouteProviderError::ParseError {
                message: err.to_string(),
            }
        })?;
        Ok(Self::with_route(route))
    }
}

impl RouteProvider for StubRouteProvider {
    fn route_through(&self, waypoints: &[Coord<f64>]) -> Result<Route, RouteProviderError> {
        if waypoints.len() < 2 {
            return Err(RouteProviderError::InsufficientWaypoints {
                count: waypoints.len(),
            });
        }
        self.response.clone()
    }
}
