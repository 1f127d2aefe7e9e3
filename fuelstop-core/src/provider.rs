//! Route provider boundary.
//!
//! The [`RouteProvider`] trait abstracts the external routing service. Callers
//! ask for a route between two coordinates or through an ordered list of
//! waypoints and receive a [`Route`] with distances already in miles.

use geo::Coord;
use thiserror::Error;

use crate::Route;

/// Errors from [`RouteProvider`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteProviderError {
    /// The service found no drivable route between the points.
    #[error("no route exists between the requested points")]
    NoRoute,
    /// Fewer than two waypoints were supplied.
    #[error("at least two waypoints are required, got {count}")]
    InsufficientWaypoints {
        /// Number of waypoints supplied.
        count: usize,
    },
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("request to {url} failed with HTTP status {status}: {message}")]
    HttpError {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail.
        message: String,
    },
    /// The request failed before a response was received.
    #[error("network error requesting {url}: {message}")]
    NetworkError {
        /// Requested URL.
        url: String,
        /// Error detail.
        message: String,
    },
    /// The service returned a non-`Ok` status code.
    #[error("routing service returned {code}: {message}")]
    ServiceError {
        /// Service status code.
        code: String,
        /// Service message, possibly empty.
        message: String,
    },
    /// The response could not be decoded into a route.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Error detail.
        message: String,
    },
}

/// Fetch driving routes from an external service.
///
/// Implementations must return [`RouteProviderError::NoRoute`] when the
/// service reports that the points cannot be connected, so callers can tell
/// that apart from transport failures.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use fuelstop_core::{EncodedGeometry, Route, RouteProvider, RouteProviderError};
/// use fuelstop_core::geometry::cumulative_distances;
///
/// struct StraightLine;
///
/// impl RouteProvider for StraightLine {
///     fn route_through(&self, waypoints: &[Coord<f64>]) -> Result<Route, RouteProviderError> {
///         if waypoints.len() < 2 {
///             return Err(RouteProviderError::InsufficientWaypoints { count: waypoints.len() });
///         }
///         let total = cumulative_distances(waypoints).last().copied().unwrap_or_default();
///         Route::new(EncodedGeometry::default(), waypoints.to_vec(), total)
///             .map_err(|err| RouteProviderError::ParseError { message: err.to_string() })
///     }
/// }
///
/// let route = StraightLine.route(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 })?;
/// assert!(route.total_miles() > 69.0);
/// # Ok::<(), RouteProviderError>(())
/// ```
pub trait RouteProvider {
    /// Route through `waypoints` in order.
    ///
    /// Implementations must return
    /// [`RouteProviderError::InsufficientWaypoints`] for fewer than two points.
    fn route_through(&self, waypoints: &[Coord<f64>]) -> Result<Route, RouteProviderError>;

    /// Route directly from `start` to `end`.
    fn route(&self, start: Coord<f64>, end: Coord<f64>) -> Result<Route, RouteProviderError> {
        self.route_through(&[start, end])
    }
}

impl<T: RouteProvider + ?Sized> RouteProvider for &T {
    fn route_through(&self, waypoints: &[Coord<f64>]) -> Result<Route, RouteProviderError> {
        (**self).route_through(waypoints)
    }

    fn route(&self, start: Coord<f64>, end: Coord<f64>) -> Result<Route, RouteProviderError> {
        (**self).route(start, end)
    }
}
