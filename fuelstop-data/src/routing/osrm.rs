//! OSRM API response types for the Route service.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// Status code OSRM returns when the coordinates cannot be connected.
pub const NO_ROUTE_CODE: &str = "NoRoute";

/// OSRM Route API response.
///
/// The response contains one or more routes on success or an error message
/// on failure. The `code` field indicates the response status.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route found between the coordinates
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"TooBig"` - Too many coordinates
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes; the first is the recommended one.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

/// A single route from the OSRM response.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Encoded polyline of the full route (precision 5).
    pub geometry: String,
    /// Driving distance in meters.
    pub distance: f64,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Check if OSRM reported that no route exists.
    #[must_use]
    pub fn is_no_route(&self) -> bool {
        self.code == NO_ROUTE_CODE
    }
}
