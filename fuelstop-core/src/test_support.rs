//! Test-only, deterministic collaborators used by unit and behaviour tests.

use std::sync::{Mutex, PoisonError};

use geo::{Coord, Intersects, Rect};

use crate::{
    EncodedGeometry, Route, RouteProvider, RouteProviderError, Station, StationQueryError,
    StationStore,
};

/// In-memory [`StationStore`] implementation used in tests.
///
/// The store performs a linear scan and is intended only for small datasets.
#[derive(Default, Debug)]
pub struct MemoryStationStore {
    stations: Vec<Station>,
    failure: Option<String>,
}

impl MemoryStationStore {
    /// Create a store from a collection of stations.
    #[must_use]
    pub fn with_stations<I>(stations: I) -> Self
    where
        I: IntoIterator<Item = Station>,
    {
        Self {
            stations: stations.into_iter().collect(),
            failure: None,
        }
    }

    /// Create a store whose every query fails with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            stations: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

impl StationStore for MemoryStationStore {
    fn stations_in_bbox(
        &self,
        bbox: &Rect<f64>,
    ) -> Result<Box<dyn Iterator<Item = Station> + Send + '_>, StationQueryError> {
        if let Some(message) = &self.failure {
            return Err(StationQueryError::Unavailable {
                message: message.clone(),
            });
        }
        let bbox = *bbox;
        Ok(Box::new(
            self.stations
                .iter()
                // `Intersects` treats boundary points as inside the rectangle.
                .filter(move |s| bbox.intersects(&s.location))
                .cloned(),
        ))
    }
}

/// Default number of interpolated segments per waypoint leg.
const DEFAULT_STEPS_PER_LEG: u32 = 100;

/// [`RouteProvider`] that drives in straight lines between waypoints.
///
/// Each leg is linearly interpolated in degrees, the reported distance is the
/// great-circle length of the resulting polyline and every call is recorded so
/// tests can assert on the waypoints requested.
#[derive(Debug)]
pub struct StraightLineRouteProvider {
    steps_per_leg: u32,
    failure: Option<RouteProviderError>,
    calls: Mutex<Vec<Vec<Coord<f64>>>>,
}

impl Default for StraightLineRouteProvider {
    fn default() -> Self {
        Self {
            steps_per_leg: DEFAULT_STEPS_PER_LEG,
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl StraightLineRouteProvider {
    /// Create a provider that fails every request with `error`.
    #[must_use]
    pub fn failing(error: RouteProviderError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Use `steps` interpolated segments per leg instead of the default.
    #[must_use]
    pub fn with_steps_per_leg(mut self, steps: u32) -> Self {
        self.steps_per_leg = steps.max(1);
        self
    }

    /// Waypoint lists requested so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<Coord<f64>>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[expect(clippy::float_arithmetic, reason = "linear interpolation in degrees")]
    fn interpolate(&self, waypoints: &[Coord<f64>]) -> Vec<Coord<f64>> {
        let steps = f64::from(self.steps_per_leg);
        let mut points = Vec::new();
        if let Some(first) = waypoints.first() {
            points.push(*first);
        }
        for leg in waypoints.windows(2) {
            let (Some(a), Some(b)) = (leg.first(), leg.get(1)) else {
                continue;
            };
            for step in 1..=self.steps_per_leg {
                let t = f64::from(step) / steps;
                points.push(Coord {
                    x: a.x + (b.x - a.x) * t,
                    y: a.y + (b.y - a.y) * t,
                });
            }
        }
        points
    }
}

impl RouteProvider for StraightLineRouteProvider {
    fn route_through(&self, waypoints: &[Coord<f64>]) -> Result<Route, RouteProviderError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(waypoints.to_vec());
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        if waypoints.len() < 2 {
            return Err(RouteProviderError::InsufficientWaypoints {
                count: waypoints.len(),
            });
        }

        let points = self.interpolate(waypoints);
        let total = crate::geometry::cumulative_distances(&points)
            .last()
            .copied()
            .unwrap_or_default();
        let geometry = EncodedGeometry::new(format!("straight-line:{}", waypoints.len()));
        Route::new(geometry, points, total).map_err(|err| RouteProviderError::ParseError {
            message: err.to_string(),
        })
    }
}
