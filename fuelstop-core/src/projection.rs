//! Place candidate stations along a route.
//!
//! [`StationProjector`] assigns each station a distance from the route origin
//! and a distance from the route itself, drops stations that are too far off
//! the road and returns the rest sorted by position. Two strategies are
//! available; they may disagree slightly on curved routes, so the choice is
//! explicit configuration rather than a blend.
//!
//! Both strategies first reject route samples outside a fixed-degree
//! rectangle around the station (±0.4° latitude, ±0.5° longitude by default).
//! A station with no sample or segment inside that window is dropped even if
//! its true distance would pass the threshold.

use std::cmp::Ordering;

use geo::Coord;

use crate::geometry::{haversine_miles, project_onto_segment};
use crate::{ProjectedStation, Route, Station};

/// How a station's along-route distance is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ProjectionStrategy {
    /// Snap to the nearest downsampled route vertex.
    #[default]
    NearestSample,
    /// Project onto the nearest downsampled route segment and interpolate.
    Segment,
}

/// Default maximum perpendicular distance from the route, in miles.
pub const DEFAULT_MAX_STATION_DISTANCE_MILES: f64 = 25.0;

/// Default cap used to derive the sampling stride.
pub const DEFAULT_MAX_SAMPLES: usize = 2000;

/// Tunables for [`StationProjector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    /// Projection strategy.
    pub strategy: ProjectionStrategy,
    /// Stations farther than this from the route are discarded.
    pub max_station_distance_miles: f64,
    /// The route is sampled with stride `max(1, len / max_samples)`.
    pub max_samples: usize,
    /// Latitude half-width of the pre-filter window, in degrees.
    pub lat_margin_deg: f64,
    /// Longitude half-width of the pre-filter window, in degrees.
    pub lng_margin_deg: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            strategy: ProjectionStrategy::default(),
            max_station_distance_miles: DEFAULT_MAX_STATION_DISTANCE_MILES,
            max_samples: DEFAULT_MAX_SAMPLES,
            lat_margin_deg: 0.4,
            lng_margin_deg: 0.5,
        }
    }
}

impl ProjectionConfig {
    /// Use `strategy` instead of the default.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: ProjectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Override the off-route distance threshold.
    #[must_use]
    pub const fn with_max_station_distance(mut self, miles: f64) -> Self {
        self.max_station_distance_miles = miles;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct RouteSample {
    point: Coord<f64>,
    cumulative: f64,
}

/// Best placement found for one station.
#[derive(Debug, Clone, Copy)]
struct Placement {
    along: f64,
    off_route: f64,
}

/// Projects stations onto a route and filters them by distance.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::{EncodedGeometry, ProjectionConfig, Route, Station, StationProjector};
///
/// let route = Route::new(
///     EncodedGeometry::default(),
///     vec![Coord { x: -90.0, y: 40.0 }, Coord { x: -90.0, y: 41.0 }, Coord { x: -90.0, y: 42.0 }],
///     138.2,
/// )?;
/// let near = Station::new(1, "Near", Coord { x: -90.05, y: 41.0 }, 3.5);
/// let far = Station::new(2, "Far", Coord { x: -85.0, y: 41.0 }, 2.9);
///
/// let projected = StationProjector::new(ProjectionConfig::default()).project(&route, [near, far]);
/// assert_eq!(projected.len(), 1);
/// assert_eq!(projected[0].station.id, 1);
/// # Ok::<(), fuelstop_core::InvalidInputError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StationProjector {
    config: ProjectionConfig,
}

impl StationProjector {
    /// Construct a projector with explicit configuration.
    #[must_use]
    pub const fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project `stations` onto `route`.
    ///
    /// The result holds only stations within the configured distance of the
    /// route, sorted by `distance_from_start` and then by station id. Every
    /// `distance_from_start` lies within `[0, route.total_miles()]`.
    #[must_use]
    pub fn project<I>(&self, route: &Route, stations: I) -> Vec<ProjectedStation>
    where
        I: IntoIterator<Item = Station>,
    {
        let samples = self.sample_route(route);
        log::debug!(
            "Using {} sampled route points for {:?} projection",
            samples.len(),
            self.config.strategy
        );

        let mut candidates = 0_usize;
        let mut projected: Vec<ProjectedStation> = stations
            .into_iter()
            .inspect(|_| candidates += 1)
            .filter_map(|station| {
                let placement = match self.config.strategy {
                    ProjectionStrategy::NearestSample => self.nearest_sample(&samples, &station),
                    ProjectionStrategy::Segment => self.nearest_segment(&samples, &station),
                }?;
                (placement.off_route <= self.config.max_station_distance_miles).then(|| {
                    let along = placement.along.clamp(0.0, route.total_miles());
                    ProjectedStation::new(station, along, placement.off_route)
                })
            })
            .collect();

        projected.sort_by(compare_projected);
        log::info!(
            "Stations projected onto route: {} of {candidates} candidates",
            projected.len()
        );
        projected
    }

    /// Downsample the route with a fixed stride, always keeping the last vertex.
    fn sample_route(&self, route: &Route) -> Vec<RouteSample> {
        let points = route.points();
        let cumulative = route.cumulative_miles();
        let step = points
            .len()
            .checked_div(self.config.max_samples)
            .unwrap_or_default()
            .max(1);

        let mut samples: Vec<RouteSample> = points
            .iter()
            .zip(cumulative)
            .step_by(step)
            .map(|(&point, &cumulative)| RouteSample { point, cumulative })
            .collect();

        let last_index = points.len().saturating_sub(1);
        if !last_index.is_multiple_of(step)
            && let (Some(&point), Some(&cumulative)) = (points.last(), cumulative.last())
        {
            samples.push(RouteSample { point, cumulative });
        }
        samples
    }

    #[expect(clippy::float_arithmetic, reason = "pre-filter compares degree deltas")]
    fn within_window(&self, sample: Coord<f64>, station: Coord<f64>) -> bool {
        (sample.y - station.y).abs() <= self.config.lat_margin_deg
            && (sample.x - station.x).abs() <= self.config.lng_margin_deg
    }

    fn nearest_sample(&self, samples: &[RouteSample], station: &Station) -> Option<Placement> {
        let mut best: Option<Placement> = None;
        for sample in samples {
            if !self.within_window(sample.point, station.location) {
                continue;
            }
            let off_route = haversine_miles(station.location, sample.point);
            if best.is_none_or(|current| off_route < current.off_route) {
                best = Some(Placement {
                    along: sample.cumulative,
                    off_route,
                });
            }
        }
        best
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "segment windows and interpolation are floating-point"
    )]
    fn nearest_segment(&self, samples: &[RouteSample], station: &Station) -> Option<Placement> {
        let location = station.location;
        let mut best: Option<Placement> = None;
        for (a, b) in segments(samples) {
            let lat_lo = a.point.y.min(b.point.y) - self.config.lat_margin_deg;
            let lat_hi = a.point.y.max(b.point.y) + self.config.lat_margin_deg;
            let lng_lo = a.point.x.min(b.point.x) - self.config.lng_margin_deg;
            let lng_hi = a.point.x.max(b.point.x) + self.config.lng_margin_deg;
            if location.y < lat_lo || location.y > lat_hi || location.x < lng_lo || location.x > lng_hi
            {
                continue;
            }

            let hit = project_onto_segment(location, a.point, b.point);
            let off_route = haversine_miles(location, hit.point);
            if best.is_none_or(|current| off_route < current.off_route) {
                best = Some(Placement {
                    along: a.cumulative + hit.t * (b.cumulative - a.cumulative),
                    off_route,
                });
            }
        }
        best
    }
}

/// Consecutive sample pairs. A single-sample route yields one degenerate
/// segment so that stations next to it can still be placed.
fn segments(samples: &[RouteSample]) -> Vec<(RouteSample, RouteSample)> {
    match samples {
        [] => Vec::new(),
        [only] => vec![(*only, *only)],
        _ => samples
            .windows(2)
            .filter_map(|pair| match pair {
                [a, b] => Some((*a, *b)),
                _ => None,
            })
            .collect(),
    }
}

fn compare_projected(lhs: &ProjectedStation, rhs: &ProjectedStation) -> Ordering {
    lhs.distance_from_start
        .total_cmp(&rhs.distance_from_start)
        .then_with(|| lhs.station.id.cmp(&rhs.station.id))
}
