//! Two-pass planning: route, project, optimise, then re-route through stops.
//!
//! The optimiser works on along-route distances measured on the direct
//! route. Driving to each chosen station adds small detours, so once stops are
//! known the planner asks the route provider for the true path through them and
//! reports that distance and geometry. The optimised cost is never recomputed.

use geo::Coord;

use crate::{
    FuelPlan, FuelStopOptimizer, PlanError, ProjectionConfig, RouteProvider, StationProjector,
    StationStore, VehicleProfile,
};

/// Default padding around the route extent for the station query, in degrees.
pub const DEFAULT_BBOX_PADDING_DEG: f64 = 0.5;

/// Parameters for a planning request.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use fuelstop_core::PlanRequest;
///
/// let request = PlanRequest::new(Coord { x: -96.79, y: 46.88 }, Coord { x: -87.63, y: 41.88 })
///     .with_mpg(8.5);
/// assert_eq!(request.mpg, Some(8.5));
/// assert_eq!(request.max_range_miles, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRequest {
    /// Trip origin.
    pub start: Coord<f64>,
    /// Trip destination.
    pub end: Coord<f64>,
    /// Overrides the configured tank range.
    pub max_range_miles: Option<f64>,
    /// Overrides the configured fuel efficiency.
    pub mpg: Option<f64>,
}

impl PlanRequest {
    /// Plan from `start` to `end` with the configured vehicle.
    #[must_use]
    pub const fn new(start: Coord<f64>, end: Coord<f64>) -> Self {
        Self {
            start,
            end,
            max_range_miles: None,
            mpg: None,
        }
    }

    /// Override the tank range for this request.
    #[must_use]
    pub const fn with_max_range(mut self, miles: f64) -> Self {
        self.max_range_miles = Some(miles);
        self
    }

    /// Override the fuel efficiency for this request.
    #[must_use]
    pub const fn with_mpg(mut self, mpg: f64) -> Self {
        self.mpg = Some(mpg);
        self
    }
}

/// Tunables shared by every request a [`FuelPlanner`] serves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Station projection settings.
    pub projection: ProjectionConfig,
    /// Vehicle used when a request carries no overrides.
    pub vehicle: VehicleProfile,
    /// Degrees added on every side of the route extent for the station query.
    pub bbox_padding_deg: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionConfig::default(),
            vehicle: VehicleProfile::default(),
            bbox_padding_deg: DEFAULT_BBOX_PADDING_DEG,
        }
    }
}

/// Produce a fuel plan for a request.
///
/// Planners must be `Send + Sync` so one instance can serve concurrent
/// requests.
pub trait Planner: Send + Sync {
    /// Plan the cheapest refuelling stops for `request`.
    ///
    /// # Errors
    /// Returns [`PlanError`] when the inputs are invalid, a collaborator fails
    /// or no feasible plan exists.
    fn plan(&self, request: &PlanRequest) -> Result<FuelPlan, PlanError>;
}

/// [`Planner`] composed from a route provider and a station store.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use fuelstop_core::test_support::{MemoryStationStore, StraightLineRouteProvider};
/// use fuelstop_core::{FuelPlanner, PlanRequest, Planner, PlannerConfig};
///
/// let planner = FuelPlanner::new(
///     StraightLineRouteProvider::default(),
///     MemoryStationStore::default(),
///     PlannerConfig::default(),
/// );
/// let request = PlanRequest::new(Coord { x: -90.0, y: 40.0 }, Coord { x: -90.0, y: 41.0 });
/// let plan = planner.plan(&request)?;
/// assert!(plan.fuel_stops.is_empty());
/// # Ok::<(), fuelstop_core::PlanError>(())
/// ```
#[derive(Debug)]
pub struct FuelPlanner<R, S> {
    routes: R,
    stations: S,
    config: PlannerConfig,
}

impl<R, S> FuelPlanner<R, S> {
    /// Compose a planner from its collaborators.
    #[must_use]
    pub const fn new(routes: R, stations: S, config: PlannerConfig) -> Self {
        Self {
            routes,
            stations,
            config,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }
}

impl<R, S> FuelPlanner<R, S>
where
    R: RouteProvider,
    S: StationStore,
{
    fn run(&self, request: &PlanRequest) -> Result<FuelPlan, PlanError> {
        let vehicle = self
            .config
            .vehicle
            .with_overrides(request.max_range_miles, request.mpg);
        vehicle.validate()?;

        let route = self.routes.route(request.start, request.end)?;
        log::info!("Route distance: {:.1} miles", route.total_miles());

        let bbox = route.padded_bounds(self.config.bbox_padding_deg);
        let candidates = self.stations.stations_in_bbox(&bbox)?;
        let projected = StationProjector::new(self.config.projection).project(&route, candidates);

        let plan = FuelStopOptimizer::new(vehicle).optimize(&projected, route.total_miles())?;
        if !plan.has_stops() {
            return Ok(plan.with_route(route.total_miles(), route.geometry().clone()));
        }

        let waypoints = plan.waypoints(request.start, request.end);
        let driven = self.routes.route_through(&waypoints)?;
        log::info!(
            "Second pass through {} stops: {:.1} miles",
            plan.fuel_stops.len(),
            driven.total_miles()
        );
        Ok(plan.with_route(driven.total_miles(), driven.geometry().clone()))
    }
}

impl<R, S> Planner for FuelPlanner<R, S>
where
    R: RouteProvider + Send + Sync,
    S: StationStore + Send + Sync,
{
    fn plan(&self, request: &PlanRequest) -> Result<FuelPlan, PlanError> {
        self.run(request)
    }
}
