//! Refuelling plans produced by the optimiser and planner.

use geo::Coord;

use crate::EncodedGeometry;
use crate::units::round_to;

/// One refuelling stop.
///
/// `gallons` and `cost` describe the fuel bought here to cover the leg up to
/// the next stop (or the destination).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuelStop {
    /// Catalogue identifier of the station.
    pub station_id: u64,
    /// Station display name.
    pub name: String,
    /// Station latitude in degrees.
    pub lat: f64,
    /// Station longitude in degrees.
    pub lng: f64,
    /// Along-route miles from the origin, rounded to one decimal.
    pub distance_from_start: f64,
    /// Price per gallon at the station.
    pub price_per_gallon: f64,
    /// Gallons purchased, rounded to two decimals.
    pub gallons: f64,
    /// Cost of the purchase, rounded to two decimals.
    pub cost: f64,
}

impl FuelStop {
    /// Station position as a coordinate.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }
}

/// A complete, cost-optimal refuelling plan.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::FuelPlan;
///
/// let plan = FuelPlan::without_stops(300.0, 30.0);
/// assert!(plan.fuel_stops.is_empty());
/// assert_eq!(plan.total_fuel_cost, 0.0);
///
/// let start = Coord { x: -96.79, y: 46.88 };
/// let end = Coord { x: -87.63, y: 41.88 };
/// assert_eq!(plan.waypoints(start, end), vec![start, end]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuelPlan {
    /// Stops in driving order.
    pub fuel_stops: Vec<FuelStop>,
    /// Minimal total fuel cost, rounded to two decimals.
    pub total_fuel_cost: f64,
    /// Total trip distance in miles, rounded to one decimal.
    pub total_distance: f64,
    /// Total fuel consumed in gallons, rounded to two decimals.
    pub total_gallons: f64,
    /// Encoded route geometry, if the plan was produced against a route.
    pub route_geometry: Option<EncodedGeometry>,
}

impl FuelPlan {
    /// A plan that drives straight through on the starting tank.
    #[must_use]
    pub fn without_stops(total_distance: f64, total_gallons: f64) -> Self {
        Self {
            fuel_stops: Vec::new(),
            total_fuel_cost: 0.0,
            total_distance: round_to(total_distance, 1),
            total_gallons: round_to(total_gallons, 2),
            route_geometry: None,
        }
    }

    /// Whether any refuelling stop is needed.
    #[must_use]
    pub fn has_stops(&self) -> bool {
        !self.fuel_stops.is_empty()
    }

    /// Ordered waypoints `[start, stop_1, …, stop_k, end]` for driving the plan.
    #[must_use]
    pub fn waypoints(&self, start: Coord<f64>, end: Coord<f64>) -> Vec<Coord<f64>> {
        let mut waypoints = Vec::with_capacity(self.fuel_stops.len() + 2);
        waypoints.push(start);
        waypoints.extend(self.fuel_stops.iter().map(FuelStop::location));
        waypoints.push(end);
        waypoints
    }

    /// Attach the driven distance and geometry, leaving costs untouched.
    #[must_use]
    pub fn with_route(mut self, total_distance: f64, geometry: EncodedGeometry) -> Self {
        self.total_distance = round_to(total_distance, 1);
        self.route_geometry = Some(geometry);
        self
    }
}
