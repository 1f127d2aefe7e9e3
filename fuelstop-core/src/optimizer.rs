//! Forward dynamic programming over stations ordered along a fixed route.
//!
//! Nodes are the virtual start, every projected station and the virtual
//! destination, sorted by distance from the origin. `cost[j]` holds the
//! cheapest way found so far to arrive at node `j`; an edge `i → j` exists when
//! `0 < gap ≤ max_range` and costs `gap / mpg × price(i)`, so fuel for each leg
//! is bought at the node the leg starts from. Every feasible plan is one
//! monotone path through the sequence, and because nodes are visited in
//! distance order each `cost[i]` is final before it is relaxed outward.

use crate::error::{InvalidInputError, PlanError};
use crate::plan::{FuelPlan, FuelStop};
use crate::units::round_to;
use crate::{ProjectedStation, VehicleProfile};

/// A node in the optimisation sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptimizationNode<'a> {
    /// Virtual origin: distance zero, nothing to buy.
    Start,
    /// A real station that may be used as a stop.
    Station(&'a ProjectedStation),
    /// Virtual destination at the end of the route.
    Destination {
        /// Total route distance in miles.
        distance_from_start: f64,
    },
}

impl OptimizationNode<'_> {
    /// Along-route position of the node in miles.
    #[must_use]
    pub const fn distance_from_start(&self) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Station(station) => station.distance_from_start,
            Self::Destination {
                distance_from_start,
            } => *distance_from_start,
        }
    }

    /// Fuel price at the node; virtual nodes are free.
    #[must_use]
    pub const fn price(&self) -> f64 {
        match self {
            Self::Station(station) => station.station.price_per_gallon,
            Self::Start | Self::Destination { .. } => 0.0,
        }
    }

    /// Whether the node is the virtual start or destination.
    #[must_use]
    pub const fn is_virtual(&self) -> bool {
        !matches!(self, Self::Station(_))
    }
}

/// Finds the minimum-cost refuelling plan under a per-leg range limit.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::{FuelStopOptimizer, ProjectedStation, Station, VehicleProfile};
///
/// let station = Station::new(1, "Midway", Coord { x: -90.0, y: 40.0 }, 3.50);
/// let stations = [ProjectedStation::new(station, 300.0, 0.5)];
///
/// let plan = FuelStopOptimizer::new(VehicleProfile::new(500.0, 10.0)).optimize(&stations, 600.0)?;
/// assert_eq!(plan.fuel_stops.len(), 1);
/// assert_eq!(plan.fuel_stops[0].gallons, 30.0);
/// assert_eq!(plan.total_fuel_cost, 105.0);
/// assert_eq!(plan.total_gallons, 60.0);
/// # Ok::<(), fuelstop_core::PlanError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FuelStopOptimizer {
    vehicle: VehicleProfile,
}

impl FuelStopOptimizer {
    /// Construct an optimiser for `vehicle`.
    #[must_use]
    pub const fn new(vehicle: VehicleProfile) -> Self {
        Self { vehicle }
    }

    /// Vehicle parameters in use.
    #[must_use]
    pub const fn vehicle(&self) -> &VehicleProfile {
        &self.vehicle
    }

    /// Build the node sequence `[start, stations…, destination]`.
    #[must_use]
    pub fn nodes(stations: &[ProjectedStation], total_distance: f64) -> Vec<OptimizationNode<'_>> {
        let mut nodes = Vec::with_capacity(stations.len() + 2);
        nodes.push(OptimizationNode::Start);
        nodes.extend(stations.iter().map(OptimizationNode::Station));
        nodes.push(OptimizationNode::Destination {
            distance_from_start: total_distance,
        });
        nodes
    }

    /// Compute the cheapest plan for `stations` along a route of
    /// `total_distance` miles.
    ///
    /// `stations` must be sorted by `distance_from_start`, as returned by
    /// [`StationProjector::project`](crate::StationProjector::project).
    ///
    /// # Errors
    /// - [`PlanError::InvalidInput`] for a bad vehicle profile, distance,
    ///   price, station order or a station past `total_distance`; checked
    ///   before any optimisation work.
    /// - [`PlanError::Unreachable`] when no stop sequence keeps every leg
    ///   within the tank range.
    pub fn optimize(
        &self,
        stations: &[ProjectedStation],
        total_distance: f64,
    ) -> Result<FuelPlan, PlanError> {
        self.validate(stations, total_distance)?;
        let VehicleProfile {
            max_range_miles,
            mpg,
        } = self.vehicle;

        if total_distance <= max_range_miles {
            log::info!(
                "Route is {total_distance:.1} miles (<= {max_range_miles} max range); no fuel stops needed"
            );
            return Ok(FuelPlan::without_stops(total_distance, gallons_for(total_distance, mpg)));
        }

        let nodes = Self::nodes(stations, total_distance);
        log::info!(
            "DP over {} nodes (start + {} stations + destination)",
            nodes.len(),
            stations.len()
        );

        let (cost, parent) = self.relax(&nodes);
        let best = cost.last().copied().unwrap_or(f64::INFINITY);
        if !best.is_finite() {
            return Err(PlanError::Unreachable { max_range_miles });
        }

        let path = backtrack(&parent);
        let plan = self.assemble(&nodes, &path, best, total_distance);
        log::info!(
            "Optimal fuel cost: ${:.2} | {} stops | {:.1} gallons",
            plan.total_fuel_cost,
            plan.fuel_stops.len(),
            plan.total_gallons
        );
        Ok(plan)
    }

    fn validate(
        &self,
        stations: &[ProjectedStation],
        total_distance: f64,
    ) -> Result<(), InvalidInputError> {
        self.vehicle.validate()?;
        if !total_distance.is_finite() || total_distance < 0.0 {
            return Err(InvalidInputError::InvalidDistance {
                miles: total_distance,
            });
        }

        let mut previous = 0.0;
        for projected in stations {
            let price = projected.price_per_gallon();
            if !price.is_finite() || price < 0.0 {
                return Err(InvalidInputError::InvalidPrice {
                    station_id: projected.station.id,
                    price,
                });
            }
            let distance = projected.distance_from_start;
            if !distance.is_finite() || distance < 0.0 {
                return Err(InvalidInputError::InvalidDistance { miles: distance });
            }
            if distance > total_distance {
                return Err(InvalidInputError::StationBeyondRoute {
                    station_id: projected.station.id,
                    distance,
                    total: total_distance,
                });
            }
            if distance < previous {
                return Err(InvalidInputError::UnsortedStations {
                    station_id: projected.station.id,
                });
            }
            previous = distance;
        }
        Ok(())
    }

    /// Forward pass: cheapest arrival cost and predecessor for every node.
    #[expect(
        clippy::float_arithmetic,
        reason = "leg costs are fractional gallons times prices"
    )]
    fn relax(&self, nodes: &[OptimizationNode<'_>]) -> (Vec<f64>, Vec<Option<usize>>) {
        let VehicleProfile {
            max_range_miles,
            mpg,
        } = self.vehicle;
        let mut cost = vec![f64::INFINITY; nodes.len()];
        let mut parent: Vec<Option<usize>> = vec![None; nodes.len()];
        if let Some(origin) = cost.first_mut() {
            *origin = 0.0;
        }

        for (i, from) in nodes.iter().enumerate() {
            let Some(&reached) = cost.get(i) else {
                continue;
            };
            if !reached.is_finite() {
                continue;
            }
            for (j, to) in nodes.iter().enumerate().skip(i + 1) {
                let gap = to.distance_from_start() - from.distance_from_start();
                if gap <= 0.0 {
                    continue;
                }
                // Nodes are distance-sorted, so nothing further is reachable.
                if gap > max_range_miles {
                    break;
                }
                let candidate = reached + (gap / mpg) * from.price();
                if let Some(slot) = cost.get_mut(j)
                    && candidate < *slot
                {
                    *slot = candidate;
                    if let Some(link) = parent.get_mut(j) {
                        *link = Some(i);
                    }
                }
            }
        }
        (cost, parent)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "per-leg gallons and costs are floating-point"
    )]
    fn assemble(
        &self,
        nodes: &[OptimizationNode<'_>],
        path: &[usize],
        best: f64,
        total_distance: f64,
    ) -> FuelPlan {
        let mpg = self.vehicle.mpg;
        let mut fuel_stops = Vec::new();
        let mut total_gallons = 0.0;

        for leg in path.windows(2) {
            let (Some(from), Some(to)) = (
                leg.first().and_then(|&i| nodes.get(i)),
                leg.get(1).and_then(|&j| nodes.get(j)),
            ) else {
                continue;
            };
            let gallons = gallons_for(to.distance_from_start() - from.distance_from_start(), mpg);
            total_gallons += gallons;

            if let OptimizationNode::Station(projected) = from {
                let station = &projected.station;
                fuel_stops.push(FuelStop {
                    station_id: station.id,
                    name: station.name.clone(),
                    lat: station.latitude(),
                    lng: station.longitude(),
                    distance_from_start: round_to(projected.distance_from_start, 1),
                    price_per_gallon: station.price_per_gallon,
                    gallons: round_to(gallons, 2),
                    cost: round_to(gallons * station.price_per_gallon, 2),
                });
            }
        }

        FuelPlan {
            fuel_stops,
            total_fuel_cost: round_to(best, 2),
            total_distance: round_to(total_distance, 1),
            total_gallons: round_to(total_gallons, 2),
            route_geometry: None,
        }
    }
}

#[expect(clippy::float_arithmetic, reason = "distance over efficiency")]
fn gallons_for(miles: f64, mpg: f64) -> f64 {
    miles / mpg
}

/// Walk predecessor links back from the destination to the origin.
fn backtrack(parent: &[Option<usize>]) -> Vec<usize> {
    let mut path = Vec::new();
    let mut cursor = parent.len().checked_sub(1);
    while let Some(index) = cursor {
        path.push(index);
        cursor = parent.get(index).copied().flatten();
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Station;
    use geo::Coord;
    use rstest::{fixture, rstest};

    fn projected(id: u64, distance: f64, price: f64) -> ProjectedStation {
        let station = Station::new(id, format!("Station {id}"), Coord { x: -90.0, y: 40.0 }, price);
        ProjectedStation::new(station, distance, 0.0)
    }

    #[fixture]
    fn optimizer() -> FuelStopOptimizer {
        FuelStopOptimizer::default()
    }

    #[rstest]
    fn single_station_long_route(optimizer: FuelStopOptimizer) {
        let plan = optimizer
            .optimize(&[projected(1, 300.0, 3.50)], 600.0)
            .expect("feasible");
        assert_eq!(plan.fuel_stops.len(), 1);
        let stop = &plan.fuel_stops[0];
        assert_eq!(stop.station_id, 1);
        assert_eq!(stop.gallons, 30.0);
        assert_eq!(stop.cost, 105.0);
        assert_eq!(plan.total_fuel_cost, 105.0);
        assert_eq!(plan.total_gallons, 60.0);
        assert_eq!(plan.total_distance, 600.0);
    }

    #[rstest]
    fn picks_cheapest_reachable_station(optimizer: FuelStopOptimizer) {
        let stations = [
            projected(1, 200.0, 5.00),
            projected(2, 400.0, 2.00),
            projected(3, 700.0, 4.00),
        ];
        let plan = optimizer.optimize(&stations, 900.0).expect("feasible");
        let ids: Vec<u64> = plan.fuel_stops.iter().map(|s| s.station_id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(plan.total_fuel_cost, 100.0);
        // Refuelling at the first reachable station each time: 200 -> 700 -> end.
        let greedy = 50.0 * 5.00 + 20.0 * 4.00;
        assert!(plan.total_fuel_cost < greedy);
    }

    #[rstest]
    fn gap_beyond_range_is_unreachable(optimizer: FuelStopOptimizer) {
        let stations = [projected(1, 100.0, 3.00), projected(2, 700.0, 3.00)];
        let err = optimizer.optimize(&stations, 800.0).expect_err("600 mile gap");
        assert_eq!(
            err,
            PlanError::Unreachable {
                max_range_miles: 500.0
            }
        );
    }

    #[rstest]
    fn short_route_without_stations(optimizer: FuelStopOptimizer) {
        let plan = optimizer.optimize(&[], 300.0).expect("fast path");
        assert!(plan.fuel_stops.is_empty());
        assert_eq!(plan.total_fuel_cost, 0.0);
        assert_eq!(plan.total_gallons, 30.0);
    }

    #[rstest]
    fn short_route_ignores_stations() {
        let optimizer = FuelStopOptimizer::new(VehicleProfile::new(450.0, 20.0));
        let plan = optimizer
            .optimize(&[projected(1, 200.0, 4.00)], 400.0)
            .expect("fast path");
        assert!(plan.fuel_stops.is_empty());
        assert_eq!(plan.total_gallons, 20.0);
    }

    #[rstest]
    fn long_route_without_stations_is_unreachable(optimizer: FuelStopOptimizer) {
        let err = optimizer.optimize(&[], 501.0).expect_err("no stations");
        assert!(matches!(err, PlanError::Unreachable { .. }));
    }

    #[rstest]
    fn many_stations_complete(optimizer: FuelStopOptimizer) {
        let stations: Vec<ProjectedStation> = (1..30_u32)
            .map(|i| projected(u64::from(i), f64::from(i) * 50.0, 3.0 + f64::from(i % 5) * 0.10))
            .collect();
        let plan = optimizer.optimize(&stations, 1500.0).expect("feasible");
        assert!(!plan.fuel_stops.is_empty());
        assert!(plan.total_fuel_cost > 0.0);
        assert!((plan.total_gallons - 150.0).abs() < 1e-6);
    }

    #[rstest]
    fn stations_at_same_position_are_both_considered(optimizer: FuelStopOptimizer) {
        let stations = [
            projected(1, 300.0, 4.00),
            projected(2, 300.0, 3.00),
        ];
        let plan = optimizer.optimize(&stations, 600.0).expect("feasible");
        assert_eq!(plan.fuel_stops.len(), 1);
        assert_eq!(plan.fuel_stops[0].station_id, 2);
    }

    #[rstest]
    fn leg_of_exactly_max_range_is_allowed(optimizer: FuelStopOptimizer) {
        let plan = optimizer
            .optimize(&[projected(1, 500.0, 3.00)], 1000.0)
            .expect("boundary legs");
        assert_eq!(plan.fuel_stops.len(), 1);
        assert_eq!(plan.total_fuel_cost, 150.0);
    }

    #[rstest]
    fn rejects_unsorted_stations(optimizer: FuelStopOptimizer) {
        let stations = [projected(1, 400.0, 3.00), projected(2, 200.0, 3.00)];
        let err = optimizer.optimize(&stations, 600.0).expect_err("unsorted");
        assert_eq!(
            err,
            PlanError::InvalidInput(InvalidInputError::UnsortedStations { station_id: 2 })
        );
    }

    #[rstest]
    fn rejects_station_past_destination(optimizer: FuelStopOptimizer) {
        // Without the out-of-range station this plan is feasible with one stop.
        let stations = [projected(1, 400.0, 1.50), projected(2, 1000.0, 3.00)];
        let err = optimizer.optimize(&stations, 600.0).expect_err("station past end");
        assert_eq!(
            err,
            PlanError::InvalidInput(InvalidInputError::StationBeyondRoute {
                station_id: 2,
                distance: 1000.0,
                total: 600.0,
            })
        );
        let plan = optimizer
            .optimize(&stations[..1], 600.0)
            .expect("feasible without it");
        assert_eq!(plan.fuel_stops.len(), 1);
    }

    #[rstest]
    #[case(VehicleProfile::new(500.0, 0.0))]
    #[case(VehicleProfile::new(500.0, -10.0))]
    #[case(VehicleProfile::new(-500.0, 10.0))]
    fn rejects_bad_vehicle_before_fast_path(#[case] vehicle: VehicleProfile) {
        let err = FuelStopOptimizer::new(vehicle)
            .optimize(&[], 10.0)
            .expect_err("invalid vehicle");
        assert!(matches!(err, PlanError::InvalidInput(_)));
    }

    #[rstest]
    fn rejects_negative_price(optimizer: FuelStopOptimizer) {
        let err = optimizer
            .optimize(&[projected(7, 100.0, -1.0)], 600.0)
            .expect_err("negative price");
        assert!(matches!(
            err,
            PlanError::InvalidInput(InvalidInputError::InvalidPrice { station_id: 7, .. })
        ));
    }

    #[rstest]
    fn nodes_wrap_stations_with_virtual_endpoints() {
        let stations = [projected(1, 100.0, 3.0)];
        let nodes = FuelStopOptimizer::nodes(&stations, 250.0);
        assert_eq!(nodes.len(), 3);
        assert!(nodes[0].is_virtual());
        assert!(!nodes[1].is_virtual());
        assert_eq!(nodes[2].distance_from_start(), 250.0);
        assert_eq!(nodes[2].price(), 0.0);
    }

    #[rstest]
    fn backtrack_follows_parents() {
        let parent = [None, Some(0), Some(0), Some(2)];
        assert_eq!(backtrack(&parent), vec![0, 2, 3]);
        assert!(backtrack(&[]).is_empty());
    }
}
