//! Behavioural tests for choosing fuel stops on a fixed route.

use std::cell::RefCell;

use fuelstop_core::{
    FuelPlan, FuelStopOptimizer, PlanError, ProjectedStation, Station, VehicleProfile,
};
use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct Trip {
    stations: Vec<ProjectedStation>,
    total_distance: f64,
    vehicle: VehicleProfile,
}

fn station(id: u64, distance: f64, price: f64) -> ProjectedStation {
    let location = Coord {
        x: -90.0,
        y: 40.0 + distance / 100.0,
    };
    ProjectedStation::new(Station::new(id, format!("Station {id}"), location, price), distance, 0.0)
}

#[fixture]
fn trip() -> RefCell<Trip> {
    RefCell::new(Trip::default())
}

#[fixture]
fn outcome() -> RefCell<Option<Result<FuelPlan, PlanError>>> {
    RefCell::new(None)
}

fn plan(outcome: &RefCell<Option<Result<FuelPlan, PlanError>>>) -> FuelPlan {
    outcome
        .borrow()
        .clone()
        .expect("optimiser ran")
        .expect("plan should be feasible")
}

#[given("a 600 mile route with a station at 300 miles costing 3.50")]
fn given_single_station(#[from(trip)] trip: &RefCell<Trip>) {
    let mut trip = trip.borrow_mut();
    trip.total_distance = 600.0;
    trip.stations = vec![station(1, 300.0, 3.50)];
}

#[given("a 900 mile route with stations at 200, 400 and 700 miles")]
fn given_three_stations(#[from(trip)] trip: &RefCell<Trip>) {
    let mut trip = trip.borrow_mut();
    trip.total_distance = 900.0;
    trip.stations = vec![
        station(1, 200.0, 5.00),
        station(2, 400.0, 2.00),
        station(3, 700.0, 4.00),
    ];
}

#[given("an 800 mile route with stations at 100 and 700 miles")]
fn given_wide_gap(#[from(trip)] trip: &RefCell<Trip>) {
    let mut trip = trip.borrow_mut();
    trip.total_distance = 800.0;
    trip.stations = vec![station(1, 100.0, 3.00), station(2, 700.0, 3.00)];
}

#[given("a 300 mile route with no stations")]
fn given_short_route(#[from(trip)] trip: &RefCell<Trip>) {
    let mut trip = trip.borrow_mut();
    trip.total_distance = 300.0;
    trip.stations.clear();
}

#[given("a truck with a 500 mile range at 10 mpg")]
fn given_truck(#[from(trip)] trip: &RefCell<Trip>) {
    trip.borrow_mut().vehicle = VehicleProfile::new(500.0, 10.0);
}

#[when("I optimise the fuel stops")]
fn when_optimise(
    #[from(trip)] trip: &RefCell<Trip>,
    #[from(outcome)] outcome: &RefCell<Option<Result<FuelPlan, PlanError>>>,
) {
    let trip = trip.borrow();
    let result = FuelStopOptimizer::new(trip.vehicle).optimize(&trip.stations, trip.total_distance);
    *outcome.borrow_mut() = Some(result);
}

#[then("the plan stops once at station 1")]
fn then_stops_at_first(#[from(outcome)] outcome: &RefCell<Option<Result<FuelPlan, PlanError>>>) {
    let ids: Vec<u64> = plan(outcome).fuel_stops.iter().map(|s| s.station_id).collect();
    assert_eq!(ids, vec![1]);
}

#[then("the plan stops once at station 2")]
fn then_stops_at_second(#[from(outcome)] outcome: &RefCell<Option<Result<FuelPlan, PlanError>>>) {
    let ids: Vec<u64> = plan(outcome).fuel_stops.iter().map(|s| s.station_id).collect();
    assert_eq!(ids, vec![2]);
}

#[then("the plan buys 30 gallons at that stop")]
fn then_buys_thirty(#[from(outcome)] outcome: &RefCell<Option<Result<FuelPlan, PlanError>>>) {
    let plan = plan(outcome);
    let stop = plan.fuel_stops.first().expect("one stop");
    assert_eq!(stop.gallons, 30.0);
    assert_eq!(stop.distance_from_start, 300.0);
}

#[then("the plan costs 105.00 for 60 gallons")]
fn then_costs_105(#[from(outcome)] outcome: &RefCell<Option<Result<FuelPlan, PlanError>>>) {
    let plan = plan(outcome);
    assert_eq!(plan.total_fuel_cost, 105.0);
    assert_eq!(plan.total_gallons, 60.0);
}

#[then("the plan costs less than refuelling at every first reachable station")]
fn then_beats_greedy(#[from(outcome)] outcome: &RefCell<Option<Result<FuelPlan, PlanError>>>) {
    // Greedy: fill at 200 for the leg to 700, then at 700 for the rest.
    let greedy = 50.0 * 5.00 + 20.0 * 4.00;
    let plan = plan(outcome);
    assert_eq!(plan.total_fuel_cost, 100.0);
    assert!(plan.total_fuel_cost < greedy);
}

#[then("planning fails as unreachable")]
fn then_unreachable(#[from(outcome)] outcome: &RefCell<Option<Result<FuelPlan, PlanError>>>) {
    let result = outcome.borrow().clone().expect("optimiser ran");
    assert!(matches!(result, Err(PlanError::Unreachable { .. })));
}

#[then("the plan has no stops")]
fn then_no_stops(#[from(outcome)] outcome: &RefCell<Option<Result<FuelPlan, PlanError>>>) {
    assert!(plan(outcome).fuel_stops.is_empty());
}

#[then("the plan costs 0.00 for 30 gallons")]
fn then_free_trip(#[from(outcome)] outcome: &RefCell<Option<Result<FuelPlan, PlanError>>>) {
    let plan = plan(outcome);
    assert_eq!(plan.total_fuel_cost, 0.0);
    assert_eq!(plan.total_gallons, 30.0);
}

#[scenario(path = "tests/features/fuel_optimizer.feature", index = 0)]
fn scenario_single_station(
    trip: RefCell<Trip>,
    outcome: RefCell<Option<Result<FuelPlan, PlanError>>>,
) {
    let _ = (trip, outcome);
}

#[scenario(path = "tests/features/fuel_optimizer.feature", index = 1)]
fn scenario_beats_greedy(
    trip: RefCell<Trip>,
    outcome: RefCell<Option<Result<FuelPlan, PlanError>>>,
) {
    let _ = (trip, outcome);
}

#[scenario(path = "tests/features/fuel_optimizer.feature", index = 2)]
fn scenario_unreachable(
    trip: RefCell<Trip>,
    outcome: RefCell<Option<Result<FuelPlan, PlanError>>>,
) {
    let _ = (trip, outcome);
}

#[scenario(path = "tests/features/fuel_optimizer.feature", index = 3)]
fn scenario_short_trip(
    trip: RefCell<Trip>,
    outcome: RefCell<Option<Result<FuelPlan, PlanError>>>,
) {
    let _ = (trip, outcome);
}
