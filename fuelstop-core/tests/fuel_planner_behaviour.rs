//! Behavioural tests for the two-pass fuel planner.

use std::cell::RefCell;

use fuelstop_core::test_support::{MemoryStationStore, StraightLineRouteProvider};
use fuelstop_core::{
    FuelPlan, FuelPlanner, PlanError, PlanRequest, Planner, PlannerConfig, ProviderError,
    RouteProviderError, Station,
};
use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type Outcome = RefCell<Option<Result<FuelPlan, PlanError>>>;

const START: Coord<f64> = Coord { x: -90.0, y: 40.0 };

#[fixture]
fn stations() -> RefCell<Vec<Station>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn routes() -> RefCell<Option<StraightLineRouteProvider>> {
    RefCell::new(None)
}

#[fixture]
fn outcome() -> Outcome {
    RefCell::new(None)
}

fn plan_to(
    latitude: f64,
    stations: &RefCell<Vec<Station>>,
    routes: &RefCell<Option<StraightLineRouteProvider>>,
    outcome: &Outcome,
) {
    let routes = routes.borrow();
    let provider = routes.as_ref().expect("provider configured");
    let store = MemoryStationStore::with_stations(stations.borrow().clone());
    let planner = FuelPlanner::new(provider, store, PlannerConfig::default());
    let end = Coord { x: -90.0, y: latitude };
    *outcome.borrow_mut() = Some(planner.plan(&PlanRequest::new(START, end)));
}

fn call_count(routes: &RefCell<Option<StraightLineRouteProvider>>) -> usize {
    routes.borrow().as_ref().expect("provider configured").calls().len()
}

#[given("stations along the -90 meridian")]
fn given_stations(#[from(stations)] stations: &RefCell<Vec<Station>>) {
    *stations.borrow_mut() = vec![
        Station::new(1, "Rockford", Coord { x: -90.03, y: 42.3 }, 3.45),
        Station::new(2, "Wausau", Coord { x: -89.98, y: 44.9 }, 3.15),
        Station::new(3, "Ashland", Coord { x: -90.01, y: 46.6 }, 3.60),
    ];
}

#[given("a planner with the default truck")]
fn given_default_planner(#[from(routes)] routes: &RefCell<Option<StraightLineRouteProvider>>) {
    *routes.borrow_mut() = Some(StraightLineRouteProvider::default());
}

#[given("a planner whose route provider finds no route")]
fn given_failing_planner(#[from(routes)] routes: &RefCell<Option<StraightLineRouteProvider>>) {
    *routes.borrow_mut() = Some(StraightLineRouteProvider::failing(
        RouteProviderError::NoRoute,
    ));
}

#[when("I plan a trip from 40N to 49N")]
fn when_plan_long(
    #[from(stations)] stations: &RefCell<Vec<Station>>,
    #[from(routes)] routes: &RefCell<Option<StraightLineRouteProvider>>,
    #[from(outcome)] outcome: &Outcome,
) {
    plan_to(49.0, stations, routes, outcome);
}

#[when("I plan a trip from 40N to 42N")]
fn when_plan_short(
    #[from(stations)] stations: &RefCell<Vec<Station>>,
    #[from(routes)] routes: &RefCell<Option<StraightLineRouteProvider>>,
    #[from(outcome)] outcome: &Outcome,
) {
    plan_to(42.0, stations, routes, outcome);
}

#[then("the route provider is called twice")]
fn then_called_twice(#[from(routes)] routes: &RefCell<Option<StraightLineRouteProvider>>) {
    assert_eq!(call_count(routes), 2);
}

#[then("the route provider is called once")]
fn then_called_once(#[from(routes)] routes: &RefCell<Option<StraightLineRouteProvider>>) {
    assert_eq!(call_count(routes), 1);
}

#[then("the second call passes through every fuel stop")]
fn then_second_call_uses_stops(
    #[from(routes)] routes: &RefCell<Option<StraightLineRouteProvider>>,
    #[from(outcome)] outcome: &Outcome,
) {
    let plan = outcome
        .borrow()
        .clone()
        .expect("planner ran")
        .expect("feasible plan");
    assert!(plan.has_stops());
    let calls = routes.borrow().as_ref().expect("provider configured").calls();
    let second = calls.get(1).expect("second routing call");
    assert_eq!(second, &plan.waypoints(START, Coord { x: -90.0, y: 49.0 }));
}

#[then("the plan has no fuel stops")]
fn then_no_stops(#[from(outcome)] outcome: &Outcome) {
    let plan = outcome
        .borrow()
        .clone()
        .expect("planner ran")
        .expect("feasible plan");
    assert!(plan.fuel_stops.is_empty());
    assert_eq!(plan.total_fuel_cost, 0.0);
}

#[then("planning fails because the provider is unavailable")]
fn then_provider_unavailable(#[from(outcome)] outcome: &Outcome) {
    let result = outcome.borrow().clone().expect("planner ran");
    assert_eq!(
        result,
        Err(PlanError::ProviderUnavailable(ProviderError::Route(
            RouteProviderError::NoRoute
        )))
    );
}

#[scenario(path = "tests/features/fuel_planner.feature", index = 0)]
fn scenario_second_pass(
    stations: RefCell<Vec<Station>>,
    routes: RefCell<Option<StraightLineRouteProvider>>,
    outcome: Outcome,
) {
    let _ = (stations, routes, outcome);
}

#[scenario(path = "tests/features/fuel_planner.feature", index = 1)]
fn scenario_single_pass(
    stations: RefCell<Vec<Station>>,
    routes: RefCell<Option<StraightLineRouteProvider>>,
    outcome: Outcome,
) {
    let _ = (stations, routes, outcome);
}

#[scenario(path = "tests/features/fuel_planner.feature", index = 2)]
fn scenario_no_route(
    stations: RefCell<Vec<Station>>,
    routes: RefCell<Option<StraightLineRouteProvider>>,
    outcome: Outcome,
) {
    let _ = (stations, routes, outcome);
}
