//! Test helpers for composing plan CLI workspaces and planners.

use super::*;
use crate::plan::{PlanConfig, PlannerBuilder};
use camino::{Utf8Path, Utf8PathBuf};
use fuelstop_core::test_support::{MemoryStationStore, StraightLineRouteProvider};
use fuelstop_core::{FuelPlanner, Planner, RouteProviderError, Station};
use geo::Coord;
use tempfile::TempDir;

pub(super) const TRIP_START: &str = "40.0,-90.0";
pub(super) const TRIP_END: &str = "49.0,-90.0";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// Temporary directory holding a placeholder station catalogue.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        write_utf8(&root.join("stations.json"), b"[]");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn catalogue(&self) -> Utf8PathBuf {
        self.root.join("stations.json")
    }
}

/// Builds planners from in-memory fakes instead of OSRM and the catalogue.
pub(super) struct FakePlannerBuilder {
    pub(super) stations: Vec<Station>,
    pub(super) route_failure: Option<RouteProviderError>,
}

impl FakePlannerBuilder {
    pub(super) fn with_midpoint_station() -> Self {
        Self {
            stations: vec![Station::new(
                7,
                "Wausau",
                Coord { x: -90.0, y: 45.0 },
                3.5,
            )],
            route_failure: None,
        }
    }

    pub(super) fn failing(error: RouteProviderError) -> Self {
        Self {
            stations: Vec::new(),
            route_failure: Some(error),
        }
    }
}

impl PlannerBuilder for FakePlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Planner>, CliError> {
        let routes = self
            .route_failure
            .clone()
            .map_or_else(StraightLineRouteProvider::default, StraightLineRouteProvider::failing);
        let store = MemoryStationStore::with_stations(self.stations.clone());
        Ok(Box::new(FuelPlanner::new(routes, store, config.planner)))
    }
}
