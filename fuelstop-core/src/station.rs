//! Fuel stations and their position relative to a route.

use geo::Coord;

/// A fuel station from the catalogue.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::Station;
///
/// let station = Station::new(7, "Tomah Exit 143", Coord { x: -90.504, y: 43.9786 }, 3.459);
/// assert_eq!(station.id, 7);
/// assert_eq!(station.latitude(), 43.9786);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    /// Unique identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Retail price per gallon.
    pub price_per_gallon: f64,
}

impl Station {
    /// Construct a station.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, location: Coord<f64>, price_per_gallon: f64) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            price_per_gallon,
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }
}

/// A [`Station`] placed on a route.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedStation {
    /// The underlying catalogue entry.
    pub station: Station,
    /// Along-route miles from the origin to the station's projection.
    pub distance_from_start: f64,
    /// Miles between the station and its nearest point on the route.
    pub distance_from_route: f64,
}

impl ProjectedStation {
    /// Place `station` at `distance_from_start` along a route.
    #[must_use]
    pub const fn new(station: Station, distance_from_start: f64, distance_from_route: f64) -> Self {
        Self {
            station,
            distance_from_start,
            distance_from_route,
        }
    }

    /// Price per gallon at this station.
    #[must_use]
    pub const fn price_per_gallon(&self) -> f64 {
        self.station.price_per_gallon
    }
}
