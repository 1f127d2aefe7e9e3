//! JSON station catalogue loading.
//!
//! A catalogue file holds a JSON array of station records:
//!
//! ```json
//! [
//!   {"id": 7, "name": "Tomah Exit 143", "address": "I-94, EXIT-143",
//!    "city": "Tomah", "state": "WI", "lat": 43.9786, "lng": -90.504, "price": 3.459}
//! ]
//! ```
//!
//! Address fields are optional and ignored by the planner. When two records
//! share an `id`, the later one wins.

use std::collections::BTreeMap;
use std::io::{self, Read};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use fuelstop_core::{IndexedStationStore, Station};
use geo::Coord;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a station catalogue.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Opening or reading the catalogue failed.
    #[error("failed to read station catalogue at {path}: {source}")]
    Io {
        /// Location of the catalogue on disk.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The catalogue is not a valid JSON array of station records.
    #[error("failed to parse station catalogue: {source}")]
    Parse {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// A record carries a negative or non-finite price.
    #[error("station {id} has invalid price {price}")]
    InvalidPrice {
        /// Station identifier.
        id: u64,
        /// Offending price.
        price: f64,
    },
    /// A record's coordinates are outside WGS84 bounds.
    #[error("station {id} has invalid coordinates ({lat}, {lng})")]
    InvalidCoordinates {
        /// Station identifier.
        id: u64,
        /// Offending latitude.
        lat: f64,
        /// Offending longitude.
        lng: f64,
    },
}

#[derive(Debug, Deserialize)]
struct StationRecord {
    id: u64,
    name: String,
    lat: f64,
    lng: f64,
    price: f64,
}

impl TryFrom<StationRecord> for Station {
    type Error = CatalogError;

    fn try_from(record: StationRecord) -> Result<Self, Self::Error> {
        let StationRecord {
            id,
            name,
            lat,
            lng,
            price,
        } = record;
        if !price.is_finite() || price < 0.0 {
            return Err(CatalogError::InvalidPrice { id, price });
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(CatalogError::InvalidCoordinates { id, lat, lng });
        }
        Ok(Self::new(id, name, Coord { x: lng, y: lat }, price))
    }
}

/// Parse catalogue records from `reader`.
///
/// Stations are returned in ascending id order.
///
/// # Errors
/// Returns [`CatalogError::Parse`] for malformed JSON and a validation
/// variant for the first record with a bad price or coordinate.
///
/// # Examples
/// ```
/// use fuelstop_data::read_station_catalog;
///
/// let json = r#"[{"id": 2, "name": "B", "lat": 41.0, "lng": -90.0, "price": 3.1},
///                {"id": 1, "name": "A", "lat": 40.0, "lng": -90.0, "price": 3.3}]"#;
/// let stations = read_station_catalog(json.as_bytes())?;
/// assert_eq!(stations.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 2]);
/// # Ok::<(), fuelstop_data::CatalogError>(())
/// ```
pub fn read_station_catalog<R: Read>(reader: R) -> Result<Vec<Station>, CatalogError> {
    let records: Vec<StationRecord> =
        serde_json::from_reader(reader).map_err(|source| CatalogError::Parse { source })?;

    let mut by_id = BTreeMap::new();
    for record in records {
        let station = Station::try_from(record)?;
        let id = station.id;
        if by_id.insert(id, station).is_some() {
            log::warn!("Duplicate station id {id} in catalogue; keeping the later record");
        }
    }
    Ok(by_id.into_values().collect())
}

/// Load a catalogue file into an indexed station store.
///
/// # Errors
/// Returns [`CatalogError::Io`] when the file cannot be opened, otherwise the
/// errors of [`read_station_catalog`].
pub fn load_station_catalog(path: &Utf8Path) -> Result<IndexedStationStore, CatalogError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CatalogError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let stations = read_station_catalog(io::BufReader::new(file))?;
    log::info!("Loaded {} stations from {path}", stations.len());
    Ok(IndexedStationStore::new(stations))
}
