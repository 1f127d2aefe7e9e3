//! Data access traits for fuel stations.
//!
//! The [`StationStore`] trait defines a read-only interface for retrieving
//! [`Station`] values inside a geographic bounding box. [`IndexedStationStore`]
//! is the bundled implementation, backed by an in-memory R\*-tree.

use geo::{Coord, Rect};
use rstar::{AABB, RTree, RTreeObject};
use thiserror::Error;

use crate::Station;

/// Errors raised by [`StationStore`] queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StationQueryError {
    /// The backing store could not be reached or read.
    #[error("station store unavailable: {message}")]
    Unavailable {
        /// Error detail.
        message: String,
    },
}

/// Read-only access to fuel stations.
///
/// Implementations must treat stations lying exactly on the bounding box edge
/// as inside it.
///
/// # Examples
///
/// ```rust
/// use geo::{Coord, Rect};
/// use fuelstop_core::{IndexedStationStore, Station, StationStore};
///
/// let store = IndexedStationStore::new(vec![
///     Station::new(1, "Inside", Coord { x: -90.0, y: 40.0 }, 3.10),
///     Station::new(2, "Outside", Coord { x: -80.0, y: 35.0 }, 2.90),
/// ]);
/// let bbox = Rect::new(Coord { x: -91.0, y: 39.0 }, Coord { x: -89.0, y: 41.0 });
/// let found: Vec<_> = store.stations_in_bbox(&bbox)?.map(|s| s.id).collect();
/// assert_eq!(found, vec![1]);
/// # Ok::<(), fuelstop_core::StationQueryError>(())
/// ```
pub trait StationStore {
    /// Return stations located within `bbox`.
    ///
    /// # Errors
    /// Returns [`StationQueryError`] when the backing store fails.
    fn stations_in_bbox(
        &self,
        bbox: &Rect<f64>,
    ) -> Result<Box<dyn Iterator<Item = Station> + Send + '_>, StationQueryError>;
}

impl<T: StationStore + ?Sized> StationStore for &T {
    fn stations_in_bbox(
        &self,
        bbox: &Rect<f64>,
    ) -> Result<Box<dyn Iterator<Item = Station> + Send + '_>, StationQueryError> {
        (**self).stations_in_bbox(bbox)
    }
}

/// Entry stored in the spatial index.
#[derive(Debug, Clone)]
struct IndexedStation(Station);

impl RTreeObject for IndexedStation {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let Coord { x, y } = self.0.location;
        AABB::from_point([x, y])
    }
}

/// In-memory [`StationStore`] backed by an R\*-tree.
///
/// Results are yielded in ascending station id order so that downstream
/// tie-breaking is deterministic.
#[derive(Debug, Default)]
pub struct IndexedStationStore {
    tree: RTree<IndexedStation>,
}

impl IndexedStationStore {
    /// Bulk-load an index from `stations`.
    #[must_use]
    pub fn new<I>(stations: I) -> Self
    where
        I: IntoIterator<Item = Station>,
    {
        let entries = stations.into_iter().map(IndexedStation).collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed stations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index holds no stations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl StationStore for IndexedStationStore {
    fn stations_in_bbox(
        &self,
        bbox: &Rect<f64>,
    ) -> Result<Box<dyn Iterator<Item = Station> + Send + '_>, StationQueryError> {
        let min = bbox.min();
        let max = bbox.max();
        let envelope = AABB::from_corners([min.x, min.y], [max.x, max.y]);
        let mut hits: Vec<Station> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.0.clone())
            .collect();
        hits.sort_by_key(|station| station.id);
        log::debug!("Station query returned {} candidates", hits.len());
        Ok(Box::new(hits.into_iter()))
    }
}
