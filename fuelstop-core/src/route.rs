//! Driving routes returned by a [`RouteProvider`](crate::RouteProvider).
//!
//! A route pairs its decoded polyline with cumulative distances and keeps the
//! provider's encoded geometry untouched so it can be handed back to callers.

use geo::{Coord, Rect};

use crate::error::InvalidInputError;
use crate::geometry::{cumulative_distances, padded_bounds};

/// Opaque encoded route geometry, passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EncodedGeometry(String);

impl EncodedGeometry {
    /// Wrap a provider-specific geometry token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EncodedGeometry {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// A driving route: polyline, cumulative distances and total length.
///
/// Invariants upheld by the constructors:
/// - `points` is non-empty and `cumulative_miles.len() == points.len()`;
/// - `cumulative_miles[0] == 0.0` and the sequence never decreases;
/// - `total_miles` is finite and non-negative.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::{EncodedGeometry, Route};
///
/// let route = Route::new(
///     EncodedGeometry::new("_p~iF~ps|U"),
///     vec![Coord { x: -90.0, y: 40.0 }, Coord { x: -90.0, y: 41.0 }],
///     69.1,
/// )?;
/// assert_eq!(route.cumulative_miles().len(), 2);
/// assert_eq!(route.total_miles(), 69.1);
/// # Ok::<(), fuelstop_core::InvalidInputError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    geometry: EncodedGeometry,
    points: Vec<Coord<f64>>,
    cumulative_miles: Vec<f64>,
    total_miles: f64,
}

impl Route {
    /// Build a route, deriving cumulative distances from the polyline.
    ///
    /// `total_miles` is the provider's reported driving distance, which may
    /// differ slightly from the polyline's great-circle length.
    ///
    /// # Errors
    /// Returns [`InvalidInputError::EmptyRoute`] when `points` is empty and
    /// [`InvalidInputError::InvalidDistance`] when `total_miles` is negative
    /// or not finite.
    pub fn new(
        geometry: EncodedGeometry,
        points: Vec<Coord<f64>>,
        total_miles: f64,
    ) -> Result<Self, InvalidInputError> {
        let cumulative_miles = cumulative_distances(&points);
        Self::from_parts(geometry, points, cumulative_miles, total_miles)
    }

    /// Build a route from precomputed cumulative distances.
    ///
    /// # Errors
    /// Returns an [`InvalidInputError`] when the polyline is empty, the arrays
    /// differ in length, the cumulative distances do not start at zero or
    /// decrease, or `total_miles` is negative or not finite.
    pub fn from_parts(
        geometry: EncodedGeometry,
        points: Vec<Coord<f64>>,
        cumulative_miles: Vec<f64>,
        total_miles: f64,
    ) -> Result<Self, InvalidInputError> {
        if points.is_empty() {
            return Err(InvalidInputError::EmptyRoute);
        }
        if cumulative_miles.len() != points.len() {
            return Err(InvalidInputError::CumulativeLengthMismatch {
                points: points.len(),
                cumulative: cumulative_miles.len(),
            });
        }
        if cumulative_miles.first().is_some_and(|first| *first != 0.0) {
            return Err(InvalidInputError::NonMonotonicCumulative { index: 0 });
        }
        if let Some(index) = first_decrease(&cumulative_miles) {
            return Err(InvalidInputError::NonMonotonicCumulative { index });
        }
        if !total_miles.is_finite() || total_miles < 0.0 {
            return Err(InvalidInputError::InvalidDistance { miles: total_miles });
        }
        Ok(Self {
            geometry,
            points,
            cumulative_miles,
            total_miles,
        })
    }

    /// Encoded geometry exactly as the provider returned it.
    #[must_use]
    pub const fn geometry(&self) -> &EncodedGeometry {
        &self.geometry
    }

    /// Decoded polyline vertices.
    #[must_use]
    pub fn points(&self) -> &[Coord<f64>] {
        &self.points
    }

    /// Along-route distance in miles for each vertex.
    #[must_use]
    pub fn cumulative_miles(&self) -> &[f64] {
        &self.cumulative_miles
    }

    /// Total driving distance in miles.
    #[must_use]
    pub const fn total_miles(&self) -> f64 {
        self.total_miles
    }

    /// Bounding rectangle around the polyline, padded by `padding_deg`.
    #[must_use]
    pub fn padded_bounds(&self, padding_deg: f64) -> Rect<f64> {
        // The constructor guarantees at least one point.
        padded_bounds(&self.points, padding_deg)
            .unwrap_or_else(|| Rect::new(Coord::zero(), Coord::zero()))
    }
}

/// Index of the first entry smaller than its predecessor, including NaN.
fn first_decrease(values: &[f64]) -> Option<usize> {
    values
        .windows(2)
        .position(|pair| match pair {
            [prev, next] => !(next >= prev),
            _ => false,
        })
        .map(|idx| idx + 1)
}
