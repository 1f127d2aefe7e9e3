//! Spherical distance and polyline helpers.
//!
//! All functions are pure. Coordinates use `x = longitude`, `y = latitude` in
//! degrees and distances are reported in miles.

use geo::{Coord, Rect};

/// Mean Earth radius in miles used by [`haversine_miles`].
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Great-circle distance between two coordinates in miles.
///
/// Uses the haversine formula on a spherical Earth.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::geometry::haversine_miles;
///
/// let chicago = Coord { x: -87.6298, y: 41.8781 };
/// let charlotte = Coord { x: -80.8431, y: 35.2271 };
/// let miles = haversine_miles(chicago, charlotte);
/// assert!((miles - 587.0).abs() < 5.0);
/// assert_eq!(haversine_miles(chicago, chicago), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn haversine_miles(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let phi1 = from.y.to_radians();
    let phi2 = to.y.to_radians();
    let d_phi = (to.y - from.y).to_radians();
    let d_lambda = (to.x - from.x).to_radians();
    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    EARTH_RADIUS_MILES * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Result of projecting a point onto a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Fraction along the segment, always within `[0, 1]`.
    pub t: f64,
    /// Projected coordinate lying on the segment.
    pub point: Coord<f64>,
}

/// Project `point` onto the segment `start → end`.
///
/// Works in a locally flat frame: longitude deltas are scaled by the cosine of
/// the segment's mean latitude to account for meridian convergence. The
/// projection parameter is clamped to `[0, 1]`; a degenerate segment
/// (`start == end`) yields `t = 0` at `start`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::geometry::project_onto_segment;
///
/// let a = Coord { x: 0.0, y: 0.0 };
/// let b = Coord { x: 0.0, y: 2.0 };
/// let hit = project_onto_segment(Coord { x: 0.5, y: 1.0 }, a, b);
/// assert!((hit.t - 0.5).abs() < 1e-12);
/// assert!((hit.point.y - 1.0).abs() < 1e-12);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "planar projection works on scaled floating-point deltas"
)]
pub fn project_onto_segment(
    point: Coord<f64>,
    start: Coord<f64>,
    end: Coord<f64>,
) -> SegmentProjection {
    let cos_lat = ((start.y + end.y) / 2.0).to_radians().cos();
    let dx = (end.x - start.x) * cos_lat;
    let dy = end.y - start.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return SegmentProjection { t: 0.0, point: start };
    }

    let px = (point.x - start.x) * cos_lat;
    let py = point.y - start.y;
    let raw = (px * dx + py * dy) / length_sq;
    // NaN inputs fall back to the segment start rather than escaping the range.
    let t = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };

    SegmentProjection {
        t,
        point: Coord {
            x: start.x + t * (end.x - start.x),
            y: start.y + t * (end.y - start.y),
        },
    }
}

/// Cumulative along-polyline distance in miles for every vertex.
///
/// The first entry is always `0.0`; an empty polyline yields an empty vector.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::geometry::cumulative_distances;
///
/// let points = [
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 0.0, y: 1.0 },
///     Coord { x: 0.0, y: 2.0 },
/// ];
/// let cumulative = cumulative_distances(&points);
/// assert_eq!(cumulative.len(), 3);
/// assert_eq!(cumulative[0], 0.0);
/// assert!(cumulative[2] > cumulative[1]);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "running sum of leg lengths")]
pub fn cumulative_distances(points: &[Coord<f64>]) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;
    let mut previous: Option<Coord<f64>> = None;
    for &point in points {
        if let Some(prev) = previous {
            total += haversine_miles(prev, point);
        }
        cumulative.push(total);
        previous = Some(point);
    }
    cumulative
}

/// Axis-aligned bounding rectangle around `points`, padded by `padding_deg`.
///
/// Returns `None` for an empty slice.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "padding shifts degree bounds")]
pub fn padded_bounds(points: &[Coord<f64>], padding_deg: f64) -> Option<Rect<f64>> {
    let first = points.first()?;
    let (mut min, mut max) = (*first, *first);
    for point in points {
        min.x = min.x.min(point.x);
        min.y = min.y.min(point.y);
        max.x = max.x.max(point.x);
        max.y = max.y.max(point.y);
    }
    Some(Rect::new(
        Coord {
            x: min.x - padding_deg,
            y: min.y - padding_deg,
        },
        Coord {
            x: max.x + padding_deg,
            y: max.y + padding_deg,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn one_degree_of_latitude_is_about_69_miles() {
        let d = haversine_miles(Coord { x: -90.0, y: 40.0 }, Coord { x: -90.0, y: 41.0 });
        assert!((d - 69.09).abs() < 0.05, "got {d}");
    }

    #[rstest]
    fn haversine_is_symmetric() {
        let p = Coord { x: -96.7898, y: 46.8772 };
        let q = Coord { x: -87.6298, y: 41.8781 };
        assert_eq!(haversine_miles(p, q), haversine_miles(q, p));
    }

    #[rstest]
    #[case(Coord { x: 0.0, y: -1.0 }, 0.0)]
    #[case(Coord { x: 0.0, y: 3.0 }, 1.0)]
    #[case(Coord { x: 1.0, y: 1.0 }, 0.5)]
    fn projection_clamps_to_segment(#[case] point: Coord<f64>, #[case] want: f64) {
        let hit = project_onto_segment(point, Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 2.0 });
        assert!((hit.t - want).abs() < 1e-12, "t = {}", hit.t);
        assert!(hit.point.x.abs() < 1e-12);
    }

    #[rstest]
    fn degenerate_segment_projects_to_start() {
        let a = Coord { x: 10.0, y: 45.0 };
        let hit = project_onto_segment(Coord { x: 11.0, y: 46.0 }, a, a);
        assert_eq!(hit, SegmentProjection { t: 0.0, point: a });
    }

    #[rstest]
    fn longitude_is_scaled_by_mean_latitude() {
        // At 60 degrees a degree of longitude is half as long as one of
        // latitude, so the foot of the perpendicular shifts accordingly.
        let a = Coord { x: 0.0, y: 60.0 };
        let b = Coord { x: 2.0, y: 61.0 };
        let hit = project_onto_segment(Coord { x: 2.0, y: 60.0 }, a, b);
        let cos_lat = 60.5_f64.to_radians().cos();
        let (dx, dy) = (2.0 * cos_lat, 1.0);
        let expected = (2.0 * cos_lat * dx) / (dx * dx + dy * dy);
        assert!((hit.t - expected).abs() < 1e-12);
    }

    #[rstest]
    fn cumulative_distances_start_at_zero_and_grow() {
        let points = [
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.0, y: 1.0 },
            Coord { x: 0.0, y: 1.0 },
            Coord { x: 1.0, y: 1.0 },
        ];
        let cumulative = cumulative_distances(&points);
        assert_eq!(cumulative[0], 0.0);
        assert_eq!(cumulative[1], cumulative[2]);
        assert!(cumulative.windows(2).all(|w| w[0] <= w[1]));
        assert!(cumulative_distances(&[]).is_empty());
    }

    #[rstest]
    fn padded_bounds_cover_all_points() {
        let points = [Coord { x: -90.0, y: 40.0 }, Coord { x: -87.0, y: 42.0 }];
        let rect = padded_bounds(&points, 0.5).expect("non-empty input");
        assert_eq!(rect.min(), Coord { x: -90.5, y: 39.5 });
        assert_eq!(rect.max(), Coord { x: -86.5, y: 42.5 });
        assert!(padded_bounds(&[], 0.5).is_none());
    }
}
