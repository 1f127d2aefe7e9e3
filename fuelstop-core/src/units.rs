//! Distance unit conversions and output rounding.

/// Miles in one metre.
pub const MILES_PER_METER: f64 = 0.000_621_371;

/// Metres in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

/// Convert metres, as reported by routing services, to miles.
///
/// # Examples
/// ```
/// use fuelstop_core::units::meters_to_miles;
///
/// assert!((meters_to_miles(1609.344) - 1.0).abs() < 1e-3);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "unit conversion is a scale factor")]
pub fn meters_to_miles(meters: f64) -> f64 {
    meters * MILES_PER_METER
}

/// Convert miles to metres.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "unit conversion is a scale factor")]
pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

/// Round `value` to `decimals` places, halves away from zero.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "decimal rounding scales floats")]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}
