//! Vehicle parameters that bound each refuelling leg.

use crate::error::InvalidInputError;

/// Default tank range in miles.
pub const DEFAULT_MAX_RANGE_MILES: f64 = 500.0;

/// Default fuel efficiency in miles per gallon.
pub const DEFAULT_MPG: f64 = 10.0;

/// Tank range and fuel efficiency for one trip.
///
/// # Examples
/// ```
/// use fuelstop_core::VehicleProfile;
///
/// let truck = VehicleProfile::default();
/// assert_eq!(truck.max_range_miles, 500.0);
/// assert_eq!(truck.mpg, 10.0);
/// assert!(VehicleProfile::new(0.0, 10.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleProfile {
    /// Miles the vehicle can drive on a full tank.
    pub max_range_miles: f64,
    /// Miles driven per gallon of fuel.
    pub mpg: f64,
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self {
            max_range_miles: DEFAULT_MAX_RANGE_MILES,
            mpg: DEFAULT_MPG,
        }
    }
}

impl VehicleProfile {
    /// Construct a profile without validating it.
    #[must_use]
    pub const fn new(max_range_miles: f64, mpg: f64) -> Self {
        Self {
            max_range_miles,
            mpg,
        }
    }

    /// Apply per-request overrides on top of this profile.
    #[must_use]
    pub fn with_overrides(self, max_range_miles: Option<f64>, mpg: Option<f64>) -> Self {
        Self {
            max_range_miles: max_range_miles.unwrap_or(self.max_range_miles),
            mpg: mpg.unwrap_or(self.mpg),
        }
    }

    /// Check that both parameters are positive and finite.
    ///
    /// # Errors
    /// Returns [`InvalidInputError::InvalidRange`] or
    /// [`InvalidInputError::InvalidEfficiency`].
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if !is_positive(self.max_range_miles) {
            return Err(InvalidInputError::InvalidRange {
                miles: self.max_range_miles,
            });
        }
        if !is_positive(self.mpg) {
            return Err(InvalidInputError::InvalidEfficiency { mpg: self.mpg });
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(VehicleProfile::new(-1.0, 10.0))]
    #[case(VehicleProfile::new(f64::INFINITY, 10.0))]
    #[case(VehicleProfile::new(f64::NAN, 10.0))]
    fn rejects_bad_range(#[case] profile: VehicleProfile) {
        assert!(matches!(
            profile.validate(),
            Err(InvalidInputError::InvalidRange { .. })
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-4.0)]
    fn rejects_bad_efficiency(#[case] mpg: f64) {
        let profile = VehicleProfile::new(500.0, mpg);
        assert_eq!(
            profile.validate(),
            Err(InvalidInputError::InvalidEfficiency { mpg })
        );
    }

    #[rstest]
    fn overrides_replace_only_supplied_fields() {
        let profile = VehicleProfile::default().with_overrides(Some(450.0), None);
        assert_eq!(profile, VehicleProfile::new(450.0, DEFAULT_MPG));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn reads_profile_from_json() {
        let profile: VehicleProfile =
            serde_json::from_str(r#"{ "max_range_miles": 420.0, "mpg": 7.5 }"#)
                .expect("valid profile");
        assert_eq!(profile, VehicleProfile::new(420.0, 7.5));
        assert!(serde_json::from_str::<VehicleProfile>(r#"{ "mpg": 7.5 }"#).is_err());
    }
}
