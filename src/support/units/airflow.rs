use std::ops::Mul;

use uom::si::{f64::VolumeRate, volume_rate::cubic_meter_per_second};

use crate::support::constraint::{ConstraintResult, NonNegative};

/// Cubic feet per minute in one cubic meter per second.
///
/// Rounded; the exact factor is 2118.88.
pub const CFM_PER_CUBIC_METER_PER_SECOND: f64 = 2119.0;

/// A non-negative volumetric airflow expressed in cubic feet per minute.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Cfm(f64);

impl Cfm {
    /// Creates an airflow in CFM.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or `NaN`.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Ok(Self(NonNegative::new(value)?.into_inner()))
    }

    /// Zero airflow.
    #[must_use]
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Returns the raw CFM figure.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Converts to an SI volume rate.
    #[must_use]
    pub fn to_volume_rate(self) -> VolumeRate {
        VolumeRate::new::<cubic_meter_per_second>(self.0 / CFM_PER_CUBIC_METER_PER_SECOND)
    }
}

/// Scales a per-unit rating by an equipment count.
impl Mul<u32> for Cfm {
    type Output = Self;

    fn mul(self, count: u32) -> Self {
        Self(self.0 * f64::from(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn converts_with_fixed_factor() {
        let flow = Cfm::new(2119.0).unwrap().to_volume_rate();
        assert_relative_eq!(flow.get::<cubic_meter_per_second>(), 1.0);
    }

    #[test]
    fn scales_by_count() {
        let total = Cfm::new(155_000.0).unwrap() * 2;
        assert_relative_eq!(total.value(), 310_000.0);
        assert_relative_eq!((Cfm::new(155_000.0).unwrap() * 0).value(), 0.0);
    }

    #[test]
    fn rejects_negative() {
        assert!(Cfm::new(-1.0).is_err());
    }
}
