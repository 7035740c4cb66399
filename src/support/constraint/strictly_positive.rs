use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly greater than zero.
///
/// Room dimensions, rack power, and per-handler airflow all end up in a
/// denominator somewhere, so they carry this constraint.
///
/// # Examples
///
/// ```
/// use dc_thermal_models::support::constraint::StrictlyPositive;
///
/// let cfm = StrictlyPositive::new(155_000.0).unwrap();
/// assert_eq!(cfm.into_inner(), 155_000.0);
///
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(-1).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Length, length::meter};

    #[test]
    fn room_dimensions() {
        assert!(StrictlyPositive::new(Length::new::<meter>(15.0)).is_ok());
        assert_eq!(
            StrictlyPositive::new(Length::new::<meter>(0.0)),
            Err(ConstraintError::Zero)
        );
        assert_eq!(
            StrictlyPositive::new(Length::new::<meter>(-3.0)),
            Err(ConstraintError::Negative)
        );
    }

    #[test]
    fn integers() {
        assert_eq!(StrictlyPositive::new(3_u32).unwrap().into_inner(), 3);
        assert!(StrictlyPositive::new(0_u32).is_err());
    }
}
