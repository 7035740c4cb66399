use std::{cmp::Ordering, marker::PhantomData};

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is zero or greater.
///
/// Used for quantities where "none" is meaningful, such as the capacity of
/// a heat exchanger that is installed but idle.
///
/// # Examples
///
/// ```
/// use dc_thermal_models::support::constraint::NonNegative;
/// use uom::si::{f64::Power, power::kilowatt};
///
/// let idle = NonNegative::new(Power::new::<kilowatt>(0.0)).unwrap();
/// assert_eq!(idle.into_inner().get::<kilowatt>(), 0.0);
///
/// assert!(NonNegative::new(Power::new::<kilowatt>(-60.0)).is_err());
/// assert!(NonNegative::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }

    /// Returns zero as a non-negative constrained value.
    #[must_use]
    pub fn zero<T: PartialOrd + Zero>() -> Constrained<T, NonNegative> {
        Constrained {
            value: T::zero(),
            _marker: PhantomData,
        }
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Power, power::kilowatt};

    #[test]
    fn capacities() {
        assert!(NonNegative::new(Power::new::<kilowatt>(60.0)).is_ok());
        assert!(NonNegative::new(Power::new::<kilowatt>(0.0)).is_ok());
        assert_eq!(
            NonNegative::new(Power::new::<kilowatt>(-1.0)),
            Err(ConstraintError::Negative)
        );
    }

    #[test]
    fn nan_is_rejected() {
        assert_eq!(NonNegative::new(f64::NAN), Err(ConstraintError::NotANumber));
    }

    #[test]
    fn zero_constructor() {
        let z = NonNegative::zero::<u32>();
        assert_eq!(z.into_inner(), 0);
    }
}
