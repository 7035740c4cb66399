//! Numeric invariants enforced once, at construction.
//!
//! Facility inputs arrive from sliders, config files, or request bodies and
//! are checked exactly once when a parameter set is built. After that, the
//! wrapper types below carry the guarantee so the calculation code can
//! divide and scale without re-checking.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: zero or greater (equipment capacities)
//! - [`StrictlyPositive`]: greater than zero (room dimensions, rack power, airflow)
//! - [`UnitInterval`]: closed interval `0 ≤ x ≤ 1` (capture effectiveness)
//!
//! Each marker is used with the generic [`Constrained<T, C>`] wrapper and
//! also offers an associated `new()` shortcut.

mod non_negative;
mod strictly_positive;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;
pub use unit_interval::{UnitBounds, UnitInterval};

/// A numeric invariant checked when a [`Constrained`] value is built.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// Which bound a rejected value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A result type alias to use with [`Constraint`].
pub type ConstraintResult<T, E = ConstraintError> = Result<T, E>;

/// A value that satisfied constraint `C` when it was constructed.
///
/// # Example
///
/// ```
/// use dc_thermal_models::support::constraint::{Constrained, StrictlyPositive};
/// use uom::si::{f64::Length, length::meter};
///
/// let height = Constrained::<_, StrictlyPositive>::new(Length::new::<meter>(3.0)).unwrap();
/// assert_eq!(height.into_inner().get::<meter>(), 3.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
