//! Numeric edge cost abstraction.

use std::fmt::{Debug, Display};

use num_traits::{Bounded, Num, ToPrimitive};

/// A numeric edge cost.
///
/// Implemented for every primitive integer and float type. `max_value()`
/// serves as "unreachable" in the dynamic program, `zero()` as the empty sum.
///
/// # Example
///
/// ```
/// use tourforge_core::Cost;
///
/// fn total<C: Cost>(costs: &[C]) -> C {
///     costs.iter().fold(C::zero(), |acc, &c| acc + c)
/// }
///
/// assert_eq!(total(&[3i64, 4, 5]), 12);
/// assert!((total(&[0.5f64, 0.25]) - 0.75).abs() < 1e-12);
/// ```
pub trait Cost:
    Copy + PartialOrd + Num + Bounded + ToPrimitive + Debug + Display + Send + Sync + 'static
{
}

impl<T> Cost for T where
    T: Copy + PartialOrd + Num + Bounded + ToPrimitive + Debug + Display + Send + Sync + 'static
{
}
