//! Coefficient contract for the matrix engine.
//!
//! The engine never inspects coefficients beyond arithmetic, the zero test,
//! absolute value and comparison. Division must behave like field division:
//! the general pivot and the tableau divide by arbitrary pivot coefficients,
//! so exact rationals give exact results, floats give rounded ones, and
//! truncating integer division gives wrong ones.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{NumAssign, One, Signed};

/// Numeric type usable as a matrix coefficient.
///
/// Blanket-implemented for every type with the required `num_traits`
/// operations. Intended backings are [`BigRational`], `Rational64` and `f64`.
/// Machine integers satisfy the bound but only support the structural
/// operations and the pivots normalised to a `±1` coefficient.
pub trait Coefficient:
    Signed + NumAssign + Clone + PartialOrd + fmt::Debug + fmt::Display
{
}

impl<T> Coefficient for T where
    T: Signed + NumAssign + Clone + PartialOrd + fmt::Debug + fmt::Display
{
}

/// Least common multiple of the denominators of `coeffs`.
///
/// Multiplying every coefficient by the result yields integers. Returns one
/// for an empty input.
pub fn denominators_lcm<'a, I>(coeffs: I) -> BigInt
where
    I: IntoIterator<Item = &'a BigRational>,
{
    use num_integer::Integer;

    coeffs
        .into_iter()
        .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()))
}
