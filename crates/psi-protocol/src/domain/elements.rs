//! Conversion of native integer sets into protocol elements

use num_bigint::BigUint;

/// Lift native integers into protocol elements, preserving order
pub fn to_elements<I, T>(values: I) -> Vec<BigUint>
where
    I: IntoIterator<Item = T>,
    T: Into<BigUint>,
{
    values.into_iter().map(Into::into).collect()
}
