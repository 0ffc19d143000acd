//! The field contract shared by the exact matrix algorithms.
//!
//! A [`Field`] is a field *object* that knows how to operate on its
//! [`Field::Element`]s. Keeping the operations on the field rather than on the
//! elements lets a number field carry its defining polynomial once instead of
//! in every element.

use crate::error::{MathError, MathResult};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::fmt::Debug;

/// Operations every exact field must provide.
///
/// Equality is exact; no implementation may compare approximately.
pub trait Field: Clone + Debug {
    /// Element type. Cloning is the "cheap copy" of the contract.
    type Element: Clone + PartialEq + Debug;

    /// Additive identity.
    fn zero(&self) -> Self::Element;

    /// Multiplicative identity.
    fn one(&self) -> Self::Element;

    /// Embed a rational literal.
    fn from_rational(&self, q: &BigRational) -> Self::Element;

    /// Embed an integer literal.
    fn from_int(&self, n: i64) -> Self::Element {
        self.from_rational(&BigRational::from_integer(BigInt::from(n)))
    }

    /// `a + b`
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// `a - b`
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// `a * b`
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// `-a`
    fn neg(&self, a: &Self::Element) -> Self::Element;

    /// Multiplicative inverse; [`MathError::NotInvertible`] for zero.
    fn inv(&self, a: &Self::Element) -> MathResult<Self::Element>;

    /// Zero test.
    fn is_zero(&self, a: &Self::Element) -> bool;

    /// Exact equality.
    fn eq_el(&self, a: &Self::Element, b: &Self::Element) -> bool {
        a == b
    }

    /// True for the multiplicative identity.
    fn is_one(&self, a: &Self::Element) -> bool {
        self.eq_el(a, &self.one())
    }

    /// Human readable rendering of an element.
    fn format_el(&self, a: &Self::Element) -> String;
}

/// The field of rational numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RationalField;

impl Field for RationalField {
    type Element = BigRational;

    fn zero(&self) -> BigRational {
        BigRational::zero()
    }

    fn one(&self) -> BigRational {
        BigRational::one()
    }

    fn from_rational(&self, q: &BigRational) -> BigRational {
        q.clone()
    }

    fn add(&self, a: &BigRational, b: &BigRational) -> BigRational {
        a + b
    }

    fn sub(&self, a: &BigRational, b: &BigRational) -> BigRational {
        a - b
    }

    fn mul(&self, a: &BigRational, b: &BigRational) -> BigRational {
        a * b
    }

    fn neg(&self, a: &BigRational) -> BigRational {
        -a
    }

    fn inv(&self, a: &BigRational) -> MathResult<BigRational> {
        if a.is_zero() {
            Err(MathError::NotInvertible)
        } else {
            Ok(a.recip())
        }
    }

    fn is_zero(&self, a: &BigRational) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &BigRational) -> bool {
        a.is_one()
    }

    fn format_el(&self, a: &BigRational) -> String {
        a.to_string()
    }
}
