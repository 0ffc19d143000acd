//! Monomials as dense exponent vectors and the three supported orderings.
//!
//! Every monomial carries exactly `k` exponents, one per declared variable,
//! so two monomials are equal iff their vectors are equal.

use crate::error::{MathError, MathResult, ParseError};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Exponent storage; most systems in practice have a handful of variables.
pub type Exponents = SmallVec<[u32; 4]>;

/// A monomial x0^e0 * x1^e1 * ... * x(k-1)^e(k-1).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Monomial {
    exps: Exponents,
}

impl Monomial {
    /// The unit monomial (all exponents zero) in `num_vars` variables.
    #[inline]
    pub fn one(num_vars: usize) -> Self {
        Self {
            exps: SmallVec::from_elem(0, num_vars),
        }
    }

    /// Create a monomial from an exponent vector.
    pub fn new(exps: impl IntoIterator<Item = u32>) -> Self {
        Self {
            exps: exps.into_iter().collect(),
        }
    }

    /// The monomial `x_var` in `num_vars` variables.
    pub fn variable(num_vars: usize, var: usize) -> Self {
        let mut m = Self::one(num_vars);
        m.exps[var] = 1;
        m
    }

    /// Number of variables (length of the exponent vector).
    #[inline]
    pub fn num_vars(&self) -> usize {
        self.exps.len()
    }

    /// The exponent vector.
    #[inline]
    pub fn exponents(&self) -> &[u32] {
        &self.exps
    }

    /// Exponent of a single variable.
    #[inline]
    pub fn degree(&self, var: usize) -> u32 {
        self.exps[var]
    }

    /// Total degree (sum of exponents), saturating at `u32::MAX`.
    #[inline]
    pub fn total_degree(&self) -> u32 {
        u32::try_from(self.wide_degree()).unwrap_or(u32::MAX)
    }

    #[inline]
    fn wide_degree(&self) -> u64 {
        self.exps.iter().map(|&e| u64::from(e)).sum()
    }

    /// True for the unit monomial.
    #[inline]
    pub fn is_one(&self) -> bool {
        self.exps.iter().all(|&e| e == 0)
    }

    /// Product: componentwise sum of exponents.
    ///
    /// # Panics
    ///
    /// Panics if the variable counts differ or an exponent overflows; see
    /// [`Monomial::try_mul`].
    pub fn mul(&self, other: &Monomial) -> Monomial {
        match self.try_mul(other) {
            Ok(m) => m,
            Err(e) => panic!("monomial product {self} * {other}: {e}"),
        }
    }

    /// Product, failing on mismatched variable counts or exponent overflow.
    pub fn try_mul(&self, other: &Monomial) -> MathResult<Monomial> {
        self.check_vars(other)?;
        let exps = self
            .exps
            .iter()
            .zip(&other.exps)
            .map(|(a, b)| a.checked_add(*b).ok_or(MathError::ExponentOverflow))
            .collect::<MathResult<Exponents>>()?;
        Ok(Monomial { exps })
    }

    fn check_vars(&self, other: &Monomial) -> MathResult<()> {
        if self.num_vars() == other.num_vars() {
            Ok(())
        } else {
            Err(MathError::VariableCountMismatch {
                expected: self.num_vars(),
                got: other.num_vars(),
            })
        }
    }

    /// True iff `self` divides `other` (componentwise `self <= other`).
    ///
    /// Monomials over different variable counts never divide each other.
    pub fn divides(&self, other: &Monomial) -> bool {
        self.num_vars() == other.num_vars()
            && self.exps.iter().zip(&other.exps).all(|(a, b)| a <= b)
    }

    /// `self / divisor`, or `None` when `divisor` does not divide `self`.
    pub fn div(&self, divisor: &Monomial) -> Option<Monomial> {
        if divisor.divides(self) {
            Some(self.quotient(divisor))
        } else {
            None
        }
    }

    /// Componentwise difference `self - divisor`.
    ///
    /// Only meaningful when `divisor.divides(self)`; callers check first.
    pub fn quotient(&self, divisor: &Monomial) -> Monomial {
        debug_assert!(divisor.divides(self));
        Monomial {
            exps: self
                .exps
                .iter()
                .zip(&divisor.exps)
                .map(|(a, b)| a.saturating_sub(*b))
                .collect(),
        }
    }

    /// Least common multiple: componentwise max.
    pub fn lcm(&self, other: &Monomial) -> Monomial {
        assert_eq!(
            self.num_vars(),
            other.num_vars(),
            "lcm of monomials over different variable counts"
        );
        Monomial {
            exps: self
                .exps
                .iter()
                .zip(&other.exps)
                .map(|(a, b)| *a.max(b))
                .collect(),
        }
    }

    /// Greatest common divisor: componentwise min.
    pub fn gcd(&self, other: &Monomial) -> Monomial {
        assert_eq!(
            self.num_vars(),
            other.num_vars(),
            "gcd of monomials over different variable counts"
        );
        Monomial {
            exps: self
                .exps
                .iter()
                .zip(&other.exps)
                .map(|(a, b)| *a.min(b))
                .collect(),
        }
    }

    /// Raise to a power.
    ///
    /// # Panics
    ///
    /// Panics if an exponent overflows; see [`Monomial::try_pow`].
    pub fn pow(&self, n: u32) -> Monomial {
        match self.try_pow(n) {
            Ok(m) => m,
            Err(e) => panic!("monomial power {self}^{n}: {e}"),
        }
    }

    /// Raise to a power, failing on exponent overflow.
    pub fn try_pow(&self, n: u32) -> MathResult<Monomial> {
        let exps = self
            .exps
            .iter()
            .map(|e| e.checked_mul(n).ok_or(MathError::ExponentOverflow))
            .collect::<MathResult<Exponents>>()?;
        Ok(Monomial { exps })
    }

    /// Lexicographic comparison, x0 > x1 > ... > x(k-1).
    pub fn lex_cmp(&self, other: &Monomial) -> Ordering {
        for (a, b) in self.exps.iter().zip(&other.exps) {
            match a.cmp(b) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// Graded lexicographic comparison (total degree first, then lex).
    pub fn grlex_cmp(&self, other: &Monomial) -> Ordering {
        match self.wide_degree().cmp(&other.wide_degree()) {
            Ordering::Equal => self.lex_cmp(other),
            ord => ord,
        }
    }

    /// Graded reverse lexicographic comparison.
    ///
    /// On equal degree, scan from the last variable; the first differing
    /// exponent decides with the sign flipped (smaller exponent wins).
    pub fn grevlex_cmp(&self, other: &Monomial) -> Ordering {
        match self.wide_degree().cmp(&other.wide_degree()) {
            Ordering::Equal => {
                for (a, b) in self.exps.iter().zip(&other.exps).rev() {
                    match a.cmp(b) {
                        Ordering::Equal => {}
                        ord => return ord.reverse(),
                    }
                }
                Ordering::Equal
            }
            ord => ord,
        }
    }

    /// Render with the given variable names, e.g. `x^2*y`.
    pub fn display_with(&self, names: &[String]) -> String {
        let parts: Vec<String> = self
            .exps
            .iter()
            .enumerate()
            .filter(|(_, e)| **e > 0)
            .map(|(i, &e)| {
                let name = names.get(i).cloned().unwrap_or_else(|| format!("x{i}"));
                if e == 1 { name } else { format!("{name}^{e}") }
            })
            .collect();
        if parts.is_empty() {
            "1".to_string()
        } else {
            parts.join("*")
        }
    }
}

impl fmt::Debug for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_with(&[]))
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Monomial ordering used to pick leading terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonomialOrder {
    /// Lexicographic order.
    Lex,
    /// Graded lexicographic order.
    GrLex,
    /// Graded reverse lexicographic order.
    #[default]
    GRevLex,
}

impl MonomialOrder {
    /// Compare two monomials using this ordering.
    #[inline]
    pub fn compare(&self, a: &Monomial, b: &Monomial) -> Ordering {
        match self {
            MonomialOrder::Lex => a.lex_cmp(b),
            MonomialOrder::GrLex => a.grlex_cmp(b),
            MonomialOrder::GRevLex => a.grevlex_cmp(b),
        }
    }

    /// Short name, matching the accepted textual form.
    pub const fn name(&self) -> &'static str {
        match self {
            MonomialOrder::Lex => "lex",
            MonomialOrder::GrLex => "grlex",
            MonomialOrder::GRevLex => "grevlex",
        }
    }
}

impl fmt::Display for MonomialOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MonomialOrder {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lex" => Ok(MonomialOrder::Lex),
            "grlex" | "deglex" => Ok(MonomialOrder::GrLex),
            "grevlex" | "degrevlex" => Ok(MonomialOrder::GRevLex),
            other => Err(ParseError::new(0, format!("unknown monomial order '{other}'")).into()),
        }
    }
}
