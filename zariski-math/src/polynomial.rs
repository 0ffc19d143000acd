//! Sparse multivariate polynomials over the rationals.
//!
//! A polynomial is a map from [`Monomial`] to a nonzero [`BigRational`]
//! coefficient together with the fixed variable count `k`. No stored
//! coefficient is ever zero: any operation whose terms cancel removes the
//! entry, so the zero polynomial is exactly the one with no terms.
//!
//! Terms are unordered in storage; a [`MonomialOrder`] is supplied whenever
//! a leading term is needed.

use crate::error::{MathError, MathResult};
use crate::monomial::{Monomial, MonomialOrder};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A term is a coefficient multiplied by a monomial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// The coefficient of the term.
    pub coeff: BigRational,
    /// The monomial part of the term.
    pub monomial: Monomial,
}

impl Term {
    /// Create a new term.
    #[inline]
    pub fn new(coeff: BigRational, monomial: Monomial) -> Self {
        Self { coeff, monomial }
    }

    fn render(&self, names: &[String], leading: bool) -> String {
        let negative = self.coeff.is_negative();
        let abs = self.coeff.abs();
        let body = if self.monomial.is_one() {
            abs.to_string()
        } else if abs.is_one() {
            self.monomial.display_with(names)
        } else {
            format!("{}*{}", abs, self.monomial.display_with(names))
        };
        match (leading, negative) {
            (true, true) => format!("-{body}"),
            (true, false) => body,
            (false, true) => format!(" - {body}"),
            (false, false) => format!(" + {body}"),
        }
    }
}

/// Result of multivariate division of `f` by an ordered list of divisors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
    /// One quotient per divisor, in divisor order.
    pub quotients: Vec<Polynomial>,
    /// The remainder; none of its terms is divisible by a divisor's leading monomial.
    pub remainder: Polynomial,
}

/// A multivariate polynomial over the rationals in a fixed number of variables.
#[derive(Clone, PartialEq, Eq)]
pub struct Polynomial {
    num_vars: usize,
    terms: FxHashMap<Monomial, BigRational>,
}

impl Polynomial {
    /// The zero polynomial in `num_vars` variables.
    #[inline]
    pub fn zero(num_vars: usize) -> Self {
        Self {
            num_vars,
            terms: FxHashMap::default(),
        }
    }

    /// The constant polynomial `c`.
    pub fn constant(num_vars: usize, c: BigRational) -> Self {
        Self::monomial(Monomial::one(num_vars), c)
    }

    /// The constant polynomial 1.
    pub fn one(num_vars: usize) -> Self {
        Self::constant(num_vars, BigRational::one())
    }

    /// A single term `c * m`.
    pub fn monomial(m: Monomial, c: BigRational) -> Self {
        let mut p = Self::zero(m.num_vars());
        p.add_term(m, c);
        p
    }

    /// The polynomial `x_var`.
    pub fn variable(num_vars: usize, var: usize) -> Self {
        Self::monomial(Monomial::variable(num_vars, var), BigRational::one())
    }

    /// Build from terms, combining like monomials.
    ///
    /// # Panics
    ///
    /// Panics if a term has a different variable count.
    pub fn from_terms(num_vars: usize, terms: impl IntoIterator<Item = Term>) -> Self {
        let mut p = Self::zero(num_vars);
        for t in terms {
            assert_eq!(
                t.monomial.num_vars(),
                num_vars,
                "term {} has the wrong variable count",
                t.monomial
            );
            p.add_term(t.monomial, t.coeff);
        }
        p
    }

    /// Build from `(coefficient, exponents)` pairs with integer coefficients.
    pub fn from_coeffs_int(num_vars: usize, coeffs: &[(i64, &[u32])]) -> Self {
        Self::from_terms(
            num_vars,
            coeffs.iter().map(|(c, exps)| {
                Term::new(
                    BigRational::from_integer(BigInt::from(*c)),
                    Monomial::new(exps.iter().copied()),
                )
            }),
        )
    }

    /// Number of variables.
    #[inline]
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// True iff there are no stored terms.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// True iff the polynomial is a nonzero constant.
    pub fn is_constant(&self) -> bool {
        self.terms.len() == 1 && self.terms.keys().all(Monomial::is_one)
    }

    /// Number of stored terms.
    #[inline]
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Iterate over the stored terms in unspecified order.
    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &BigRational)> {
        self.terms.iter()
    }

    /// Coefficient of `m` (zero when absent).
    pub fn coeff(&self, m: &Monomial) -> BigRational {
        self.terms.get(m).cloned().unwrap_or_else(BigRational::zero)
    }

    /// Terms sorted in decreasing order under `order`.
    pub fn sorted_terms(&self, order: MonomialOrder) -> Vec<Term> {
        let mut terms: Vec<Term> = self
            .terms
            .iter()
            .map(|(m, c)| Term::new(c.clone(), m.clone()))
            .collect();
        terms.sort_by(|a, b| order.compare(&b.monomial, &a.monomial));
        terms
    }

    /// Maximum total degree of any term (0 for the zero polynomial).
    pub fn total_degree(&self) -> u32 {
        self.terms
            .keys()
            .map(Monomial::total_degree)
            .max()
            .unwrap_or(0)
    }

    /// True iff no term involves any variable other than `var`.
    pub fn only_involves(&self, var: usize) -> bool {
        self.terms.keys().all(|m| {
            m.exponents()
                .iter()
                .enumerate()
                .all(|(i, &e)| i == var || e == 0)
        })
    }

    /// Accumulate `c * m`, dropping the entry if it cancels.
    fn add_term(&mut self, m: Monomial, c: BigRational) {
        if c.is_zero() {
            return;
        }
        match self.terms.entry(m) {
            std::collections::hash_map::Entry::Occupied(mut e) => {
                *e.get_mut() += c;
                if e.get().is_zero() {
                    e.remove();
                }
            }
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(c);
            }
        }
    }

    /// `self -= c * m * g`, in place.
    fn sub_scaled(&mut self, g: &Polynomial, m: &Monomial, c: &BigRational) -> MathResult<()> {
        for (gm, gc) in &g.terms {
            self.add_term(gm.try_mul(m)?, -(gc * c));
        }
        Ok(())
    }

    fn check_vars(&self, num_vars: usize) -> MathResult<()> {
        if self.num_vars == num_vars {
            Ok(())
        } else {
            Err(MathError::VariableCountMismatch {
                expected: self.num_vars,
                got: num_vars,
            })
        }
    }

    /// Negate the polynomial.
    pub fn neg(&self) -> Polynomial {
        Polynomial {
            num_vars: self.num_vars,
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), -c.clone()))
                .collect(),
        }
    }

    /// Add two polynomials.
    ///
    /// # Panics
    ///
    /// Panics if the variable counts differ; see [`Polynomial::try_add`].
    pub fn add(&self, other: &Polynomial) -> Polynomial {
        or_panic(self.try_add(other), "sum")
    }

    /// Add two polynomials over the same variables.
    pub fn try_add(&self, other: &Polynomial) -> MathResult<Polynomial> {
        self.check_vars(other.num_vars)?;
        let mut result = self.clone();
        for (m, c) in &other.terms {
            result.add_term(m.clone(), c.clone());
        }
        Ok(result)
    }

    /// Subtract two polynomials.
    ///
    /// # Panics
    ///
    /// Panics if the variable counts differ; see [`Polynomial::try_sub`].
    pub fn sub(&self, other: &Polynomial) -> Polynomial {
        or_panic(self.try_sub(other), "difference")
    }

    /// Subtract two polynomials over the same variables.
    pub fn try_sub(&self, other: &Polynomial) -> MathResult<Polynomial> {
        self.check_vars(other.num_vars)?;
        let mut result = self.clone();
        for (m, c) in &other.terms {
            result.add_term(m.clone(), -c.clone());
        }
        Ok(result)
    }

    /// Multiply by a scalar.
    pub fn scale(&self, c: &BigRational) -> Polynomial {
        if c.is_zero() {
            return Polynomial::zero(self.num_vars);
        }
        if c.is_one() {
            return self.clone();
        }
        Polynomial {
            num_vars: self.num_vars,
            terms: self.terms.iter().map(|(m, a)| (m.clone(), a * c)).collect(),
        }
    }

    /// Multiply by the single term `c * m`.
    ///
    /// # Panics
    ///
    /// Panics on a variable count mismatch or exponent overflow; see
    /// [`Polynomial::try_mul_term`].
    pub fn mul_term(&self, m: &Monomial, c: &BigRational) -> Polynomial {
        or_panic(self.try_mul_term(m, c), "term product")
    }

    /// Multiply by the single term `c * m`, failing on a variable count
    /// mismatch or exponent overflow.
    pub fn try_mul_term(&self, m: &Monomial, c: &BigRational) -> MathResult<Polynomial> {
        self.check_vars(m.num_vars())?;
        if c.is_zero() {
            return Ok(Polynomial::zero(self.num_vars));
        }
        // Shifting by a monomial is injective, so no two products collide.
        let terms: FxHashMap<Monomial, BigRational> = self
            .terms
            .iter()
            .map(|(tm, tc)| tm.try_mul(m).map(|pm| (pm, tc * c)))
            .collect::<MathResult<_>>()?;
        Ok(Polynomial {
            num_vars: self.num_vars,
            terms,
        })
    }

    /// Multiply two polynomials (all term pairs).
    ///
    /// # Panics
    ///
    /// Panics on a variable count mismatch or exponent overflow; see
    /// [`Polynomial::try_mul`].
    pub fn mul(&self, other: &Polynomial) -> Polynomial {
        or_panic(self.try_mul(other), "product")
    }

    /// Multiply two polynomials, failing on a variable count mismatch or
    /// exponent overflow.
    pub fn try_mul(&self, other: &Polynomial) -> MathResult<Polynomial> {
        self.check_vars(other.num_vars)?;
        let mut result = Polynomial::zero(self.num_vars);
        for (am, ac) in &self.terms {
            for (bm, bc) in &other.terms {
                result.add_term(am.try_mul(bm)?, ac * bc);
            }
        }
        Ok(result)
    }

    /// Raise to a non-negative power by repeated squaring.
    ///
    /// # Panics
    ///
    /// Panics on exponent overflow; see [`Polynomial::try_pow`].
    pub fn pow(&self, k: u32) -> Polynomial {
        or_panic(self.try_pow(k), "power")
    }

    /// Raise to a non-negative power, failing on exponent overflow.
    pub fn try_pow(&self, mut k: u32) -> MathResult<Polynomial> {
        let mut result = Polynomial::one(self.num_vars);
        let mut base = self.clone();
        while k > 0 {
            if k & 1 == 1 {
                result = result.try_mul(&base)?;
            }
            k >>= 1;
            if k > 0 {
                base = base.try_mul(&base)?;
            }
        }
        Ok(result)
    }

    /// Leading term under `order`, or `None` for the zero polynomial.
    ///
    /// Linear scan keeping the first strict maximum. Distinct monomials must
    /// never compare equal under a valid order.
    pub fn leading_term(&self, order: MonomialOrder) -> Option<(&Monomial, &BigRational)> {
        let mut best: Option<(&Monomial, &BigRational)> = None;
        for (m, c) in &self.terms {
            match best {
                None => best = Some((m, c)),
                Some((bm, _)) => match order.compare(m, bm) {
                    Ordering::Greater => best = Some((m, c)),
                    Ordering::Equal => {
                        debug_assert!(m == bm, "order {order} ties distinct monomials {m} and {bm}")
                    }
                    Ordering::Less => {}
                },
            }
        }
        best
    }

    /// Leading monomial under `order`.
    pub fn leading_monomial(&self, order: MonomialOrder) -> Option<&Monomial> {
        self.leading_term(order).map(|(m, _)| m)
    }

    /// Leading coefficient under `order`.
    pub fn leading_coeff(&self, order: MonomialOrder) -> Option<&BigRational> {
        self.leading_term(order).map(|(_, c)| c)
    }

    /// Divide every coefficient by the leading coefficient.
    pub fn make_monic(&self, order: MonomialOrder) -> Polynomial {
        match self.leading_coeff(order) {
            Some(lc) if !lc.is_one() => self.scale(&lc.recip()),
            _ => self.clone(),
        }
    }

    /// Multivariate division by an ordered list of divisors.
    ///
    /// # Panics
    ///
    /// Panics if a divisor has a different variable count; see
    /// [`Polynomial::try_divide`].
    pub fn divide(&self, divisors: &[Polynomial], order: MonomialOrder) -> Division {
        or_panic(self.try_divide(divisors, order), "division")
    }

    /// Multivariate division by an ordered list of divisors.
    ///
    /// At each step the first divisor (by index) whose leading monomial
    /// divides the leading monomial of the working polynomial is used. When
    /// none does, the leading term moves to the remainder. Zero divisors are
    /// never selected.
    pub fn try_divide(
        &self,
        divisors: &[Polynomial],
        order: MonomialOrder,
    ) -> MathResult<Division> {
        for g in divisors {
            self.check_vars(g.num_vars)?;
        }
        let leads: Vec<Option<(Monomial, BigRational)>> = divisors
            .iter()
            .map(|g| g.leading_term(order).map(|(m, c)| (m.clone(), c.clone())))
            .collect();

        let mut p = self.clone();
        let mut quotients = vec![Polynomial::zero(self.num_vars); divisors.len()];
        let mut remainder = Polynomial::zero(self.num_vars);

        while let Some((lm, lc)) = p
            .leading_term(order)
            .map(|(m, c)| (m.clone(), c.clone()))
        {
            let hit = leads.iter().enumerate().find_map(|(i, lead)| match lead {
                Some((gm, gc)) if gm.divides(&lm) => Some((i, gm, gc)),
                _ => None,
            });
            match hit {
                Some((i, gm, gc)) => {
                    let qm = lm.quotient(gm);
                    let qc = &lc / gc;
                    p.sub_scaled(&divisors[i], &qm, &qc)?;
                    quotients[i].add_term(qm, qc);
                }
                None => {
                    p.terms.remove(&lm);
                    remainder.add_term(lm, lc);
                }
            }
        }

        Ok(Division {
            quotients,
            remainder,
        })
    }

    /// Exact evaluation at a point with one coordinate per variable.
    pub fn eval(&self, point: &[BigRational]) -> MathResult<BigRational> {
        if point.len() != self.num_vars {
            return Err(MathError::DimensionMismatch {
                expected: self.num_vars,
                got: point.len(),
            });
        }
        let mut sum = BigRational::zero();
        for (m, c) in &self.terms {
            let mut value = c.clone();
            for (x, &e) in point.iter().zip(m.exponents()) {
                if e > 0 {
                    value *= num_traits::pow(x.clone(), e as usize);
                }
            }
            sum += value;
        }
        Ok(sum)
    }

    /// Render with variable names, terms in decreasing `order`.
    pub fn display_with(&self, names: &[String], order: MonomialOrder) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        self.sorted_terms(order)
            .iter()
            .enumerate()
            .map(|(i, t)| t.render(names, i == 0))
            .collect()
    }
}

fn or_panic<T>(result: MathResult<T>, op: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("polynomial {op}: {e}"),
    }
}

/// Check that all polynomials share one variable count and return it.
pub fn common_num_vars(polys: &[Polynomial]) -> MathResult<Option<usize>> {
    let Some(first) = polys.first() else {
        return Ok(None);
    };
    for p in &polys[1..] {
        if p.num_vars != first.num_vars {
            return Err(MathError::VariableCountMismatch {
                expected: first.num_vars,
                got: p.num_vars,
            });
        }
    }
    Ok(Some(first.num_vars))
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with(&[], MonomialOrder::default()))
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        Polynomial::neg(&self)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        Polynomial::neg(self)
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Self) -> Self::Output {
        Polynomial::add(&self, &rhs)
    }
}

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Self::Output {
        Polynomial::add(self, rhs)
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Self) -> Self::Output {
        Polynomial::sub(&self, &rhs)
    }
}

impl Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Self::Output {
        Polynomial::sub(self, rhs)
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Self) -> Self::Output {
        Polynomial::mul(&self, &rhs)
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Self::Output {
        Polynomial::mul(self, rhs)
    }
}
