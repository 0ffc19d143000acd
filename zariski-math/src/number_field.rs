//! Algebraic number fields Q(α).
//!
//! The field is defined by a caller-supplied minimal polynomial of α, stored
//! monic. An element is the dense coefficient vector `[a₀, ..., aₙ₋₁]` of
//! `a₀ + a₁α + ... + aₙ₋₁αⁿ⁻¹`, always reduced modulo the minimal polynomial
//! and always of length `n = [Q(α):Q]`, so structural equality is field
//! equality.
//!
//! Irreducibility of the minimal polynomial is not checked. If it is
//! reducible the structure is only a ring, and inverting a zero divisor
//! reports [`MathError::NotInvertible`].

use crate::error::{MathError, MathResult};
use crate::field::{Field, RationalField};
use crate::matrix::Matrix;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::sync::Arc;

/// An element of a [`NumberField`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NumberFieldElement {
    coeffs: Vec<BigRational>,
}

impl NumberFieldElement {
    /// Coefficients in the power basis `1, α, ..., αⁿ⁻¹`.
    pub fn coeffs(&self) -> &[BigRational] {
        &self.coeffs
    }

    /// True if the element lies in Q.
    pub fn is_rational(&self) -> bool {
        self.coeffs.iter().skip(1).all(Zero::is_zero)
    }

    /// The constant coefficient.
    pub fn rational_part(&self) -> BigRational {
        self.coeffs.first().cloned().unwrap_or_else(BigRational::zero)
    }
}

impl fmt::Debug for NumberFieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.coeffs, "a"))
    }
}

#[derive(Debug)]
struct NumberFieldData {
    /// Monic minimal polynomial, coefficients low to high; length degree + 1.
    minimal_poly: Vec<BigRational>,
    generator_name: String,
}

/// The number field Q(α) for a given minimal polynomial.
///
/// Cloning shares the definition.
#[derive(Debug, Clone)]
pub struct NumberField {
    data: Arc<NumberFieldData>,
}

impl PartialEq for NumberField {
    fn eq(&self, other: &Self) -> bool {
        self.data.minimal_poly == other.data.minimal_poly
    }
}

impl Eq for NumberField {}

impl NumberField {
    /// Create Q(α) from the minimal polynomial of α (coefficients low to high).
    ///
    /// Trailing zero coefficients are ignored; the polynomial is made monic.
    pub fn new(minimal_poly: Vec<BigRational>) -> MathResult<Self> {
        let mut poly = minimal_poly;
        trim(&mut poly);
        if poly.len() < 2 {
            return Err(MathError::InvalidMinimalPolynomial(format!(
                "degree must be at least 1, got {}",
                poly.len().saturating_sub(1)
            )));
        }
        let lead = poly[poly.len() - 1].clone();
        if !lead.is_one() {
            for c in &mut poly {
                *c = &*c / &lead;
            }
        }
        Ok(Self {
            data: Arc::new(NumberFieldData {
                minimal_poly: poly,
                generator_name: "a".to_string(),
            }),
        })
    }

    /// Same field, rendering the generator under a different name.
    pub fn with_generator_name(self, name: impl Into<String>) -> Self {
        Self {
            data: Arc::new(NumberFieldData {
                minimal_poly: self.data.minimal_poly.clone(),
                generator_name: name.into(),
            }),
        }
    }

    /// Name the generator is printed with.
    pub fn generator_name(&self) -> &str {
        &self.data.generator_name
    }

    /// Degree `[Q(α):Q]`.
    pub fn degree(&self) -> usize {
        self.data.minimal_poly.len() - 1
    }

    /// The monic minimal polynomial, low to high.
    pub fn minimal_poly(&self) -> &[BigRational] {
        &self.data.minimal_poly
    }

    /// Build an element from arbitrary-length coefficients, reducing modulo
    /// the minimal polynomial.
    pub fn element(&self, coeffs: Vec<BigRational>) -> NumberFieldElement {
        let mut reduced = poly_rem(coeffs, &self.data.minimal_poly);
        reduced.resize(self.degree(), BigRational::zero());
        NumberFieldElement { coeffs: reduced }
    }

    /// The generator α.
    pub fn generator(&self) -> NumberFieldElement {
        self.element(vec![BigRational::zero(), BigRational::one()])
    }

    /// Matrix of multiplication by `a` in the power basis (column `j` holds `a·αʲ`).
    pub fn multiplication_matrix(&self, a: &NumberFieldElement) -> Matrix<RationalField> {
        let n = self.degree();
        let mut column = a.clone();
        let alpha = self.generator();
        let mut columns = Vec::with_capacity(n);
        for _ in 0..n {
            columns.push(column.coeffs.clone());
            column = self.mul(&column, &alpha);
        }
        let rows = (0..n)
            .map(|i| columns.iter().map(|col| col[i].clone()).collect())
            .collect();
        Matrix::from_rows_unchecked(RationalField, n, rows)
    }

    /// Field norm `N(a)`, the determinant of the multiplication matrix.
    pub fn norm(&self, a: &NumberFieldElement) -> BigRational {
        self.multiplication_matrix(a).determinant()
    }

    /// Field trace `Tr(a)`, the trace of the multiplication matrix.
    pub fn trace(&self, a: &NumberFieldElement) -> BigRational {
        self.multiplication_matrix(a).trace()
    }
}

impl Field for NumberField {
    type Element = NumberFieldElement;

    fn zero(&self) -> NumberFieldElement {
        NumberFieldElement {
            coeffs: vec![BigRational::zero(); self.degree()],
        }
    }

    fn one(&self) -> NumberFieldElement {
        self.from_rational(&BigRational::one())
    }

    fn from_rational(&self, q: &BigRational) -> NumberFieldElement {
        let mut e = self.zero();
        e.coeffs[0] = q.clone();
        e
    }

    fn add(&self, a: &NumberFieldElement, b: &NumberFieldElement) -> NumberFieldElement {
        NumberFieldElement {
            coeffs: a.coeffs.iter().zip(&b.coeffs).map(|(x, y)| x + y).collect(),
        }
    }

    fn sub(&self, a: &NumberFieldElement, b: &NumberFieldElement) -> NumberFieldElement {
        NumberFieldElement {
            coeffs: a.coeffs.iter().zip(&b.coeffs).map(|(x, y)| x - y).collect(),
        }
    }

    fn mul(&self, a: &NumberFieldElement, b: &NumberFieldElement) -> NumberFieldElement {
        self.element(poly_mul(&a.coeffs, &b.coeffs))
    }

    fn neg(&self, a: &NumberFieldElement) -> NumberFieldElement {
        NumberFieldElement {
            coeffs: a.coeffs.iter().map(|c| -c).collect(),
        }
    }

    /// Inverse via the extended Euclidean algorithm in Q[x].
    fn inv(&self, a: &NumberFieldElement) -> MathResult<NumberFieldElement> {
        if self.is_zero(a) {
            return Err(MathError::NotInvertible);
        }
        let mut r0 = self.data.minimal_poly.clone();
        let mut r1 = a.coeffs.clone();
        trim(&mut r1);
        let mut s0: Vec<BigRational> = Vec::new();
        let mut s1 = vec![BigRational::one()];

        // Invariant: s_i * a ≡ r_i (mod minimal_poly)
        while !r1.is_empty() {
            let (q, r) = poly_divrem(&r0, &r1);
            let s = poly_sub(&s0, &poly_mul(&q, &s1));
            r0 = std::mem::replace(&mut r1, r);
            s0 = std::mem::replace(&mut s1, s);
        }

        if r0.len() != 1 {
            // Nonconstant gcd: a shares a factor with the minimal polynomial.
            return Err(MathError::NotInvertible);
        }
        let g = r0[0].clone();
        Ok(self.element(s0.into_iter().map(|c| c / &g).collect()))
    }

    fn is_zero(&self, a: &NumberFieldElement) -> bool {
        a.coeffs.iter().all(Zero::is_zero)
    }

    fn format_el(&self, a: &NumberFieldElement) -> String {
        render(&a.coeffs, &self.data.generator_name)
    }
}

/// Drop trailing zero coefficients; the zero polynomial becomes empty.
fn trim(p: &mut Vec<BigRational>) {
    while p.last().is_some_and(Zero::is_zero) {
        p.pop();
    }
}

fn poly_mul(a: &[BigRational], b: &[BigRational]) -> Vec<BigRational> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut result = vec![BigRational::zero(); a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        if x.is_zero() {
            continue;
        }
        for (j, y) in b.iter().enumerate() {
            result[i + j] += x * y;
        }
    }
    trim(&mut result);
    result
}

fn poly_sub(a: &[BigRational], b: &[BigRational]) -> Vec<BigRational> {
    let mut result = vec![BigRational::zero(); a.len().max(b.len())];
    for (i, x) in a.iter().enumerate() {
        result[i] = x.clone();
    }
    for (i, y) in b.iter().enumerate() {
        result[i] -= y;
    }
    trim(&mut result);
    result
}

/// Long division of trimmed polynomials; `b` must be nonzero.
fn poly_divrem(a: &[BigRational], b: &[BigRational]) -> (Vec<BigRational>, Vec<BigRational>) {
    let mut remainder = a.to_vec();
    trim(&mut remainder);
    if remainder.len() < b.len() {
        return (Vec::new(), remainder);
    }
    let lead = &b[b.len() - 1];
    let mut quotient = vec![BigRational::zero(); remainder.len() - b.len() + 1];
    while remainder.len() >= b.len() {
        let shift = remainder.len() - b.len();
        let q = &remainder[remainder.len() - 1] / lead;
        for (i, c) in b.iter().enumerate() {
            remainder[i + shift] -= &q * c;
        }
        quotient[shift] = q;
        // The leading coefficient cancels exactly.
        remainder.pop();
        trim(&mut remainder);
    }
    trim(&mut quotient);
    (quotient, remainder)
}

fn poly_rem(a: Vec<BigRational>, m: &[BigRational]) -> Vec<BigRational> {
    if a.len() < m.len() {
        let mut a = a;
        trim(&mut a);
        return a;
    }
    poly_divrem(&a, m).1
}

fn render(coeffs: &[BigRational], name: &str) -> String {
    let mut out = String::new();
    for (i, c) in coeffs.iter().enumerate() {
        if c.is_zero() {
            continue;
        }
        let abs = c.abs();
        let body = match i {
            0 => abs.to_string(),
            _ => {
                let power = if i == 1 {
                    name.to_string()
                } else {
                    format!("{name}^{i}")
                };
                if abs.is_one() {
                    power
                } else {
                    format!("{abs}*{power}")
                }
            }
        };
        match (out.is_empty(), c.is_negative()) {
            (true, true) => out.push_str(&format!("-{body}")),
            (true, false) => out.push_str(&body),
            (false, true) => out.push_str(&format!(" - {body}")),
            (false, false) => out.push_str(&format!(" + {body}")),
        }
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}
