//! Exact square matrices over any [`Field`].
//!
//! The same determinant, inverse and equality code runs over the rationals
//! and over number-field elements; the only field-specific behaviour is which
//! elementary [`Field`] operation each step invokes.
//!
//! - Determinant never fails: a singular matrix yields the field's zero.
//! - Inverse fails with [`MathError::SingularMatrix`] when a column has no
//!   nonzero pivot.

#![allow(clippy::needless_range_loop)] // Elimination uses explicit indexing

use crate::error::{MathError, MathResult};
use crate::field::Field;
use std::fmt;

/// An `n × n` matrix with entries in `K`, stored row-major.
#[derive(Debug, Clone)]
pub struct Matrix<K: Field> {
    field: K,
    n: usize,
    entries: Vec<K::Element>,
}

impl<K: Field> Matrix<K> {
    /// The zero matrix.
    pub fn zero(field: K, n: usize) -> Self {
        let entries = vec![field.zero(); n * n];
        Self { field, n, entries }
    }

    /// The identity matrix.
    pub fn identity(field: K, n: usize) -> Self {
        let mut m = Self::zero(field, n);
        for i in 0..n {
            m.entries[i * n + i] = m.field.one();
        }
        m
    }

    /// Build from explicit rows; every row must have length `rows.len()`.
    pub fn from_rows(field: K, rows: Vec<Vec<K::Element>>) -> MathResult<Self> {
        let n = rows.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != n) {
            return Err(MathError::DimensionMismatch {
                expected: n,
                got: bad.len(),
            });
        }
        Ok(Self::from_rows_unchecked(field, n, rows))
    }

    pub(crate) fn from_rows_unchecked(field: K, n: usize, rows: Vec<Vec<K::Element>>) -> Self {
        Self {
            field,
            n,
            entries: rows.into_iter().flatten().collect(),
        }
    }

    /// Build from integer literals coerced into the field.
    pub fn from_int_rows(field: K, rows: &[&[i64]]) -> MathResult<Self> {
        let converted = rows
            .iter()
            .map(|r| r.iter().map(|&v| field.from_int(v)).collect())
            .collect();
        Self::from_rows(field, converted)
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    /// The field the entries live in.
    #[inline]
    pub fn field(&self) -> &K {
        &self.field
    }

    /// Entry at row `i`, column `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> &K::Element {
        &self.entries[i * self.n + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[K::Element] {
        &self.entries[i * self.n..(i + 1) * self.n]
    }

    /// All rows, cloned.
    pub fn rows(&self) -> Vec<Vec<K::Element>> {
        (0..self.n).map(|i| self.row(i).to_vec()).collect()
    }

    /// Entries in row-major order.
    pub fn entries(&self) -> &[K::Element] {
        &self.entries
    }

    fn check_same_size(&self, other: &Self) -> MathResult<()> {
        if self.n != other.n {
            return Err(MathError::DimensionMismatch {
                expected: self.n,
                got: other.n,
            });
        }
        Ok(())
    }

    fn zip_with(
        &self,
        other: &Self,
        op: impl Fn(&K::Element, &K::Element) -> K::Element,
    ) -> MathResult<Self> {
        self.check_same_size(other)?;
        Ok(Self {
            field: self.field.clone(),
            n: self.n,
            entries: self
                .entries
                .iter()
                .zip(&other.entries)
                .map(|(a, b)| op(a, b))
                .collect(),
        })
    }

    /// Entrywise sum.
    pub fn add(&self, other: &Self) -> MathResult<Self> {
        self.zip_with(other, |a, b| self.field.add(a, b))
    }

    /// Entrywise difference.
    pub fn sub(&self, other: &Self) -> MathResult<Self> {
        self.zip_with(other, |a, b| self.field.sub(a, b))
    }

    /// Multiply every entry by `c`.
    pub fn scale(&self, c: &K::Element) -> Self {
        Self {
            field: self.field.clone(),
            n: self.n,
            entries: self.entries.iter().map(|a| self.field.mul(a, c)).collect(),
        }
    }

    /// Matrix product.
    pub fn mul(&self, other: &Self) -> MathResult<Self> {
        self.check_same_size(other)?;
        Ok(self.product(other))
    }

    fn product(&self, other: &Self) -> Self {
        let n = self.n;
        let f = &self.field;
        let mut entries = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                let mut sum = f.zero();
                for k in 0..n {
                    sum = f.add(&sum, &f.mul(self.get(i, k), other.get(k, j)));
                }
                entries.push(sum);
            }
        }
        Self {
            field: f.clone(),
            n,
            entries,
        }
    }

    /// Non-negative integer power; `pow(0)` is the identity.
    pub fn pow(&self, mut e: u32) -> Self {
        let mut result = Self::identity(self.field.clone(), self.n);
        let mut base = self.clone();
        while e > 0 {
            if e & 1 == 1 {
                result = result.product(&base);
            }
            e >>= 1;
            if e > 0 {
                base = base.product(&base);
            }
        }
        result
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        let n = self.n;
        Self {
            field: self.field.clone(),
            n,
            entries: (0..n * n)
                .map(|idx| self.get(idx % n, idx / n).clone())
                .collect(),
        }
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> K::Element {
        (0..self.n).fold(self.field.zero(), |acc, i| {
            self.field.add(&acc, self.get(i, i))
        })
    }

    /// True if every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|a| self.field.is_zero(a))
    }

    /// True if this is the identity matrix.
    pub fn is_identity(&self) -> bool {
        (0..self.n).all(|i| {
            (0..self.n).all(|j| {
                let a = self.get(i, j);
                if i == j {
                    self.field.is_one(a)
                } else {
                    self.field.is_zero(a)
                }
            })
        })
    }

    /// Determinant: cofactor formulas for `n <= 3`, elimination otherwise.
    pub fn determinant(&self) -> K::Element {
        self.determinant_cofactor()
            .unwrap_or_else(|| self.determinant_elimination())
    }

    /// Direct cofactor expansion, available for `n <= 3`.
    pub fn determinant_cofactor(&self) -> Option<K::Element> {
        let f = &self.field;
        let e = |i, j| self.get(i, j);
        let det2 = |a: &K::Element, b: &K::Element, c: &K::Element, d: &K::Element| {
            f.sub(&f.mul(a, d), &f.mul(b, c))
        };
        match self.n {
            0 => Some(f.one()),
            1 => Some(e(0, 0).clone()),
            2 => Some(det2(e(0, 0), e(0, 1), e(1, 0), e(1, 1))),
            3 => {
                let m0 = det2(e(1, 1), e(1, 2), e(2, 1), e(2, 2));
                let m1 = det2(e(1, 0), e(1, 2), e(2, 0), e(2, 2));
                let m2 = det2(e(1, 0), e(1, 1), e(2, 0), e(2, 1));
                let t0 = f.mul(e(0, 0), &m0);
                let t1 = f.mul(e(0, 1), &m1);
                let t2 = f.mul(e(0, 2), &m2);
                Some(f.add(&f.sub(&t0, &t1), &t2))
            }
            _ => None,
        }
    }

    /// Determinant by Gaussian elimination with first-nonzero pivoting.
    ///
    /// Returns zero as soon as a column has no pivot.
    pub fn determinant_elimination(&self) -> K::Element {
        let f = &self.field;
        let n = self.n;
        let mut m = self.rows();
        let mut det = f.one();

        for col in 0..n {
            let Some(pivot_row) = (col..n).find(|&r| !f.is_zero(&m[r][col])) else {
                return f.zero();
            };
            if pivot_row != col {
                m.swap(pivot_row, col);
                det = f.neg(&det);
            }
            let pivot = m[col][col].clone();
            det = f.mul(&det, &pivot);

            let pivot_inv = match f.inv(&pivot) {
                Ok(inv) => inv,
                // Only possible when K is not actually a field.
                Err(_) => return self.determinant_laplace(),
            };
            for r in (col + 1)..n {
                if f.is_zero(&m[r][col]) {
                    continue;
                }
                let factor = f.mul(&m[r][col], &pivot_inv);
                for c in col..n {
                    let delta = f.mul(&factor, &m[col][c]);
                    m[r][c] = f.sub(&m[r][c], &delta);
                }
            }
        }
        det
    }

    /// Laplace expansion along the first row; uses ring operations only.
    fn determinant_laplace(&self) -> K::Element {
        fn expand<K: Field>(f: &K, m: &[Vec<K::Element>]) -> K::Element {
            if m.is_empty() {
                return f.one();
            }
            let mut det = f.zero();
            for (j, a) in m[0].iter().enumerate() {
                if f.is_zero(a) {
                    continue;
                }
                let minor: Vec<Vec<K::Element>> = m[1..]
                    .iter()
                    .map(|row| {
                        row.iter()
                            .enumerate()
                            .filter(|(c, _)| *c != j)
                            .map(|(_, x)| x.clone())
                            .collect()
                    })
                    .collect();
                let term = f.mul(a, &expand(f, &minor));
                det = if j % 2 == 0 {
                    f.add(&det, &term)
                } else {
                    f.sub(&det, &term)
                };
            }
            det
        }
        expand(&self.field, &self.rows())
    }

    /// Inverse by Gauss-Jordan elimination on `[A | I]`.
    pub fn inverse(&self) -> MathResult<Self> {
        let f = &self.field;
        let n = self.n;
        let mut aug: Vec<Vec<K::Element>> = (0..n)
            .map(|i| {
                let mut row = self.row(i).to_vec();
                row.extend((0..n).map(|j| if i == j { f.one() } else { f.zero() }));
                row
            })
            .collect();

        for col in 0..n {
            let pivot_row = (col..n)
                .find(|&r| !f.is_zero(&aug[r][col]))
                .ok_or(MathError::SingularMatrix)?;
            aug.swap(pivot_row, col);

            let pivot_inv = f.inv(&aug[col][col])?;
            for c in 0..2 * n {
                aug[col][c] = f.mul(&aug[col][c], &pivot_inv);
            }

            for r in 0..n {
                if r == col || f.is_zero(&aug[r][col]) {
                    continue;
                }
                let factor = aug[r][col].clone();
                for c in 0..2 * n {
                    let delta = f.mul(&factor, &aug[col][c]);
                    aug[r][c] = f.sub(&aug[r][c], &delta);
                }
            }
        }

        let rows = aug.into_iter().map(|row| row[n..].to_vec()).collect();
        Ok(Self::from_rows_unchecked(f.clone(), n, rows))
    }
}

impl<K: Field> PartialEq for Matrix<K> {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| self.field.eq_el(a, b))
    }
}

impl<K: Field> fmt::Display for Matrix<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            let row: Vec<String> = self.row(i).iter().map(|a| self.field.format_el(a)).collect();
            writeln!(f, "[{}]", row.join(", "))?;
        }
        Ok(())
    }
}
