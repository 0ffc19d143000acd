//! Vanishing-ideal approximation from sampled points.
//!
//! Given finitely many points in Q^k (for instance flattened orbit samples of
//! a matrix group), every polynomial of total degree at most `d` that vanishes
//! on all of them is a linear combination of monomials whose coefficient
//! vector lies in the right null space of the evaluation matrix. The null
//! space basis is turned into candidate polynomials and completed with
//! Buchberger's algorithm.

use crate::error::{MathError, MathResult};
use crate::field::RationalField;
use crate::grobner::{BuchbergerConfig, GroebnerBasis, grobner_basis};
use crate::matrix::Matrix;
use crate::monomial::Monomial;
use crate::polynomial::{Polynomial, Term};
use num_rational::BigRational;
use num_traits::{One, Zero};
use tracing::debug;

/// Turn each matrix into a coordinate point by reading its entries row-major.
pub fn flatten_matrices(matrices: &[Matrix<RationalField>]) -> Vec<Vec<BigRational>> {
    matrices.iter().map(|m| m.entries().to_vec()).collect()
}

/// All monomials in `num_vars` variables of total degree at most `max_degree`,
/// by ascending degree.
pub fn monomials_up_to_degree(num_vars: usize, max_degree: u32) -> Vec<Monomial> {
    fn fill(exps: &mut Vec<u32>, var: usize, remaining: u32, out: &mut Vec<Monomial>) {
        if var + 1 == exps.len() {
            exps[var] = remaining;
            out.push(Monomial::new(exps.iter().copied()));
            return;
        }
        for e in (0..=remaining).rev() {
            exps[var] = e;
            fill(exps, var + 1, remaining - e, out);
        }
    }

    if num_vars == 0 {
        return vec![Monomial::one(0)];
    }
    let mut out = Vec::new();
    let mut exps = vec![0; num_vars];
    for degree in 0..=max_degree {
        fill(&mut exps, 0, degree, &mut out);
    }
    out
}

fn eval_monomial(m: &Monomial, point: &[BigRational]) -> BigRational {
    m.exponents()
        .iter()
        .zip(point)
        .filter(|(e, _)| **e > 0)
        .fold(BigRational::one(), |acc, (&e, x)| {
            acc * num_traits::pow(x.clone(), e as usize)
        })
}

/// Reduced row echelon form in place; returns the pivot column of each
/// nonzero row.
fn row_reduce(matrix: &mut [Vec<BigRational>], cols: usize) -> Vec<usize> {
    let rows = matrix.len();
    let mut pivots = Vec::new();
    let mut pivot_row = 0;

    for col in 0..cols {
        if pivot_row >= rows {
            break;
        }
        let Some(found) = (pivot_row..rows).find(|&r| !matrix[r][col].is_zero()) else {
            continue;
        };
        matrix.swap(pivot_row, found);

        let pivot_val = matrix[pivot_row][col].clone();
        for entry in &mut matrix[pivot_row] {
            *entry = &*entry / &pivot_val;
        }

        for row in 0..rows {
            if row == pivot_row || matrix[row][col].is_zero() {
                continue;
            }
            let factor = matrix[row][col].clone();
            for c in col..cols {
                let delta = &matrix[pivot_row][c] * &factor;
                matrix[row][c] = &matrix[row][c] - &delta;
            }
        }

        pivots.push(col);
        pivot_row += 1;
    }
    pivots
}

/// Basis of the right null space of a `rows × cols` rational matrix.
pub fn null_space(mut matrix: Vec<Vec<BigRational>>, cols: usize) -> Vec<Vec<BigRational>> {
    let pivots = row_reduce(&mut matrix, cols);
    let mut is_pivot = vec![false; cols];
    for &p in &pivots {
        is_pivot[p] = true;
    }

    (0..cols)
        .filter(|&free| !is_pivot[free])
        .map(|free| {
            let mut v = vec![BigRational::zero(); cols];
            v[free] = BigRational::one();
            for (row, &p) in pivots.iter().enumerate() {
                v[p] = -matrix[row][free].clone();
            }
            v
        })
        .collect()
}

/// Approximate the vanishing ideal of `points` using candidates of total
/// degree at most `max_degree`.
///
/// Every returned polynomial vanishes on every point. With no points the
/// result is the empty basis over zero variables.
pub fn vanishing_ideal(
    points: &[Vec<BigRational>],
    max_degree: u32,
    config: &BuchbergerConfig,
) -> MathResult<GroebnerBasis> {
    let Some(first) = points.first() else {
        return grobner_basis(&[], config);
    };
    let num_vars = first.len();
    if let Some(bad) = points.iter().find(|p| p.len() != num_vars) {
        return Err(MathError::DimensionMismatch {
            expected: num_vars,
            got: bad.len(),
        });
    }

    let monomials = monomials_up_to_degree(num_vars, max_degree);
    let evaluation: Vec<Vec<BigRational>> = points
        .iter()
        .map(|p| monomials.iter().map(|m| eval_monomial(m, p)).collect())
        .collect();

    let kernel = null_space(evaluation, monomials.len());
    debug!(
        points = points.len(),
        monomials = monomials.len(),
        candidates = kernel.len(),
        "vanishing ideal candidates"
    );

    let candidates: Vec<Polynomial> = kernel
        .into_iter()
        .map(|v| {
            Polynomial::from_terms(
                num_vars,
                v.into_iter()
                    .zip(&monomials)
                    .filter(|(c, _)| !c.is_zero())
                    .map(|(c, m)| Term::new(c, m.clone())),
            )
        })
        .collect();

    grobner_basis(&candidates, config)
}
