//! Buchberger completion with FIFO pair processing.
//!
//! The generating set is made monic, every index pair is queued in increasing
//! order, and S-polynomial remainders are appended to the basis until the
//! queue drains or the iteration cap is hit. The result is then minimized and
//! fully reduced.
//!
//! All tie-breaks are index based and pairs are processed first-in-first-out,
//! so the output is deterministic for fixed input, order and cap.

use crate::error::{MathError, MathResult};
use crate::monomial::MonomialOrder;
use crate::polynomial::{Polynomial, common_num_vars};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default cap on the number of S-pairs processed.
pub const DEFAULT_MAX_ITERATIONS: usize = 500;

/// Configuration for Buchberger completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuchbergerConfig {
    /// Maximum number of S-pairs processed before giving up.
    pub max_iterations: usize,
    /// Monomial order used for leading terms.
    pub order: MonomialOrder,
}

impl Default for BuchbergerConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            order: MonomialOrder::default(),
        }
    }
}

impl BuchbergerConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the monomial order.
    pub fn with_order(mut self, order: MonomialOrder) -> Self {
        self.order = order;
        self
    }
}

/// Statistics for Buchberger completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuchbergerStats {
    /// S-pairs popped from the worklist.
    pub iterations: usize,
    /// S-polynomials computed.
    pub s_polys: usize,
    /// Division calls, including the final inter-reduction.
    pub reductions: usize,
    /// Polynomials appended to the basis during completion.
    pub basis_added: usize,
}

/// Output of a completion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroebnerBasis {
    /// The minimized, fully reduced, monic basis.
    pub polynomials: Vec<Polynomial>,
    /// Order the basis was computed for.
    pub order: MonomialOrder,
    /// Work counters.
    pub stats: BuchbergerStats,
    /// True when the iteration cap stopped completion with pairs still queued.
    /// The basis is then not guaranteed to be a Gröbner basis.
    pub truncated: bool,
}

impl GroebnerBasis {
    /// Number of basis elements.
    pub fn len(&self) -> usize {
        self.polynomials.len()
    }

    /// True for the basis of the zero ideal.
    pub fn is_empty(&self) -> bool {
        self.polynomials.is_empty()
    }

    /// Normal form of `f` with respect to this basis.
    pub fn reduce(&self, f: &Polynomial) -> Polynomial {
        reduce(f, &self.polynomials, self.order)
    }

    /// True when `f` reduces to zero.
    pub fn contains(&self, f: &Polynomial) -> bool {
        self.reduce(f).is_zero()
    }
}

/// S-polynomial of `f` and `g`.
///
/// With `L = lcm(lm(f), lm(g))` this is
/// `lc(g) * (L / lm(f)) * f - lc(f) * (L / lm(g)) * g`: each side is scaled by
/// the other's leading coefficient so the leading terms cancel. Zero if
/// either input is zero.
///
/// # Panics
///
/// Panics on a variable count mismatch or exponent overflow; see
/// [`try_s_polynomial`].
pub fn s_polynomial(f: &Polynomial, g: &Polynomial, order: MonomialOrder) -> Polynomial {
    match try_s_polynomial(f, g, order) {
        Ok(s) => s,
        Err(e) => panic!("S-polynomial: {e}"),
    }
}

/// S-polynomial of `f` and `g`, failing on a variable count mismatch or
/// exponent overflow.
pub fn try_s_polynomial(
    f: &Polynomial,
    g: &Polynomial,
    order: MonomialOrder,
) -> MathResult<Polynomial> {
    if f.num_vars() != g.num_vars() {
        return Err(MathError::VariableCountMismatch {
            expected: f.num_vars(),
            got: g.num_vars(),
        });
    }
    let (Some((lm_f, lc_f)), Some((lm_g, lc_g))) = (f.leading_term(order), g.leading_term(order))
    else {
        return Ok(Polynomial::zero(f.num_vars()));
    };
    let lcm = lm_f.lcm(lm_g);
    let left = f.try_mul_term(&lcm.quotient(lm_f), lc_g)?;
    let right = g.try_mul_term(&lcm.quotient(lm_g), lc_f)?;
    left.try_sub(&right)
}

/// Remainder of `f` on division by `basis`.
pub fn reduce(f: &Polynomial, basis: &[Polynomial], order: MonomialOrder) -> Polynomial {
    f.divide(basis, order).remainder
}

/// True when `f` reduces to zero modulo `basis`.
///
/// Exact ideal membership only when `basis` is a Gröbner basis for `order`.
pub fn ideal_membership(f: &Polynomial, basis: &[Polynomial], order: MonomialOrder) -> bool {
    reduce(f, basis, order).is_zero()
}

/// Buchberger's criterion: every S-polynomial reduces to zero.
pub fn is_groebner_basis(basis: &[Polynomial], order: MonomialOrder) -> bool {
    (0..basis.len()).all(|i| {
        ((i + 1)..basis.len())
            .all(|j| ideal_membership(&s_polynomial(&basis[i], &basis[j], order), basis, order))
    })
}

/// Compute a reduced Gröbner basis with the given configuration.
///
/// Fails only when the generators disagree on the variable count or an
/// exponent overflows. Hitting the iteration cap is not an error; see
/// [`GroebnerBasis::truncated`].
pub fn grobner_basis(
    generators: &[Polynomial],
    config: &BuchbergerConfig,
) -> MathResult<GroebnerBasis> {
    Buchberger::new(*config).compute_basis(generators)
}

/// Buchberger completion engine.
#[derive(Debug, Clone)]
pub struct Buchberger {
    config: BuchbergerConfig,
    stats: BuchbergerStats,
}

impl Buchberger {
    /// Create a new engine.
    pub fn new(config: BuchbergerConfig) -> Self {
        Self {
            config,
            stats: BuchbergerStats::default(),
        }
    }

    /// Get statistics of the last run.
    pub fn stats(&self) -> &BuchbergerStats {
        &self.stats
    }

    /// Run completion, minimization and full reduction on `generators`.
    pub fn compute_basis(&mut self, generators: &[Polynomial]) -> MathResult<GroebnerBasis> {
        self.stats = BuchbergerStats::default();
        let order = self.config.order;
        common_num_vars(generators)?;

        let mut basis: Vec<Polynomial> = generators
            .iter()
            .filter(|p| !p.is_zero())
            .map(|p| p.make_monic(order))
            .collect();

        tracing::debug!(
            generators = basis.len(),
            %order,
            max_iterations = self.config.max_iterations,
            "starting Buchberger completion"
        );

        let mut pairs: VecDeque<(usize, usize)> = (0..basis.len())
            .flat_map(|i| ((i + 1)..basis.len()).map(move |j| (i, j)))
            .collect();

        while self.stats.iterations < self.config.max_iterations
            && let Some((i, j)) = pairs.pop_front()
        {
            self.stats.iterations += 1;

            let s = try_s_polynomial(&basis[i], &basis[j], order)?;
            self.stats.s_polys += 1;

            let remainder = s.try_divide(&basis, order)?.remainder;
            self.stats.reductions += 1;

            if remainder.is_zero() {
                tracing::trace!(i, j, "S-pair reduced to zero");
                continue;
            }

            let new_idx = basis.len();
            tracing::trace!(i, j, new_idx, terms = remainder.num_terms(), "basis grows");
            basis.push(remainder.make_monic(order));
            self.stats.basis_added += 1;
            pairs.extend((0..new_idx).map(|k| (k, new_idx)));
        }

        let truncated = !pairs.is_empty();
        if truncated {
            tracing::warn!(
                pending = pairs.len(),
                max_iterations = self.config.max_iterations,
                "iteration cap reached; basis may be incomplete"
            );
        }

        let minimal = minimize(basis, order);
        let polynomials = self.interreduce(minimal)?;

        tracing::debug!(
            size = polynomials.len(),
            iterations = self.stats.iterations,
            s_polys = self.stats.s_polys,
            reductions = self.stats.reductions,
            basis_added = self.stats.basis_added,
            "Buchberger completion finished"
        );

        Ok(GroebnerBasis {
            polynomials,
            order,
            stats: self.stats,
            truncated,
        })
    }

    /// Replace each element by its monic remainder modulo the others,
    /// dropping elements that reduce to zero.
    fn interreduce(&mut self, mut basis: Vec<Polynomial>) -> MathResult<Vec<Polynomial>> {
        let order = self.config.order;
        for i in 0..basis.len() {
            // A zero slot is never selected as a divisor.
            let num_vars = basis[i].num_vars();
            let p = std::mem::replace(&mut basis[i], Polynomial::zero(num_vars));
            self.stats.reductions += 1;
            basis[i] = p.try_divide(&basis, order)?.remainder.make_monic(order);
        }
        basis.retain(|p| !p.is_zero());
        Ok(basis)
    }
}

/// Drop every element whose leading monomial is divisible by another
/// element's. Among equal leading monomials the lowest index survives.
fn minimize(basis: Vec<Polynomial>, order: MonomialOrder) -> Vec<Polynomial> {
    let leads: Vec<_> = basis
        .iter()
        .map(|p| p.leading_monomial(order).cloned())
        .collect();

    let redundant: Vec<bool> = (0..basis.len())
        .map(|i| {
            let Some(lm_i) = &leads[i] else {
                return true;
            };
            leads.iter().enumerate().any(|(j, lead)| match lead {
                Some(lm_j) if j != i => lm_j.divides(lm_i) && !(lm_j == lm_i && j > i),
                _ => false,
            })
        })
        .collect();

    basis
        .into_iter()
        .zip(redundant)
        .filter_map(|(p, drop)| (!drop).then_some(p))
        .collect()
}
