//! Property-based tests for zariski-math
//!
//! This module contains property tests for:
//! - Monomial orderings and polynomial arithmetic
//! - Multivariate division, S-polynomials and Buchberger completion
//! - Exact matrix algebra over the rationals and a number field

mod grobner_properties;
mod matrix_properties;
mod polynomial_properties;
