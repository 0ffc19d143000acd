//! Gröbner Basis Computation
//!
//! This module provides S-polynomial construction and Buchberger completion
//! with basis minimization and full inter-reduction, plus the usual helpers
//! built on multivariate division (normal forms and ideal membership).

pub mod buchberger;

pub use buchberger::{
    Buchberger, BuchbergerConfig, BuchbergerStats, DEFAULT_MAX_ITERATIONS, GroebnerBasis,
    grobner_basis, ideal_membership, is_groebner_basis, reduce, s_polynomial, try_s_polynomial,
};
