//! Zariski-Math: Exact Symbolic Algebra
//!
//! This crate provides the exact arithmetic core used to approximate the
//! vanishing ideal of a finite set of sampled points:
//! - **Monomials**: exponent vectors with lex, grlex and grevlex orderings
//! - **Polynomials**: sparse multivariate polynomials over the rationals,
//!   with multivariate division
//! - **Gröbner bases**: S-polynomials and Buchberger completion with
//!   minimization and full inter-reduction
//! - **Matrices**: determinant, inverse and equality written once against a
//!   [`Field`] and used over the rationals and over number fields Q(α)
//!
//! All arithmetic is exact. There is no floating point anywhere.
//!
//! # Examples
//!
//! ```rust
//! use zariski_math::grobner::{BuchbergerConfig, grobner_basis};
//! use zariski_math::monomial::MonomialOrder;
//! use zariski_math::parse::parse_polynomial;
//!
//! let vars = vec!["x".to_string(), "y".to_string()];
//! let f = parse_polynomial("x^2 + y^2 - 1", &vars).unwrap();
//! let g = parse_polynomial("x - y", &vars).unwrap();
//!
//! let config = BuchbergerConfig::default().with_order(MonomialOrder::Lex);
//! let basis = grobner_basis(&[f, g], &config).unwrap();
//! assert!(!basis.truncated);
//! assert_eq!(basis.len(), 2);
//! ```
//!
//! ```rust
//! use zariski_math::field::{Field, RationalField};
//! use zariski_math::matrix::Matrix;
//!
//! let a = Matrix::from_int_rows(RationalField, &[&[2, 1], &[1, 1]]).unwrap();
//! assert!(RationalField.is_one(&a.determinant()));
//! assert!(a.mul(&a.inverse().unwrap()).unwrap().is_identity());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

/// Vanishing-ideal approximation from sampled points
pub mod closure;

/// Error types
pub mod error;

/// Field contract for the matrix algorithms
pub mod field;

/// Gröbner basis computation
pub mod grobner;

/// Exact square matrices
pub mod matrix;

/// Monomials and monomial orderings
pub mod monomial;

/// Algebraic number fields Q(α)
pub mod number_field;

/// Boundary parsing
pub mod parse;

/// Sparse multivariate polynomials
pub mod polynomial;

pub use error::{MathError, MathResult, ParseError};
pub use field::{Field, RationalField};
pub use grobner::{BuchbergerConfig, BuchbergerStats, GroebnerBasis, grobner_basis};
pub use matrix::Matrix;
pub use monomial::{Monomial, MonomialOrder};
pub use number_field::{NumberField, NumberFieldElement};
pub use polynomial::{Polynomial, Term};
