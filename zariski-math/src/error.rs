//! Error types for the exact algebra engine.
//!
//! On well-formed input, division, determinants and Buchberger completion
//! always produce a value. The variants below cover shape mismatches,
//! exponent overflow, singular inverses and malformed boundary input.

use thiserror::Error;

/// Error raised while parsing boundary input (rationals, polynomials, orders).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("parse error at offset {offset}: {message}")]
pub struct ParseError {
    /// Byte offset into the input where the problem was detected.
    pub offset: usize,
    /// Human readable description.
    pub message: String,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Errors produced by the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// Gauss-Jordan elimination found a column without a nonzero pivot.
    #[error("singular matrix")]
    SingularMatrix,

    /// Operand shapes disagree.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        got: usize,
    },

    /// Polynomials over different variable counts were combined.
    #[error("variable count mismatch: expected {expected}, got {got}")]
    VariableCountMismatch {
        /// Expected variable count
        expected: usize,
        /// Actual variable count
        got: usize,
    },

    /// An exponent no longer fits in `u32`.
    #[error("exponent overflow")]
    ExponentOverflow,

    /// Multiplicative inverse requested for a non-invertible element.
    #[error("element is not invertible")]
    NotInvertible,

    /// The supplied minimal polynomial cannot define a number field.
    #[error("invalid minimal polynomial: {0}")]
    InvalidMinimalPolynomial(String),

    /// Malformed boundary input.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result alias used throughout the crate.
pub type MathResult<T> = Result<T, MathError>;
