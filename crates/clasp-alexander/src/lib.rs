#![deny(missing_docs)]
//! Symbolic engine for clasp diagrams: exact Laurent polynomial arithmetic,
//! integer and polynomial matrices, and the Alexander polynomial pipeline.

mod engine;
mod laurent;
mod matrix;

pub use engine::{
    alexander_polynomial, crossing_matrix, sign_matrix, skein_matrix, sum_matrix,
    SymbolicInvariants,
};
pub use laurent::LaurentPolynomial;
pub use matrix::{IntMatrix, PolyMatrix};
