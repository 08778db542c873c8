//! Derivation of the Alexander polynomial from a canonical chord matrix.
//!
//! The pipeline is sign matrix `E` -> crossing matrix `L` -> `LE = L + E`
//! -> skein matrix `S_D` -> `det(S_D)` normalized to non-negative powers.
//! Chords are indexed by their row in the canonical matrix.

use clasp_core::{chords_intersect, ClaspError, IntervalChord};
use serde::{Deserialize, Serialize};

use crate::laurent::LaurentPolynomial;
use crate::matrix::{IntMatrix, PolyMatrix};

/// Diagonal matrix with `E[i][i]` the sign of chord `i`.
pub fn sign_matrix(chords: &[IntervalChord]) -> IntMatrix {
    let diagonal: Vec<i64> = chords.iter().map(|chord| chord.sign.value()).collect();
    IntMatrix::from_diagonal(&diagonal)
}

/// Crossing matrix `L`.
///
/// For every crossing pair `i < j` exactly one cell is written: `L[i][j] = 1`
/// when chord `i` is higher, otherwise `L[j][i] = -1`.
pub fn crossing_matrix(chords: &[IntervalChord]) -> IntMatrix {
    let n = chords.len();
    let mut matrix = IntMatrix::zeros(n);
    for i in 0..n {
        for j in i + 1..n {
            if !chords_intersect(&chords[i], &chords[j]) {
                continue;
            }
            if chords[i].height > chords[j].height {
                matrix.set(i, j, 1);
            } else {
                matrix.set(j, i, -1);
            }
        }
    }
    matrix
}

/// Returns `L + E`.
pub fn sum_matrix(sign: &IntMatrix, crossing: &IntMatrix) -> Result<IntMatrix, ClaspError> {
    crossing.checked_add(sign)
}

/// Skein matrix `S_D` over `t`.
///
/// `S[i][i] = -LE[i][i]`; an off-diagonal `LE[i][j] = 1` yields
/// `S[i][j] = t - 1`, `S[j][i] = t^-1 - 1`, and `LE[i][j] = -1` yields
/// `S[i][j] = 1 - t`, `S[j][i] = 1 - t^-1`.
pub fn skein_matrix(sum: &IntMatrix) -> PolyMatrix {
    let n = sum.dim();
    let one = LaurentPolynomial::one();
    let t = LaurentPolynomial::t();
    let t_inv = LaurentPolynomial::t_inv();
    let mut skein = PolyMatrix::zeros(n);
    for i in 0..n {
        for j in 0..n {
            if i == j {
                skein.set(i, i, LaurentPolynomial::constant(-sum.get(i, i)));
                continue;
            }
            match sum.get(i, j) {
                1 => {
                    skein.set(i, j, &t - &one);
                    skein.set(j, i, &t_inv - &one);
                }
                -1 => {
                    skein.set(i, j, &one - &t);
                    skein.set(j, i, &one - &t_inv);
                }
                _ => {}
            }
        }
    }
    skein
}

/// Alexander polynomial: `det(S_D)` scaled so no negative power of `t` remains.
///
/// The result is defined up to an overall sign.
pub fn alexander_polynomial(skein: &PolyMatrix) -> Result<LaurentPolynomial, ClaspError> {
    Ok(skein.determinant()?.normalized())
}

/// Every derived algebraic object of a diagram, computed in dependency order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolicInvariants {
    /// Sign matrix `E`.
    pub sign: IntMatrix,
    /// Crossing matrix `L`.
    pub crossing: IntMatrix,
    /// Sum `LE = L + E`.
    pub sum: IntMatrix,
    /// Skein matrix `S_D`.
    pub skein: PolyMatrix,
    /// Normalized Alexander polynomial.
    pub alexander: LaurentPolynomial,
}

impl SymbolicInvariants {
    /// Runs the full pipeline on a canonical matrix.
    pub fn compute(chords: &[IntervalChord]) -> Result<Self, ClaspError> {
        let sign = sign_matrix(chords);
        let crossing = crossing_matrix(chords);
        let sum = sum_matrix(&sign, &crossing)?;
        let skein = skein_matrix(&sum);
        let alexander = alexander_polynomial(&skein)?;
        Ok(Self {
            sign,
            crossing,
            sum,
            skein,
            alexander,
        })
    }
}
