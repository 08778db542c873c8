//! Square integer and polynomial matrices stored in row-major order.

use clasp_core::{ClaspError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::laurent::LaurentPolynomial;

/// Square integer matrix in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntMatrix {
    dim: usize,
    entries: Vec<i64>,
}

impl IntMatrix {
    /// The `dim x dim` zero matrix.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: vec![0; dim * dim],
        }
    }

    /// Diagonal matrix with the provided diagonal.
    pub fn from_diagonal(diagonal: &[i64]) -> Self {
        let mut matrix = Self::zeros(diagonal.len());
        for (idx, value) in diagonal.iter().enumerate() {
            matrix.set(idx, idx, *value);
        }
        matrix
    }

    /// Builds a matrix from row slices. Every row must have `rows.len()` entries.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, ClaspError> {
        let dim = rows.len();
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != dim) {
            return Err(ClaspError::Structure(
                ErrorInfo::new("non-square-matrix", "matrix rows must all have length dim")
                    .with_context("row", idx)
                    .with_context("len", row.len())
                    .with_context("dim", dim),
            ));
        }
        Ok(Self {
            dim,
            entries: rows.concat(),
        })
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.entries[row * self.dim + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: i64) {
        self.entries[row * self.dim + col] = value;
    }

    /// Row `row` as a slice.
    pub fn row(&self, row: usize) -> &[i64] {
        &self.entries[row * self.dim..(row + 1) * self.dim]
    }

    /// Whether both row `idx` and column `idx` contain only zeros.
    pub fn row_and_column_zero(&self, idx: usize) -> bool {
        (0..self.dim).all(|k| self.get(idx, k) == 0 && self.get(k, idx) == 0)
    }

    /// Elementwise sum.
    pub fn checked_add(&self, other: &IntMatrix) -> Result<IntMatrix, ClaspError> {
        if self.dim != other.dim {
            return Err(ClaspError::Consistency(
                ErrorInfo::new("dimension-mismatch", "cannot add matrices of different sizes")
                    .with_context("lhs", self.dim)
                    .with_context("rhs", other.dim),
            ));
        }
        let entries = self
            .entries
            .iter()
            .zip(&other.entries)
            .map(|(lhs, rhs)| lhs + rhs)
            .collect();
        Ok(IntMatrix {
            dim: self.dim,
            entries,
        })
    }
}

/// Square matrix over [`LaurentPolynomial`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolyMatrix {
    dim: usize,
    entries: Vec<LaurentPolynomial>,
}

impl PolyMatrix {
    /// The `dim x dim` zero matrix.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: vec![LaurentPolynomial::zero(); dim * dim],
        }
    }

    /// Lifts an integer matrix to constant polynomials.
    pub fn from_int(matrix: &IntMatrix) -> Self {
        Self {
            dim: matrix.dim,
            entries: matrix
                .entries
                .iter()
                .map(|value| LaurentPolynomial::constant(*value))
                .collect(),
        }
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> &LaurentPolynomial {
        &self.entries[row * self.dim + col]
    }

    /// Overwrites the entry at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: LaurentPolynomial) {
        self.entries[row * self.dim + col] = value;
    }

    /// Determinant via fraction-free Gaussian elimination (Bareiss).
    ///
    /// Every division is exact in `Z[t, t^-1]`; an inexact division can only
    /// come from a bug and is reported as a consistency error. The empty
    /// matrix has determinant `1`.
    pub fn determinant(&self) -> Result<LaurentPolynomial, ClaspError> {
        let n = self.dim;
        if n == 0 {
            return Ok(LaurentPolynomial::one());
        }
        let mut work = self.entries.clone();
        let at = |row: usize, col: usize| row * n + col;
        let mut negate = false;
        let mut previous = LaurentPolynomial::one();

        for k in 0..n - 1 {
            if work[at(k, k)].is_zero() {
                let Some(pivot_row) = (k + 1..n).find(|&row| !work[at(row, k)].is_zero()) else {
                    return Ok(LaurentPolynomial::zero());
                };
                for col in 0..n {
                    work.swap(at(k, col), at(pivot_row, col));
                }
                negate = !negate;
            }
            for i in k + 1..n {
                for j in k + 1..n {
                    let cross = &(&work[at(k, k)] * &work[at(i, j)])
                        - &(&work[at(i, k)] * &work[at(k, j)]);
                    work[at(i, j)] = cross.checked_div(&previous).ok_or_else(|| {
                        ClaspError::Consistency(
                            ErrorInfo::new(
                                "inexact-division",
                                "fraction-free elimination produced a non-divisible entry",
                            )
                            .with_context("step", k)
                            .with_context("row", i)
                            .with_context("col", j),
                        )
                    })?;
                }
            }
            previous = work[at(k, k)].clone();
        }

        let det = work[at(n - 1, n - 1)].clone();
        Ok(if negate { -det } else { det })
    }
}
