use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use clasp_alexander::{IntMatrix, LaurentPolynomial, PolyMatrix, SymbolicInvariants};
use clasp_core::{ClaspError, IntervalChord};
use tracing::debug;

use crate::array::IndexArray;
use crate::config::MoveConfig;
use crate::moves::{Move, MoveParams};
use crate::transform::{array_to_matrix, matrix_to_array};
use crate::validate::{validate_array, validate_matrix};

/// A validated clasp diagram with both representations and its invariants.
///
/// Instances are immutable; moves return new diagrams. Equality and hashing
/// only look at the canonical matrix.
#[derive(Debug, Clone)]
pub struct ClaspDiagram {
    matrix: Vec<IntervalChord>,
    array: IndexArray,
    invariants: SymbolicInvariants,
}

impl ClaspDiagram {
    /// Builds a diagram from its canonical matrix.
    ///
    /// The matrix is validated, the array is derived and validated, then the
    /// symbolic pipeline runs. Any failure leaves no diagram behind.
    pub fn from_matrix(matrix: impl Into<Vec<IntervalChord>>) -> Result<Self, ClaspError> {
        let matrix = matrix.into();
        validate_matrix(&matrix)?;
        let array = matrix_to_array(&matrix)?;
        validate_array(&array)?;
        Self::assemble(matrix, array)
    }

    /// Builds a diagram from its array form, deriving and validating the matrix.
    pub fn from_array(array: IndexArray) -> Result<Self, ClaspError> {
        validate_array(&array)?;
        let matrix = array_to_matrix(&array)?;
        validate_matrix(&matrix)?;
        Self::assemble(matrix, array)
    }

    fn assemble(matrix: Vec<IntervalChord>, array: IndexArray) -> Result<Self, ClaspError> {
        let invariants = SymbolicInvariants::compute(&matrix)?;
        debug!(
            chords = matrix.len(),
            alexander = %invariants.alexander,
            "built clasp diagram"
        );
        Ok(Self {
            matrix,
            array,
            invariants,
        })
    }

    /// Canonical matrix, rows ordered by start point.
    pub fn matrix(&self) -> &[IntervalChord] {
        &self.matrix
    }

    /// Array form: one slot per circle point.
    pub fn array(&self) -> &IndexArray {
        &self.array
    }

    /// Number of chords `n`.
    pub fn chord_count(&self) -> usize {
        self.matrix.len()
    }

    /// Number of circle points `2n`.
    pub fn point_count(&self) -> usize {
        2 * self.matrix.len()
    }

    /// Chord at 1-based row `index`.
    pub fn chord(&self, index: usize) -> Option<&IntervalChord> {
        index.checked_sub(1).and_then(|row| self.matrix.get(row))
    }

    /// Whether the chord at 1-based row `index` crosses no other chord.
    pub fn is_isolated(&self, index: usize) -> bool {
        (1..=self.chord_count()).contains(&index)
            && self.invariants.crossing.row_and_column_zero(index - 1)
    }

    /// All derived algebraic objects.
    pub fn invariants(&self) -> &SymbolicInvariants {
        &self.invariants
    }

    /// Sign matrix `E`.
    pub fn sign_matrix(&self) -> &IntMatrix {
        &self.invariants.sign
    }

    /// Crossing matrix `L`.
    pub fn crossing_matrix(&self) -> &IntMatrix {
        &self.invariants.crossing
    }

    /// Sum matrix `LE = L + E`.
    pub fn sum_matrix(&self) -> &IntMatrix {
        &self.invariants.sum
    }

    /// Skein matrix `S_D`.
    pub fn skein_matrix(&self) -> &PolyMatrix {
        &self.invariants.skein
    }

    /// Normalized Alexander polynomial, defined up to sign.
    pub fn alexander(&self) -> &LaurentPolynomial {
        &self.invariants.alexander
    }

    /// Applies a move with the default [`MoveConfig`].
    pub fn apply(&self, mv: &Move) -> Result<ClaspDiagram, ClaspError> {
        mv.apply(self, &MoveConfig::default())
    }

    /// Applies a move with an explicit configuration.
    pub fn apply_with(&self, mv: &Move, config: &MoveConfig) -> Result<ClaspDiagram, ClaspError> {
        mv.apply(self, config)
    }

    /// Applies the move registered under `move_id` in the move table.
    ///
    /// Ids: `1` exchange heights (`i`, `j`), `2` cyclic shift, `-2` inverse
    /// cyclic shift, `3` erase isolated chord (`i`), `-3` add isolated chord
    /// (`after_point`, `sign`, `height`, optional `wraparound`).
    pub fn apply_by_id(&self, move_id: i32, params: &MoveParams) -> Result<ClaspDiagram, ClaspError> {
        Move::from_params(move_id, params)?.apply(self, &MoveConfig::default())
    }
}

impl PartialEq for ClaspDiagram {
    fn eq(&self, other: &Self) -> bool {
        self.matrix == other.matrix
    }
}

impl Eq for ClaspDiagram {}

impl Hash for ClaspDiagram {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.matrix.hash(state);
    }
}

impl Display for ClaspDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Clasp Diagram object")?;
        if self.matrix.is_empty() {
            writeln!(f, "[]")?;
        }
        for chord in &self.matrix {
            writeln!(f, "{chord}")?;
        }
        write!(f, "Alexander polynomial = {}", self.invariants.alexander)
    }
}
