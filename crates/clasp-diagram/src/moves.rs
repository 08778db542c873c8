//! Invariant-preserving moves between clasp diagrams.
//!
//! Every move checks its preconditions, builds a candidate representation,
//! re-enters the validating constructors and finally compares the
//! Alexander polynomial of the result with the input's. A mismatch is a
//! [`ClaspError::Consistency`] error and indicates a bug in the move.

use std::collections::HashMap;
use std::fmt::{self, Display};

use clasp_core::{
    chords_intersect, consecutive_heights, ClaspError, ErrorInfo, IndexChord, IntervalChord, Sign,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::array::{ChordHandle, IndexArray};
use crate::config::{InvariantCheck, MoveConfig};
use crate::diagram::ClaspDiagram;

/// The five move families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveKind {
    /// Move A: swap heights of two non-crossing chords on adjacent rungs.
    ExchangeHeights,
    /// Move B: raise every height by one, cyclically.
    CyclicShift,
    /// Move -B: lower every height by one, cyclically.
    InverseCyclicShift,
    /// Move C1: remove a chord that crosses nothing.
    EraseIsolatedChord,
    /// Move -C1: insert a chord on two adjacent circle points.
    AddIsolatedChord,
}

/// Fixed dispatch table from move id to move family.
pub const MOVE_TABLE: [(i32, MoveKind); 5] = [
    (1, MoveKind::ExchangeHeights),
    (2, MoveKind::CyclicShift),
    (-2, MoveKind::InverseCyclicShift),
    (3, MoveKind::EraseIsolatedChord),
    (-3, MoveKind::AddIsolatedChord),
];

impl MoveKind {
    /// Looks up the family registered under `id`.
    pub fn from_id(id: i32) -> Result<Self, ClaspError> {
        MOVE_TABLE
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| {
                let allowed: Vec<String> = MOVE_TABLE
                    .iter()
                    .map(|(key, kind)| format!("{key}: {}", kind.name()))
                    .collect();
                ClaspError::Precondition(
                    ErrorInfo::new("unknown-move", "no move is registered under this id")
                        .with_context("move_id", id)
                        .with_hint(format!("allowed ids are {}", allowed.join(", "))),
                )
            })
    }

    /// Id of the family in [`MOVE_TABLE`].
    pub fn id(self) -> i32 {
        match self {
            MoveKind::ExchangeHeights => 1,
            MoveKind::CyclicShift => 2,
            MoveKind::InverseCyclicShift => -2,
            MoveKind::EraseIsolatedChord => 3,
            MoveKind::AddIsolatedChord => -3,
        }
    }

    /// Stable kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            MoveKind::ExchangeHeights => "exchange-heights",
            MoveKind::CyclicShift => "cyclic-height-shift",
            MoveKind::InverseCyclicShift => "inverse-cyclic-height-shift",
            MoveKind::EraseIsolatedChord => "erase-isolated-chord",
            MoveKind::AddIsolatedChord => "add-isolated-chord",
        }
    }

    /// The family that undoes this one.
    pub fn inverse(self) -> MoveKind {
        match self {
            MoveKind::ExchangeHeights => MoveKind::ExchangeHeights,
            MoveKind::CyclicShift => MoveKind::InverseCyclicShift,
            MoveKind::InverseCyclicShift => MoveKind::CyclicShift,
            MoveKind::EraseIsolatedChord => MoveKind::AddIsolatedChord,
            MoveKind::AddIsolatedChord => MoveKind::EraseIsolatedChord,
        }
    }

    /// Usage notes: parameters and preconditions.
    pub fn help(self) -> &'static str {
        match self {
            MoveKind::ExchangeHeights => {
                "Move A (id 1): exchange the heights of chords `i` and `j`. Requires at least \
                 two chords, distinct in-range indices, non-crossing chords and heights that \
                 are consecutive modulo n. Self-inverse."
            }
            MoveKind::CyclicShift => {
                "Move B (id 2): every height h becomes (h mod n) + 1. Always applicable; \
                 undone by id -2."
            }
            MoveKind::InverseCyclicShift => {
                "Move -B (id -2): every height h becomes ((h - 2) mod n) + 1. Always \
                 applicable; undone by id 2."
            }
            MoveKind::EraseIsolatedChord => {
                "Move C1 (id 3): erase chord `i`, which must cross no other chord. Later \
                 points, indices and heights close the gap. Undone by id -3."
            }
            MoveKind::AddIsolatedChord => {
                "Move -C1 (id -3): insert a chord with `sign` and `height` (1..=n+1) on the \
                 two points right after `after_point` (-1..=2n-1). With `wraparound` the \
                 chord takes the first and last points instead and `after_point` must be -1. \
                 Undone by id 3."
            }
        }
    }
}

impl Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A fully parameterised move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "move", rename_all = "kebab-case")]
pub enum Move {
    /// Move A on chords `i` and `j` (1-based rows).
    ExchangeHeights {
        /// First chord.
        i: usize,
        /// Second chord.
        j: usize,
    },
    /// Move B.
    CyclicShift,
    /// Move -B.
    InverseCyclicShift,
    /// Move C1 on chord `i` (1-based row).
    EraseIsolatedChord {
        /// Chord to erase.
        i: usize,
    },
    /// Move -C1.
    AddIsolatedChord {
        /// Circle point after which the chord is inserted, `-1` for the very start.
        after_point: isize,
        /// Sign of the new chord.
        sign: Sign,
        /// Height of the new chord.
        height: usize,
        /// Place the chord on the first and last points of the enlarged circle.
        wraparound: bool,
    },
}

/// Keyword-style parameters for [`ClaspDiagram::apply_by_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveParams {
    /// First chord index (moves 1 and 3).
    #[serde(default)]
    pub i: Option<usize>,
    /// Second chord index (move 1).
    #[serde(default)]
    pub j: Option<usize>,
    /// Insertion point (move -3).
    #[serde(default)]
    pub after_point: Option<isize>,
    /// Sign of the inserted chord (move -3).
    #[serde(default)]
    pub sign: Option<Sign>,
    /// Height of the inserted chord (move -3).
    #[serde(default)]
    pub height: Option<usize>,
    /// Wraparound insertion flag (move -3), `false` when absent.
    #[serde(default)]
    pub wraparound: Option<bool>,
}

impl MoveParams {
    /// Parameters for a move on one chord.
    pub fn chord(i: usize) -> Self {
        Self {
            i: Some(i),
            ..Self::default()
        }
    }

    /// Parameters for a move on a pair of chords.
    pub fn pair(i: usize, j: usize) -> Self {
        Self {
            i: Some(i),
            j: Some(j),
            ..Self::default()
        }
    }

    /// Parameters for a chord insertion.
    pub fn insertion(after_point: isize, sign: Sign, height: usize) -> Self {
        Self {
            after_point: Some(after_point),
            sign: Some(sign),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Sets the wraparound flag.
    pub fn with_wraparound(mut self, wraparound: bool) -> Self {
        self.wraparound = Some(wraparound);
        self
    }
}

fn require<T>(value: Option<T>, kind: MoveKind, name: &str) -> Result<T, ClaspError> {
    value.ok_or_else(|| {
        ClaspError::Precondition(
            ErrorInfo::new("missing-parameter", "move requires a parameter that was not supplied")
                .with_context("move", kind)
                .with_context("parameter", name),
        )
    })
}

impl Move {
    /// Resolves a move id and keyword parameters into a move.
    pub fn from_params(move_id: i32, params: &MoveParams) -> Result<Self, ClaspError> {
        let kind = MoveKind::from_id(move_id)?;
        Ok(match kind {
            MoveKind::ExchangeHeights => Move::ExchangeHeights {
                i: require(params.i, kind, "i")?,
                j: require(params.j, kind, "j")?,
            },
            MoveKind::CyclicShift => Move::CyclicShift,
            MoveKind::InverseCyclicShift => Move::InverseCyclicShift,
            MoveKind::EraseIsolatedChord => Move::EraseIsolatedChord {
                i: require(params.i, kind, "i")?,
            },
            MoveKind::AddIsolatedChord => Move::AddIsolatedChord {
                after_point: require(params.after_point, kind, "after_point")?,
                sign: require(params.sign, kind, "sign")?,
                height: require(params.height, kind, "height")?,
                wraparound: params.wraparound.unwrap_or(false),
            },
        })
    }

    /// Family of the move.
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::ExchangeHeights { .. } => MoveKind::ExchangeHeights,
            Move::CyclicShift => MoveKind::CyclicShift,
            Move::InverseCyclicShift => MoveKind::InverseCyclicShift,
            Move::EraseIsolatedChord { .. } => MoveKind::EraseIsolatedChord,
            Move::AddIsolatedChord { .. } => MoveKind::AddIsolatedChord,
        }
    }

    /// Id of the move's family.
    pub fn id(&self) -> i32 {
        self.kind().id()
    }

    /// Checks the move's preconditions against `diagram` without applying it.
    pub fn check(&self, diagram: &ClaspDiagram, config: &MoveConfig) -> Result<(), ClaspError> {
        match *self {
            Move::ExchangeHeights { i, j } => check_exchange_heights(diagram, i, j).map(|_| ()),
            Move::CyclicShift | Move::InverseCyclicShift => Ok(()),
            Move::EraseIsolatedChord { i } => {
                check_erase_isolated_chord(diagram, i, config).map(|_| ())
            }
            Move::AddIsolatedChord {
                after_point,
                height,
                wraparound,
                ..
            } => check_add_isolated_chord(diagram, after_point, height, wraparound),
        }
    }

    /// Applies the move, returning a new verified diagram.
    pub fn apply(
        &self,
        diagram: &ClaspDiagram,
        config: &MoveConfig,
    ) -> Result<ClaspDiagram, ClaspError> {
        let result = match *self {
            Move::ExchangeHeights { i, j } => exchange_heights_impl(diagram, i, j),
            Move::CyclicShift => shift_heights(diagram, ShiftDirection::Up),
            Move::InverseCyclicShift => shift_heights(diagram, ShiftDirection::Down),
            Move::EraseIsolatedChord { i } => {
                erase_isolated_chord_impl(diagram, i, config).map(|(next, _)| next)
            }
            Move::AddIsolatedChord {
                after_point,
                sign,
                height,
                wraparound,
            } => add_isolated_chord_impl(diagram, after_point, sign, height, wraparound),
        };
        let candidate = result.map_err(|err| {
            if err.is_precondition() {
                trace!(mv = %self, code = err.code(), "move rejected");
            }
            err
        })?;
        verify_invariant(self, diagram, candidate, config)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::ExchangeHeights { i, j } => write!(f, "exchange-heights:{i}-{j}"),
            Move::CyclicShift => write!(f, "cyclic-height-shift"),
            Move::InverseCyclicShift => write!(f, "inverse-cyclic-height-shift"),
            Move::EraseIsolatedChord { i } => write!(f, "erase-isolated-chord:{i}"),
            Move::AddIsolatedChord {
                after_point,
                sign,
                height,
                wraparound,
            } => {
                write!(f, "add-isolated-chord:{after_point}:{sign}:{height}")?;
                if *wraparound {
                    write!(f, ":wrap")?;
                }
                Ok(())
            }
        }
    }
}

fn verify_invariant(
    mv: &Move,
    before: &ClaspDiagram,
    after: ClaspDiagram,
    config: &MoveConfig,
) -> Result<ClaspDiagram, ClaspError> {
    let preserved = match config.invariant_check {
        InvariantCheck::UpToSign => before.alexander().eq_up_to_sign(after.alexander()),
        InvariantCheck::Exact => before.alexander() == after.alexander(),
    };
    if !preserved {
        error!(
            %mv,
            before = %before.alexander(),
            after = %after.alexander(),
            "move changed the Alexander polynomial"
        );
        return Err(ClaspError::Consistency(
            ErrorInfo::new(
                "invariant-mismatch",
                "move produced a diagram with a different Alexander polynomial",
            )
            .with_context("move", mv)
            .with_context("before", before.alexander())
            .with_context("after", after.alexander()),
        ));
    }
    debug!(
        %mv,
        move_id = mv.id(),
        chords_before = before.chord_count(),
        chords_after = after.chord_count(),
        "applied move"
    );
    Ok(after)
}

fn check_exchange_heights(
    diagram: &ClaspDiagram,
    i: usize,
    j: usize,
) -> Result<(IntervalChord, IntervalChord), ClaspError> {
    let n = diagram.chord_count();
    if n < 2 {
        return Err(ClaspError::Precondition(
            ErrorInfo::new("too-few-chords", "clasp diagram has less than two chords")
                .with_context("n", n),
        ));
    }
    let (Some(first), Some(second)) = (diagram.chord(i), diagram.chord(j)) else {
        return Err(ClaspError::Precondition(
            ErrorInfo::new("index-out-of-bounds", "chord indices out of bounds for diagram")
                .with_context("i", i)
                .with_context("j", j)
                .with_context("n", n),
        ));
    };
    if i == j {
        return Err(ClaspError::Precondition(
            ErrorInfo::new("identical-indices", "chord indices i, j must be different")
                .with_context("i", i),
        ));
    }
    if chords_intersect(first, second) {
        return Err(ClaspError::Precondition(
            ErrorInfo::new("intersecting-chords", "chosen chords intersect")
                .with_context("first", first)
                .with_context("second", second),
        ));
    }
    if !consecutive_heights(first, second, n)? {
        return Err(ClaspError::Precondition(
            ErrorInfo::new(
                "non-consecutive-heights",
                "chosen chords do not have consecutive heights",
            )
            .with_context("first", first)
            .with_context("second", second),
        ));
    }
    Ok((*first, *second))
}

fn exchange_heights_impl(
    diagram: &ClaspDiagram,
    i: usize,
    j: usize,
) -> Result<ClaspDiagram, ClaspError> {
    let (first, second) = check_exchange_heights(diagram, i, j)?;
    let mut matrix = diagram.matrix().to_vec();
    matrix[i - 1] = first.with_height(second.height);
    matrix[j - 1] = second.with_height(first.height);
    ClaspDiagram::from_matrix(matrix)
}

#[derive(Debug, Clone, Copy)]
enum ShiftDirection {
    Up,
    Down,
}

fn shift_heights(
    diagram: &ClaspDiagram,
    direction: ShiftDirection,
) -> Result<ClaspDiagram, ClaspError> {
    let n = diagram.chord_count() as i64;
    let matrix: Vec<IntervalChord> = diagram
        .matrix()
        .iter()
        .map(|chord| {
            let height = chord.height as i64;
            let shifted = match direction {
                ShiftDirection::Up => height.rem_euclid(n) + 1,
                ShiftDirection::Down => (height - 2).rem_euclid(n) + 1,
            };
            chord.with_height(shifted as usize)
        })
        .collect();
    ClaspDiagram::from_matrix(matrix)
}

fn check_erase_isolated_chord(
    diagram: &ClaspDiagram,
    i: usize,
    config: &MoveConfig,
) -> Result<IntervalChord, ClaspError> {
    let n = diagram.chord_count();
    if n < 1 {
        return Err(ClaspError::Precondition(
            ErrorInfo::new("too-few-chords", "clasp diagram has no chord to erase"),
        ));
    }
    let Some(chord) = diagram.chord(i) else {
        return Err(ClaspError::Precondition(
            ErrorInfo::new("index-out-of-bounds", "chord index out of bounds for diagram")
                .with_context("i", i)
                .with_context("n", n),
        ));
    };
    if !diagram.is_isolated(i) {
        return Err(ClaspError::Precondition(
            ErrorInfo::new("not-isolated", "chord crosses another chord")
                .with_context("i", i)
                .with_context("chord", chord),
        ));
    }
    if config.require_immediate_closure && !chord.closes_immediately(diagram.point_count()) {
        return Err(ClaspError::Precondition(
            ErrorInfo::new(
                "not-immediately-closing",
                "chord endpoints are not adjacent on the circle",
            )
            .with_context("i", i)
            .with_context("chord", chord),
        ));
    }
    Ok(*chord)
}

fn erase_isolated_chord_impl(
    diagram: &ClaspDiagram,
    i: usize,
    config: &MoveConfig,
) -> Result<(ClaspDiagram, IntervalChord), ClaspError> {
    let erased = check_erase_isolated_chord(diagram, i, config)?;
    let source = diagram.array();

    // Both slots of a surviving occurrence must share one new handle.
    let mut interned: HashMap<ChordHandle, ChordHandle> = HashMap::new();
    let mut array = IndexArray::new();
    for (position, handle) in source.slots().iter().enumerate() {
        let chord = source.get(*handle).ok_or_else(|| {
            ClaspError::Type(
                ErrorInfo::new("dangling-handle", "slot references no chord occurrence")
                    .with_context("position", position)
                    .with_context("handle", handle.as_raw()),
            )
        })?;
        if chord.index == i {
            continue;
        }
        let rewritten = IndexChord::new(
            if chord.index > i { chord.index - 1 } else { chord.index },
            chord.sign,
            if chord.height > erased.height {
                chord.height - 1
            } else {
                chord.height
            },
        );
        let renamed = *interned
            .entry(*handle)
            .or_insert_with(|| array.intern(rewritten));
        array.push_slot(renamed);
    }

    let next = ClaspDiagram::from_array(array)?;
    Ok((next, erased))
}

fn check_add_isolated_chord(
    diagram: &ClaspDiagram,
    after_point: isize,
    height: usize,
    wraparound: bool,
) -> Result<(), ClaspError> {
    let n = diagram.chord_count();
    let last_point = diagram.point_count() as isize - 1;
    if after_point < -1 || after_point > last_point {
        return Err(ClaspError::Precondition(
            ErrorInfo::new("after-point-out-of-range", "insertion point outside -1..=2n-1")
                .with_context("after_point", after_point)
                .with_context("n", n),
        ));
    }
    if wraparound && after_point != -1 {
        return Err(ClaspError::Precondition(
            ErrorInfo::new(
                "wraparound-anchor",
                "wraparound insertion is anchored at after_point -1",
            )
            .with_context("after_point", after_point),
        ));
    }
    if !(1..=n + 1).contains(&height) {
        return Err(ClaspError::Precondition(
            ErrorInfo::new("height-out-of-range", "new height outside 1..=n+1")
                .with_context("height", height)
                .with_context("n", n),
        ));
    }
    Ok(())
}

fn add_isolated_chord_impl(
    diagram: &ClaspDiagram,
    after_point: isize,
    sign: Sign,
    height: usize,
    wraparound: bool,
) -> Result<ClaspDiagram, ClaspError> {
    check_add_isolated_chord(diagram, after_point, height, wraparound)?;
    let start = (after_point + 1) as usize;
    let lift = |h: usize| if h >= height { h + 1 } else { h };
    let shift = |point: usize| {
        if wraparound {
            point + 1
        } else if point >= start {
            point + 2
        } else {
            point
        }
    };
    let inserted = if wraparound {
        IntervalChord::new(0, diagram.point_count() + 1, sign, height)
    } else {
        IntervalChord::new(start, start + 1, sign, height)
    };

    let mut matrix: Vec<IntervalChord> = diagram
        .matrix()
        .iter()
        .map(|chord| {
            IntervalChord::new(
                shift(chord.start),
                shift(chord.end),
                chord.sign,
                lift(chord.height),
            )
        })
        .collect();
    matrix.push(inserted);
    matrix.sort_by_key(|chord| chord.start);
    ClaspDiagram::from_matrix(matrix)
}

/// Move A: exchange the heights of chords `i` and `j`.
pub fn exchange_heights(
    diagram: &ClaspDiagram,
    i: usize,
    j: usize,
) -> Result<ClaspDiagram, ClaspError> {
    diagram.apply(&Move::ExchangeHeights { i, j })
}

/// Move B: every height `h` becomes `(h mod n) + 1`.
pub fn cyclic_height_shift(diagram: &ClaspDiagram) -> Result<ClaspDiagram, ClaspError> {
    diagram.apply(&Move::CyclicShift)
}

/// Move -B: every height `h` becomes `((h - 2) mod n) + 1`.
pub fn inverse_cyclic_height_shift(diagram: &ClaspDiagram) -> Result<ClaspDiagram, ClaspError> {
    diagram.apply(&Move::InverseCyclicShift)
}

/// Move C1: erase the isolated chord `i`, returning the new diagram and the erased chord.
///
/// Re-inserting the erased chord with `after_point = erased.start - 1`
/// (and `wraparound` when it spanned points `0` and `2n - 1`) restores the
/// original diagram whenever its endpoints were adjacent.
pub fn erase_isolated_chord(
    diagram: &ClaspDiagram,
    i: usize,
) -> Result<(ClaspDiagram, IntervalChord), ClaspError> {
    erase_isolated_chord_with(diagram, i, &MoveConfig::default())
}

/// [`erase_isolated_chord`] with an explicit configuration.
pub fn erase_isolated_chord_with(
    diagram: &ClaspDiagram,
    i: usize,
    config: &MoveConfig,
) -> Result<(ClaspDiagram, IntervalChord), ClaspError> {
    let mv = Move::EraseIsolatedChord { i };
    let (next, erased) = erase_isolated_chord_impl(diagram, i, config)?;
    let next = verify_invariant(&mv, diagram, next, config)?;
    Ok((next, erased))
}

/// Move -C1: insert an isolated chord right after `after_point`.
pub fn add_isolated_chord(
    diagram: &ClaspDiagram,
    after_point: isize,
    sign: Sign,
    height: usize,
    wraparound: bool,
) -> Result<ClaspDiagram, ClaspError> {
    diagram.apply(&Move::AddIsolatedChord {
        after_point,
        sign,
        height,
        wraparound,
    })
}
