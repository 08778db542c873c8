//! Arithmetic predicates on chords: crossing and height adjacency.

use crate::chord::IntervalChord;
use crate::errors::{ClaspError, ErrorInfo};

/// Checks whether two chords cross inside the circle.
///
/// After ordering the pair by start point, the chords cross iff the first
/// chord ends strictly between the endpoints of the second.
pub fn chords_intersect(a: &IntervalChord, b: &IntervalChord) -> bool {
    let (first, second) = if b.start < a.start { (b, a) } else { (a, b) };
    second.start < first.end && first.end < second.end
}

/// Checks whether two chords sit on neighbouring rungs of the cyclic height ladder.
///
/// Heights `h1`, `h2` are consecutive iff `(h1 - h2) mod n` is `1` or `n - 1`.
pub fn consecutive_heights(
    a: &IntervalChord,
    b: &IntervalChord,
    n: usize,
) -> Result<bool, ClaspError> {
    if n < 2 {
        return Err(ClaspError::Precondition(
            ErrorInfo::new(
                "too-few-chords",
                "height adjacency needs a ladder of at least two chords",
            )
            .with_context("n", n),
        ));
    }
    let modulus = n as i64;
    let diff = (a.height as i64 - b.height as i64).rem_euclid(modulus);
    Ok(diff == 1 || diff == modulus - 1)
}
