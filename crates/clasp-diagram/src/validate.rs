use std::collections::BTreeSet;

use clasp_core::{ClaspError, ErrorInfo, IntervalChord};

use crate::array::IndexArray;

/// Checks the canonical matrix contract.
///
/// Checks run in a fixed order: heights form a permutation of `1..=n`,
/// then a single scan for `end > start` and strictly increasing starts,
/// then coverage of every circle point `0..2n` exactly once.
pub fn validate_matrix(matrix: &[IntervalChord]) -> Result<(), ClaspError> {
    let n = matrix.len();

    let heights: BTreeSet<usize> = matrix.iter().map(|chord| chord.height).collect();
    if heights.len() != n || heights.iter().copied().ne(1..=n) {
        let listed: Vec<String> = matrix.iter().map(|c| c.height.to_string()).collect();
        return Err(ClaspError::Structure(
            ErrorInfo::new("invalid-heights", "heights must be a permutation of 1..=n")
                .with_context("heights", listed.join(","))
                .with_context("n", n),
        ));
    }

    let mut previous_start: Option<usize> = None;
    for (row, chord) in matrix.iter().enumerate() {
        if chord.end <= chord.start {
            return Err(ClaspError::Structure(
                ErrorInfo::new("invalid-endpoints", "end point must exceed start point")
                    .with_context("row", row + 1)
                    .with_context("chord", chord),
            ));
        }
        if let Some(prev) = previous_start {
            if chord.start <= prev {
                return Err(ClaspError::Structure(
                    ErrorInfo::new("invalid-start-order", "start points must strictly increase")
                        .with_context("row", row + 1)
                        .with_context("previous", prev)
                        .with_context("start", chord.start),
                ));
            }
        }
        previous_start = Some(chord.start);
    }

    let points = 2 * n;
    let mut seen = vec![false; points];
    for chord in matrix {
        for point in [chord.start, chord.end] {
            match seen.get_mut(point) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(ClaspError::Structure(
                        ErrorInfo::new("invalid-points", "circle point used more than once")
                            .with_context("point", point)
                            .with_context("chord", chord),
                    ))
                }
                None => {
                    return Err(ClaspError::Structure(
                        ErrorInfo::new("invalid-points", "circle point outside 0..2n")
                            .with_context("point", point)
                            .with_context("points", points)
                            .with_context("chord", chord),
                    ))
                }
            }
        }
    }

    Ok(())
}

/// Checks the array contract.
///
/// Every arena occurrence must be referenced by exactly two slots
/// (identity, not value equality), every index and height must lie in
/// `1..=n`, and first occurrences must carry indices `1, 2, ..., n` in
/// circle order.
pub fn validate_array(array: &IndexArray) -> Result<(), ClaspError> {
    if array.len() % 2 != 0 {
        return Err(ClaspError::Structure(
            ErrorInfo::new("odd-length", "array must contain an even number of slots")
                .with_context("len", array.len()),
        ));
    }
    let n = array.len() / 2;

    let occurrences = array.occurrences();
    let mut counts = vec![0usize; occurrences.len()];
    for (position, handle) in array.slots().iter().enumerate() {
        match counts.get_mut(handle.as_raw()) {
            Some(count) => *count += 1,
            None => {
                return Err(ClaspError::Type(
                    ErrorInfo::new("dangling-handle", "slot references no chord occurrence")
                        .with_context("position", position)
                        .with_context("handle", handle.as_raw()),
                ))
            }
        }
    }
    if let Some((raw, count)) = counts.iter().enumerate().find(|(_, count)| **count != 2) {
        return Err(ClaspError::Structure(
            ErrorInfo::new(
                "not-double-occurrence",
                "chord occurrences do not appear exactly twice",
            )
            .with_context("handle", raw)
            .with_context("chord", occurrences[raw])
            .with_context("count", count),
        ));
    }

    for chord in occurrences {
        if !(1..=n).contains(&chord.index) {
            return Err(ClaspError::Structure(
                ErrorInfo::new("invalid-index", "chord index outside 1..=n")
                    .with_context("chord", chord)
                    .with_context("n", n),
            ));
        }
        if !(1..=n).contains(&chord.height) {
            return Err(ClaspError::Structure(
                ErrorInfo::new("invalid-height", "chord height outside 1..=n")
                    .with_context("chord", chord)
                    .with_context("n", n),
            ));
        }
    }

    let mut opened = vec![false; occurrences.len()];
    let mut expected = 1usize;
    for (position, handle) in array.slots().iter().enumerate() {
        let raw = handle.as_raw();
        if opened[raw] {
            continue;
        }
        opened[raw] = true;
        let chord = occurrences[raw];
        if chord.index != expected {
            return Err(ClaspError::Structure(
                ErrorInfo::new(
                    "invalid-index-order",
                    "chord indices must follow the order of first occurrence",
                )
                .with_context("position", position)
                .with_context("expected", expected)
                .with_context("chord", chord),
            ));
        }
        expected += 1;
    }

    Ok(())
}
