use clasp_core::{ClaspError, ErrorInfo, IndexChord, IntervalChord, Sign};

use crate::array::{ChordHandle, IndexArray};

/// Lays a matrix out on the circle.
///
/// Row `i` (1-based) becomes one occurrence `(i, sign, height)` whose handle
/// fills both its start and end slots. Only inputs that cannot be laid out
/// at all are rejected (a point beyond `2n - 1`, or an unfilled slot); the
/// result is otherwise unchecked and callers validate it.
pub fn matrix_to_array(matrix: &[IntervalChord]) -> Result<IndexArray, ClaspError> {
    let points = 2 * matrix.len();
    let mut array = IndexArray::new();
    let mut slots: Vec<Option<ChordHandle>> = vec![None; points];

    for (row, chord) in matrix.iter().enumerate() {
        let handle = array.intern(IndexChord::new(row + 1, chord.sign, chord.height));
        for point in [chord.start, chord.end] {
            let slot = slots.get_mut(point).ok_or_else(|| {
                ClaspError::Structure(
                    ErrorInfo::new("point-outside-circle", "chord point beyond 2n - 1")
                        .with_context("row", row + 1)
                        .with_context("point", point)
                        .with_context("points", points),
                )
            })?;
            *slot = Some(handle);
        }
    }

    for (position, slot) in slots.into_iter().enumerate() {
        let handle = slot.ok_or_else(|| {
            ClaspError::Structure(
                ErrorInfo::new("unfilled-position", "no chord touches this circle point")
                    .with_context("position", position),
            )
        })?;
        array.push_slot(handle);
    }
    Ok(array)
}

#[derive(Debug, Clone, Copy)]
struct PartialChord {
    start: usize,
    end: Option<usize>,
    sign: Sign,
    height: usize,
}

/// Reads a matrix back from the circle in one pass.
///
/// The first slot carrying index `k` supplies start, sign and height of
/// row `k - 1`; the second supplies its end. Indices that cannot be placed
/// in `1..=n` and chords seen only once are rejected; everything else is
/// left to the matrix validator.
pub fn array_to_matrix(array: &IndexArray) -> Result<Vec<IntervalChord>, ClaspError> {
    let n = array.len() / 2;
    let mut rows: Vec<Option<PartialChord>> = vec![None; n];

    for (position, handle) in array.slots().iter().enumerate() {
        let chord = array.get(*handle).ok_or_else(|| {
            ClaspError::Type(
                ErrorInfo::new("dangling-handle", "slot references no chord occurrence")
                    .with_context("position", position)
                    .with_context("handle", handle.as_raw()),
            )
        })?;
        let row = chord
            .index
            .checked_sub(1)
            .filter(|row| *row < n)
            .ok_or_else(|| {
                ClaspError::Structure(
                    ErrorInfo::new("unplaceable-index", "chord index outside 1..=n")
                        .with_context("position", position)
                        .with_context("chord", chord),
                )
            })?;
        rows[row] = match rows[row] {
            None => Some(PartialChord {
                start: position,
                end: None,
                sign: chord.sign,
                height: chord.height,
            }),
            Some(partial) if partial.end.is_none() => Some(PartialChord {
                end: Some(position),
                ..partial
            }),
            Some(_) => {
                return Err(ClaspError::Structure(
                    ErrorInfo::new("not-double-occurrence", "chord index seen more than twice")
                        .with_context("position", position)
                        .with_context("chord", chord),
                ))
            }
        };
    }

    rows.into_iter()
        .enumerate()
        .map(|(row, partial)| match partial {
            Some(PartialChord {
                start,
                end: Some(end),
                sign,
                height,
            }) => Ok(IntervalChord::new(start, end, sign, height)),
            _ => Err(ClaspError::Structure(
                ErrorInfo::new("incomplete-chord", "chord index does not close on the circle")
                    .with_context("index", row + 1),
            )),
        })
        .collect()
}
