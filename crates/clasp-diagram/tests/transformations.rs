use clasp_core::{ClaspError, IndexChord, IntervalChord, RngHandle, Sign};
use clasp_diagram::{
    array_to_matrix, matrix_to_array, random_valid_array, random_valid_matrix, ChordHandle,
    ClaspDiagram, IndexArray,
};
use proptest::prelude::*;

const P: Sign = Sign::Positive;
const N: Sign = Sign::Negative;

fn rows(chords: &[(usize, usize, Sign, usize)]) -> Vec<IntervalChord> {
    chords
        .iter()
        .map(|&(start, end, sign, height)| IntervalChord::new(start, end, sign, height))
        .collect()
}

/// Pairs of slot positions that share a handle, in circle order.
fn pairing(array: &IndexArray) -> Vec<(usize, usize)> {
    let slots = array.slots();
    let mut pairs = Vec::new();
    for (a, handle) in slots.iter().enumerate() {
        if let Some(b) = slots.iter().skip(a + 1).position(|other| other == handle) {
            pairs.push((a, a + 1 + b));
        }
    }
    pairs
}

#[test]
fn empty_matrix_maps_to_empty_array() {
    let array = matrix_to_array(&[]).unwrap();
    assert!(array.is_empty());
    assert!(array_to_matrix(&array).unwrap().is_empty());
}

#[test]
fn both_endpoints_share_one_occurrence() {
    let matrix = rows(&[(0, 2, P, 2), (1, 3, N, 1)]);
    let array = matrix_to_array(&matrix).unwrap();
    assert_eq!(array.len(), 4);
    assert_eq!(array.occurrences().len(), 2);
    assert_eq!(array.slots()[0], array.slots()[2]);
    assert_eq!(array.slots()[1], array.slots()[3]);
    assert_ne!(array.slots()[0], array.slots()[1]);
    assert_eq!(array.chord_at(0), Some(&IndexChord::new(1, P, 2)));
    assert_eq!(array.chord_at(3), Some(&IndexChord::new(2, N, 1)));
}

#[test]
fn array_reads_back_into_matrix_rows() {
    let array = IndexArray::from_parts(
        vec![
            IndexChord::new(1, P, 1),
            IndexChord::new(2, N, 2),
            IndexChord::new(3, P, 3),
        ],
        [0, 1, 1, 0, 2, 2]
            .into_iter()
            .map(ChordHandle::from_raw)
            .collect(),
    );
    let matrix = array_to_matrix(&array).unwrap();
    assert_eq!(matrix, rows(&[(0, 3, P, 1), (1, 2, N, 2), (4, 5, P, 3)]));
}

#[test]
fn point_outside_circle_cannot_be_laid_out() {
    let err = matrix_to_array(&rows(&[(0, 5, P, 1)])).unwrap_err();
    assert_eq!(err.code(), "point-outside-circle");
}

#[test]
fn unfilled_point_cannot_be_laid_out() {
    let err = matrix_to_array(&rows(&[(0, 0, P, 1)])).unwrap_err();
    assert_eq!(err.code(), "unfilled-position");
}

#[test]
fn index_beyond_circle_cannot_be_placed() {
    let array = IndexArray::from_parts(
        vec![IndexChord::new(3, P, 1)],
        vec![ChordHandle::from_raw(0), ChordHandle::from_raw(0)],
    );
    match array_to_matrix(&array) {
        Err(ClaspError::Structure(info)) => assert_eq!(info.code, "unplaceable-index"),
        other => panic!("expected structure error, got {other:?}"),
    }
}

#[test]
fn diagrams_from_either_form_are_equal() {
    let matrix = rows(&[(0, 4, P, 1), (1, 2, N, 2), (3, 6, P, 3), (5, 7, N, 4)]);
    let from_matrix = ClaspDiagram::from_matrix(matrix.clone()).unwrap();
    let from_array = ClaspDiagram::from_array(matrix_to_array(&matrix).unwrap()).unwrap();
    assert_eq!(from_matrix, from_array);
    assert_eq!(from_array.matrix(), matrix.as_slice());
    assert_eq!(from_matrix.alexander(), from_array.alexander());
}

proptest! {
    #[test]
    fn matrix_round_trips_through_array(seed in any::<u64>(), n in 0usize..8) {
        let mut rng = RngHandle::from_seed(seed);
        let matrix = random_valid_matrix(n, &mut rng).unwrap();
        let array = matrix_to_array(&matrix).unwrap();
        prop_assert_eq!(array_to_matrix(&array).unwrap(), matrix);
    }

    #[test]
    fn array_round_trip_keeps_identity_structure(seed in any::<u64>(), n in 0usize..8) {
        let mut rng = RngHandle::from_seed(seed);
        let array = random_valid_array(n, &mut rng).unwrap();
        let rebuilt = matrix_to_array(&array_to_matrix(&array).unwrap()).unwrap();
        prop_assert_eq!(pairing(&rebuilt), pairing(&array));
        for position in 0..array.len() {
            prop_assert_eq!(rebuilt.chord_at(position), array.chord_at(position));
        }
    }
}
