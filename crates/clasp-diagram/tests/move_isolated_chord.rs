use clasp_core::{ClaspError, IntervalChord, RngHandle, Sign};
use clasp_diagram::{
    add_isolated_chord, erase_isolated_chord, erase_isolated_chord_with, random_valid_matrix,
    validate_array, ClaspDiagram, InvariantCheck, Move, MoveConfig,
};
use proptest::prelude::*;

const P: Sign = Sign::Positive;
const N: Sign = Sign::Negative;

fn diagram(chords: &[(usize, usize, Sign, usize)]) -> ClaspDiagram {
    let rows: Vec<IntervalChord> = chords
        .iter()
        .map(|&(start, end, sign, height)| IntervalChord::new(start, end, sign, height))
        .collect();
    ClaspDiagram::from_matrix(rows).unwrap()
}

fn unknot() -> ClaspDiagram {
    ClaspDiagram::from_matrix(Vec::new()).unwrap()
}

fn precondition_code<T: std::fmt::Debug>(result: Result<T, ClaspError>) -> String {
    match result {
        Err(ClaspError::Precondition(info)) => info.code,
        other => panic!("expected precondition error, got {other:?}"),
    }
}

/// Re-inserts an erased chord at the position it was taken from.
fn restore(erased_from: &ClaspDiagram, reduced: &ClaspDiagram, erased: IntervalChord) -> ClaspDiagram {
    let wraparound = erased.end != erased.start + 1;
    assert!(erased.closes_immediately(erased_from.point_count()));
    let after_point = if wraparound { -1 } else { erased.start as isize - 1 };
    add_isolated_chord(reduced, after_point, erased.sign, erased.height, wraparound).unwrap()
}

/// Checks both inverse laws on every erasable chord and every insertion slot.
fn assert_inverse_laws(start: &ClaspDiagram) {
    for i in 1..=start.chord_count() {
        let (reduced, erased) = match erase_isolated_chord(start, i) {
            Ok(outcome) => outcome,
            Err(err) if err.is_precondition() => continue,
            Err(err) => panic!("erasing chord {i}: {err}"),
        };
        assert!(reduced.alexander().eq_up_to_sign(start.alexander()));
        if erased.closes_immediately(start.point_count()) {
            assert_eq!(&restore(start, &reduced, erased), start, "erasing chord {i}");
        }
    }

    let n = start.chord_count();
    for sign in [P, N] {
        for height in 1..=n + 1 {
            for after_point in -1..start.point_count() as isize {
                let grown = add_isolated_chord(start, after_point, sign, height, false).unwrap();
                let row = grown
                    .matrix()
                    .iter()
                    .position(|chord| chord.start as isize == after_point + 1)
                    .unwrap();
                let inserted = grown.matrix()[row];
                assert_eq!(inserted.end, inserted.start + 1);
                assert_eq!((inserted.sign, inserted.height), (sign, height));
                let (back, _) = erase_isolated_chord(&grown, row + 1).unwrap();
                assert_eq!(&back, start, "inserting after {after_point}");
            }
            let wrapped = add_isolated_chord(start, -1, sign, height, true).unwrap();
            let outer = wrapped.matrix()[0];
            assert_eq!((outer.start, outer.end), (0, 2 * n + 1));
            let (back, erased) = erase_isolated_chord(&wrapped, 1).unwrap();
            assert_eq!(erased, outer);
            assert_eq!(&back, start, "wraparound insertion");
        }
    }
}

#[test]
fn erasing_the_only_chord_yields_the_unknot() {
    let (reduced, erased) = erase_isolated_chord(&diagram(&[(0, 1, P, 1)]), 1).unwrap();
    assert!(reduced.matrix().is_empty());
    assert_eq!(erased, IntervalChord::new(0, 1, P, 1));
}

#[test]
fn erasing_renumbers_points_indices_and_heights() {
    let start = diagram(&[(0, 4, P, 1), (1, 2, N, 2), (3, 6, P, 3), (5, 7, N, 4)]);
    let (reduced, erased) = erase_isolated_chord(&start, 2).unwrap();
    assert_eq!(reduced, diagram(&[(0, 2, P, 1), (1, 4, P, 2), (3, 5, N, 3)]));
    assert_eq!(erased, IntervalChord::new(1, 2, N, 2));
    let first = reduced.array().slots()[0];
    assert_eq!(reduced.array().slots()[2], first);
}

#[test]
fn erasing_rebuilds_one_occurrence_per_surviving_chord() {
    let start = diagram(&[(0, 7, P, 3), (1, 3, N, 1), (2, 5, N, 4), (4, 6, P, 2)]);
    let (reduced, erased) = erase_isolated_chord(&start, 1).unwrap();
    assert_eq!(erased, IntervalChord::new(0, 7, P, 3));
    let array = reduced.array();
    assert_eq!(array.occurrences().len(), 3);
    assert_eq!(array.len(), 6);
    validate_array(array).unwrap();
    for handle in array.slots() {
        assert!(array.get(*handle).is_some());
        assert_eq!(array.slots().iter().filter(|other| *other == handle).count(), 2);
    }
}

#[test]
fn enclosing_chord_can_be_erased() {
    let start = diagram(&[(0, 3, P, 1), (1, 2, P, 2), (4, 5, P, 3)]);
    let (reduced, _) = erase_isolated_chord(&start, 1).unwrap();
    assert_eq!(reduced, diagram(&[(0, 1, P, 1), (2, 3, P, 2)]));
}

#[test]
fn immediate_closure_can_be_required() {
    let start = diagram(&[(0, 3, P, 1), (1, 2, P, 2), (4, 5, P, 3)]);
    let config = MoveConfig {
        require_immediate_closure: true,
        ..MoveConfig::default()
    };
    assert_eq!(
        precondition_code(erase_isolated_chord_with(&start, 1, &config)),
        "not-immediately-closing"
    );
    assert!(erase_isolated_chord_with(&start, 2, &config).is_ok());
}

#[test]
fn crossing_chord_is_not_isolated() {
    let trefoil = diagram(&[(0, 2, P, 2), (1, 3, P, 1)]);
    assert!(!trefoil.is_isolated(1));
    assert_eq!(precondition_code(erase_isolated_chord(&trefoil, 1)), "not-isolated");
}

#[test]
fn erase_rejects_bad_indices() {
    assert_eq!(precondition_code(erase_isolated_chord(&unknot(), 1)), "too-few-chords");
    let single = diagram(&[(0, 1, N, 1)]);
    assert_eq!(precondition_code(erase_isolated_chord(&single, 2)), "index-out-of-bounds");
    assert_eq!(precondition_code(erase_isolated_chord(&single, 0)), "index-out-of-bounds");
}

#[test]
fn adding_to_the_unknot_yields_a_single_chord() {
    for sign in [P, N] {
        let grown = add_isolated_chord(&unknot(), -1, sign, 1, false).unwrap();
        assert_eq!(grown, diagram(&[(0, 1, sign, 1)]));
        let wrapped = add_isolated_chord(&unknot(), -1, sign, 1, true).unwrap();
        assert_eq!(wrapped, grown);
    }
}

#[test]
fn adding_shifts_later_points_and_higher_heights() {
    let trefoil = diagram(&[(0, 2, P, 2), (1, 3, P, 1)]);
    let grown = add_isolated_chord(&trefoil, 1, N, 2, false).unwrap();
    assert_eq!(grown, diagram(&[(0, 4, P, 3), (1, 5, P, 1), (2, 3, N, 2)]));
    assert!(grown.alexander().eq_up_to_sign(trefoil.alexander()));
}

#[test]
fn wraparound_insertion_encloses_the_circle() {
    let trefoil = diagram(&[(0, 2, P, 2), (1, 3, P, 1)]);
    let grown = add_isolated_chord(&trefoil, -1, P, 1, true).unwrap();
    assert_eq!(grown, diagram(&[(0, 5, P, 1), (1, 3, P, 3), (2, 4, P, 2)]));
}

#[test]
fn add_rejects_out_of_range_parameters() {
    let trefoil = diagram(&[(0, 2, P, 2), (1, 3, P, 1)]);
    assert_eq!(
        precondition_code(add_isolated_chord(&trefoil, -2, P, 1, false)),
        "after-point-out-of-range"
    );
    assert_eq!(
        precondition_code(add_isolated_chord(&trefoil, 4, P, 1, false)),
        "after-point-out-of-range"
    );
    assert_eq!(
        precondition_code(add_isolated_chord(&unknot(), 0, P, 1, false)),
        "after-point-out-of-range"
    );
    assert_eq!(
        precondition_code(add_isolated_chord(&trefoil, 0, P, 0, false)),
        "height-out-of-range"
    );
    assert_eq!(
        precondition_code(add_isolated_chord(&trefoil, 0, P, 4, false)),
        "height-out-of-range"
    );
    assert_eq!(
        precondition_code(add_isolated_chord(&trefoil, 0, P, 1, true)),
        "wraparound-anchor"
    );
}

#[test]
fn exact_check_rejects_positive_chord_erasure() {
    let exact = MoveConfig {
        invariant_check: InvariantCheck::Exact,
        ..MoveConfig::default()
    };
    let positive = diagram(&[(0, 1, P, 1)]);
    match erase_isolated_chord_with(&positive, 1, &exact) {
        Err(err @ ClaspError::Consistency(_)) => {
            assert_eq!(err.code(), "invariant-mismatch");
            assert!(!err.is_precondition());
        }
        other => panic!("expected consistency error, got {other:?}"),
    }

    let negative = diagram(&[(0, 1, N, 1)]);
    assert!(erase_isolated_chord_with(&negative, 1, &exact).is_ok());
    let mv = Move::AddIsolatedChord {
        after_point: -1,
        sign: N,
        height: 1,
        wraparound: false,
    };
    assert!(unknot().apply_with(&mv, &exact).is_ok());
}

#[test]
fn inverse_laws_hold_on_known_diagrams() {
    assert_inverse_laws(&unknot());
    assert_inverse_laws(&diagram(&[(0, 1, P, 1)]));
    assert_inverse_laws(&diagram(&[(0, 2, P, 2), (1, 3, P, 1)]));
    assert_inverse_laws(&diagram(&[(0, 3, N, 2), (1, 2, P, 1)]));
    assert_inverse_laws(&diagram(&[(0, 4, P, 1), (1, 2, N, 2), (3, 6, P, 3), (5, 7, N, 4)]));
    assert_inverse_laws(&diagram(&[(0, 7, P, 3), (1, 3, N, 1), (2, 5, N, 4), (4, 6, P, 2)]));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn inverse_laws_hold_on_random_diagrams(seed in any::<u64>(), n in 0usize..5) {
        let mut rng = RngHandle::from_seed(seed);
        let start = ClaspDiagram::from_matrix(random_valid_matrix(n, &mut rng).unwrap()).unwrap();
        assert_inverse_laws(&start);
    }
}
