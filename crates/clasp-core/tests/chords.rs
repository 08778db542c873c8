use std::collections::HashSet;

use clasp_core::{IndexChord, IntervalChord, Sign};

#[test]
fn chords_are_hashable_by_value() {
    let chord = IntervalChord::new(0, 1, Sign::Positive, 1);
    let set: HashSet<_> = [chord].into_iter().collect();
    assert!(set.contains(&IntervalChord::new(0, 1, Sign::Positive, 1)));

    let indexed = IndexChord::new(1, Sign::Negative, 1);
    let set: HashSet<_> = [indexed].into_iter().collect();
    assert!(set.contains(&IndexChord::new(1, Sign::Negative, 1)));
}

#[test]
fn sign_parses_from_chars_and_strings() {
    assert_eq!(Sign::try_from('+').unwrap(), Sign::Positive);
    assert_eq!("-".parse::<Sign>().unwrap(), Sign::Negative);
    assert_eq!(Sign::Positive.value(), 1);
    assert_eq!(Sign::Negative.value(), -1);
    assert_eq!(Sign::Positive.flipped(), Sign::Negative);
}

#[test]
fn invalid_sign_is_a_type_error() {
    let err = Sign::try_from('x').unwrap_err();
    assert_eq!(err.code(), "invalid-sign");
    assert_eq!(err.info().context.get("sign").map(String::as_str), Some("x"));

    let err = "+-".parse::<Sign>().unwrap_err();
    assert_eq!(err.code(), "invalid-sign");
    assert!("".parse::<Sign>().is_err());
}

#[test]
fn chords_render_their_fields() {
    let chord = IntervalChord::new(2, 5, Sign::Negative, 3);
    assert_eq!(chord.to_string(), "[2, 5, -, 3]");
    assert_eq!(IndexChord::new(4, Sign::Positive, 2).to_string(), "(4, +, 2)");
}

#[test]
fn immediate_closure_covers_the_seam() {
    assert!(IntervalChord::new(3, 4, Sign::Positive, 1).closes_immediately(8));
    assert!(IntervalChord::new(0, 7, Sign::Positive, 1).closes_immediately(8));
    assert!(!IntervalChord::new(0, 5, Sign::Positive, 1).closes_immediately(8));
}

#[test]
fn signs_serialize_as_symbols() {
    let chord = IntervalChord::new(0, 1, Sign::Negative, 1);
    let json = serde_json::to_string(&chord).unwrap();
    assert!(json.contains("\"sign\":\"-\""));
    let decoded: IntervalChord = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, chord);
}
