use clasp_alexander::LaurentPolynomial;
use proptest::prelude::*;

fn arb_poly() -> impl Strategy<Value = LaurentPolynomial> {
    prop::collection::vec((-4i32..5, -6i64..7), 0..6).prop_map(LaurentPolynomial::from_terms)
}

#[test]
fn zero_coefficients_are_pruned() {
    let poly = LaurentPolynomial::from_terms([(1, 2), (1, -2), (0, 0)]);
    assert!(poly.is_zero());
    assert_eq!(poly, LaurentPolynomial::zero());
    assert_eq!(poly.min_exponent(), None);
}

#[test]
fn normalization_clears_negative_powers() {
    let poly = LaurentPolynomial::from_terms([(-1, 1), (0, -1), (1, 1)]);
    let normalized = poly.normalized();
    assert_eq!(normalized, LaurentPolynomial::from_terms([(0, 1), (1, -1), (2, 1)]));

    let already = LaurentPolynomial::from_terms([(1, 3), (2, 1)]);
    assert_eq!(already.normalized(), already);
}

#[test]
fn display_uses_descending_powers() {
    let poly = LaurentPolynomial::from_terms([(0, 1), (1, -1), (2, 1)]);
    assert_eq!(poly.to_string(), "t^2 - t + 1");
    let poly = LaurentPolynomial::from_terms([(0, 2), (1, -3), (2, 2)]);
    assert_eq!(poly.to_string(), "2*t^2 - 3*t + 2");
    let poly = LaurentPolynomial::from_terms([(-1, -1), (1, 1)]);
    assert_eq!(poly.to_string(), "t - t^-1");
    assert_eq!(LaurentPolynomial::zero().to_string(), "0");
    assert_eq!(LaurentPolynomial::constant(-4).to_string(), "-4");
}

#[test]
fn sign_insensitive_comparison() {
    let poly = LaurentPolynomial::from_terms([(0, 1), (1, -3), (2, 1)]);
    assert!(poly.eq_up_to_sign(&-&poly));
    assert!(poly.eq_up_to_sign(&poly));
    assert!(!poly.eq_up_to_sign(&poly.shifted(1)));
}

#[test]
fn inexact_division_is_refused() {
    let numerator = LaurentPolynomial::from_terms([(0, 1), (1, 1)]);
    let divisor = LaurentPolynomial::from_terms([(0, 2)]);
    assert_eq!(numerator.checked_div(&divisor), None);
    assert_eq!(numerator.checked_div(&LaurentPolynomial::zero()), None);

    let divisor = LaurentPolynomial::from_terms([(0, -1), (1, 1)]);
    assert_eq!(numerator.checked_div(&divisor), None);
}

#[test]
fn json_round_trip() {
    let poly = LaurentPolynomial::from_terms([(-2, 1), (0, -3), (3, 5)]);
    let json = serde_json::to_string(&poly).unwrap();
    let decoded: LaurentPolynomial = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, poly);
}

proptest! {
    #[test]
    fn ring_laws_hold(a in arb_poly(), b in arb_poly(), c in arb_poly()) {
        prop_assert_eq!(&a + &b, &b + &a);
        prop_assert_eq!(&a * &b, &b * &a);
        prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        prop_assert!((&a - &a).is_zero());
        prop_assert_eq!(&a * &LaurentPolynomial::one(), a.clone());
    }

    #[test]
    fn exact_products_divide_back(a in arb_poly(), b in arb_poly()) {
        prop_assume!(!b.is_zero());
        let product = &a * &b;
        prop_assert_eq!(product.checked_div(&b), Some(a));
    }

    #[test]
    fn value_at_one_is_multiplicative(a in arb_poly(), b in arb_poly()) {
        prop_assert_eq!((&a * &b).at_one(), a.at_one() * b.at_one());
    }
}
