//! Exact Laurent polynomials in one variable `t` with integer coefficients.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Sparse Laurent polynomial `sum c_k t^k`, `k` possibly negative.
///
/// Zero coefficients are never stored, so structural equality is
/// mathematical equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaurentPolynomial {
    terms: BTreeMap<i32, i64>,
}

impl LaurentPolynomial {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The constant polynomial `1`.
    pub fn one() -> Self {
        Self::constant(1)
    }

    /// A constant polynomial.
    pub fn constant(value: i64) -> Self {
        Self::monomial(value, 0)
    }

    /// The single term `coefficient * t^exponent`.
    pub fn monomial(coefficient: i64, exponent: i32) -> Self {
        let mut poly = Self::zero();
        poly.add_term(exponent, coefficient);
        poly
    }

    /// The variable `t`.
    pub fn t() -> Self {
        Self::monomial(1, 1)
    }

    /// The inverse variable `t^-1`.
    pub fn t_inv() -> Self {
        Self::monomial(1, -1)
    }

    /// Builds a polynomial from `(exponent, coefficient)` pairs, summing repeats.
    pub fn from_terms(terms: impl IntoIterator<Item = (i32, i64)>) -> Self {
        let mut poly = Self::zero();
        for (exponent, coefficient) in terms {
            poly.add_term(exponent, coefficient);
        }
        poly
    }

    fn add_term(&mut self, exponent: i32, coefficient: i64) {
        if coefficient == 0 {
            return;
        }
        let entry = self.terms.entry(exponent).or_insert(0);
        *entry += coefficient;
        if *entry == 0 {
            self.terms.remove(&exponent);
        }
    }

    /// Whether every coefficient is zero.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Coefficient of `t^exponent`.
    pub fn coefficient(&self, exponent: i32) -> i64 {
        self.terms.get(&exponent).copied().unwrap_or(0)
    }

    /// Non-zero terms as `(exponent, coefficient)` in ascending exponent order.
    pub fn terms(&self) -> impl Iterator<Item = (i32, i64)> + '_ {
        self.terms.iter().map(|(exp, coeff)| (*exp, *coeff))
    }

    /// Smallest exponent carrying a non-zero coefficient.
    pub fn min_exponent(&self) -> Option<i32> {
        self.terms.keys().next().copied()
    }

    /// Largest exponent carrying a non-zero coefficient.
    pub fn max_exponent(&self) -> Option<i32> {
        self.terms.keys().next_back().copied()
    }

    /// Multiplies by `t^shift`.
    pub fn shifted(&self, shift: i32) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .map(|(exp, coeff)| (exp + shift, *coeff))
                .collect(),
        }
    }

    /// Clears negative powers by multiplying with `t^k`, `k = -min_exponent`.
    ///
    /// Polynomials without negative powers are returned unchanged.
    pub fn normalized(&self) -> Self {
        match self.min_exponent() {
            Some(min) if min < 0 => self.shifted(-min),
            _ => self.clone(),
        }
    }

    /// Value of the polynomial at `t = 1`.
    pub fn at_one(&self) -> i64 {
        self.terms.values().sum()
    }

    /// Equality up to an overall factor of `-1`.
    pub fn eq_up_to_sign(&self, other: &Self) -> bool {
        self == other || *self == -other
    }

    /// Exact division. Returns `None` when `divisor` does not divide `self`
    /// in `Z[t, t^-1]` or when `divisor` is zero.
    pub fn checked_div(&self, divisor: &Self) -> Option<Self> {
        let (divisor_min, divisor_max) = (divisor.min_exponent()?, divisor.max_exponent()?);
        let lead = divisor.coefficient(divisor_max);
        let Some(floor) = self.min_exponent().map(|min| min - divisor_min) else {
            return Some(Self::zero());
        };

        let mut remainder = self.clone();
        let mut quotient = Self::zero();
        while let Some(top) = remainder.max_exponent() {
            let coeff = remainder.coefficient(top);
            let exponent = top - divisor_max;
            if coeff % lead != 0 || exponent < floor {
                return None;
            }
            let step = Self::monomial(coeff / lead, exponent);
            remainder = &remainder - &(&step * divisor);
            quotient = &quotient + &step;
        }
        Some(quotient)
    }
}

impl Add for &LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn add(self, rhs: &LaurentPolynomial) -> LaurentPolynomial {
        let mut out = self.clone();
        for (exp, coeff) in rhs.terms() {
            out.add_term(exp, coeff);
        }
        out
    }
}

impl Add for LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn add(self, rhs: LaurentPolynomial) -> LaurentPolynomial {
        &self + &rhs
    }
}

impl Neg for &LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn neg(self) -> LaurentPolynomial {
        LaurentPolynomial {
            terms: self.terms.iter().map(|(exp, coeff)| (*exp, -coeff)).collect(),
        }
    }
}

impl Neg for LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn neg(self) -> LaurentPolynomial {
        -&self
    }
}

impl Sub for &LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn sub(self, rhs: &LaurentPolynomial) -> LaurentPolynomial {
        let mut out = self.clone();
        for (exp, coeff) in rhs.terms() {
            out.add_term(exp, -coeff);
        }
        out
    }
}

impl Sub for LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn sub(self, rhs: LaurentPolynomial) -> LaurentPolynomial {
        &self - &rhs
    }
}

impl Mul for &LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn mul(self, rhs: &LaurentPolynomial) -> LaurentPolynomial {
        let mut out = LaurentPolynomial::zero();
        for (exp_a, coeff_a) in self.terms() {
            for (exp_b, coeff_b) in rhs.terms() {
                out.add_term(exp_a + exp_b, coeff_a * coeff_b);
            }
        }
        out
    }
}

impl Mul for LaurentPolynomial {
    type Output = LaurentPolynomial;

    fn mul(self, rhs: LaurentPolynomial) -> LaurentPolynomial {
        &self * &rhs
    }
}

impl From<i64> for LaurentPolynomial {
    fn from(value: i64) -> Self {
        Self::constant(value)
    }
}

impl Display for LaurentPolynomial {
    /// Renders terms in descending powers, e.g. `t^2 - t + 1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (idx, (exp, coeff)) in self.terms.iter().rev().enumerate() {
            let magnitude = coeff.unsigned_abs();
            match (idx, *coeff < 0) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            match (*exp, magnitude) {
                (0, m) => write!(f, "{m}")?,
                (1, 1) => write!(f, "t")?,
                (1, m) => write!(f, "{m}*t")?,
                (e, 1) => write!(f, "t^{e}")?,
                (e, m) => write!(f, "{m}*t^{e}")?,
            }
        }
        Ok(())
    }
}
