//! Points of the circle as base-`b` fractions with an exact prefix and a
//! repeating cycle.
//!
//! `CircularFraction::new(3, vec![1], vec![])` is one third in ternary and
//! `CircularFraction::new(2, vec![1], vec![1, 0, 1])` is `0.1(101)` in binary,
//! i.e. six sevenths. Every value is canonicalised on construction, so two
//! fractions in the same base are equal exactly when their digit parts are.
//! Across bases equality and ordering fall back to exact rational arithmetic.
//!
//! Numerator, denominator and the reduced rational are computed once at
//! construction and never change.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use crate::constants::{DIGIT_DELIMITER, MIN_BASE, REPEAT_MARKER, uses_digit_delimiter};
use crate::digits::{
    increment_digits, rotate_left, simplify, strip_trailing_zeros, value_of_digits,
};
use crate::error::{DigitProblem, FractionError, ParseError};

/// A canonical point on the half-open circle `[0, 1)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawFraction", into = "RawFraction")]
pub struct CircularFraction {
    base: u32,
    exact: Vec<u32>,
    repeating: Vec<u32>,
    numerator: BigUint,
    denominator: BigUint,
    reduced: (BigUint, BigUint),
}

/// Wire form of a fraction. Always re-canonicalised when read back.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawFraction {
    base: u32,
    exact: Vec<u32>,
    repeating: Vec<u32>,
}

impl TryFrom<RawFraction> for CircularFraction {
    type Error = FractionError;

    fn try_from(raw: RawFraction) -> Result<Self, Self::Error> {
        Self::new(raw.base, raw.exact, raw.repeating)
    }
}

impl From<CircularFraction> for RawFraction {
    fn from(fraction: CircularFraction) -> Self {
        Self {
            base: fraction.base,
            exact: fraction.exact,
            repeating: fraction.repeating,
        }
    }
}

impl CircularFraction {
    /// Build the canonical fraction for `0.exact(repeating)` in `base`.
    ///
    /// Fails with [`FractionError::InvalidBase`] for `base < 2` and with
    /// [`FractionError::InvalidDigit`] for the first digit outside `[0, base)`.
    pub fn new(base: u32, exact: Vec<u32>, repeating: Vec<u32>) -> Result<Self, FractionError> {
        check_base(base)?;
        if let Some(&digit) = exact.iter().chain(&repeating).find(|&&d| d >= base) {
            return Err(FractionError::InvalidDigit { digit, base });
        }
        Ok(Self::canonical(base, &exact, &repeating))
    }

    /// Slice-taking convenience over [`CircularFraction::new`].
    pub fn from_digits(base: u32, exact: &[u32], repeating: &[u32]) -> Result<Self, FractionError> {
        Self::new(base, exact.to_vec(), repeating.to_vec())
    }

    /// The point `0` in `base`.
    pub fn zero(base: u32) -> Result<Self, FractionError> {
        Self::new(base, Vec::new(), Vec::new())
    }

    /// Parse `<exact>_<repeating>` text.
    ///
    /// Digits are single characters below base 10 and `,`-separated from
    /// base 10 upwards. A missing `_` means the expansion terminates.
    /// All problems in the text are collected into one [`ParseError`].
    ///
    /// ```
    /// use lamina_core::fraction::CircularFraction;
    /// let third = CircularFraction::parse(3, "1_").unwrap();
    /// let also_third = CircularFraction::parse(10, "_3").unwrap();
    /// assert_eq!(third, also_third);
    /// assert!(CircularFraction::parse(12, "11,x,,2").is_err());
    /// ```
    pub fn parse(base: u32, text: &str) -> Result<Self, FractionError> {
        check_base(base)?;

        let mut problems = Vec::new();
        let mut sections = text.split(REPEAT_MARKER);
        let exact_text = sections.next().unwrap_or_default();
        let repeating_text = sections.next().unwrap_or_default();
        if sections.next().is_some() {
            problems.push(DigitProblem::ExtraRepeatMarker);
        }

        let exact = read_digits(base, exact_text, &mut problems);
        let repeating = read_digits(base, repeating_text, &mut problems);

        if !problems.is_empty() {
            return Err(ParseError {
                text: text.to_string(),
                problems,
            }
            .into());
        }
        Ok(Self::canonical(base, &exact, &repeating))
    }

    /// Parse text that is known to be well formed.
    ///
    /// # Panics
    ///
    /// Panics with the collected parse problems if `text` is not a valid
    /// fraction in `base`.
    pub fn parse_trusted(base: u32, text: &str) -> Self {
        match Self::parse(base, text) {
            Ok(fraction) => fraction,
            Err(err) => panic!("trusted fraction text failed to parse: {err}"),
        }
    }

    /// Canonicalise digits already known to be valid for `base`.
    fn canonical(base: u32, exact: &[u32], repeating: &[u32]) -> Self {
        let (mut exact, mut repeating) = simplify(exact, repeating);

        if repeating == [base - 1] {
            repeating.clear();
            exact = increment_digits(base, &exact);
        }
        if repeating == [0] {
            repeating.clear();
        }
        if repeating.is_empty() {
            strip_trailing_zeros(&mut exact);
        }

        let cycle = repeating_factor(base, repeating.len());
        let numerator = &cycle * value_of_digits(base, &exact) + value_of_digits(base, &repeating);
        let denominator = cycle * BigUint::from(base).pow(exact.len() as u32);
        let divisor = gcd(&numerator, &denominator);
        let reduced = (&numerator / &divisor, &denominator / &divisor);

        Self {
            base,
            exact,
            repeating,
            numerator,
            denominator,
            reduced,
        }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn exact_part(&self) -> &[u32] {
        &self.exact
    }

    pub fn repeating_part(&self) -> &[u32] {
        &self.repeating
    }

    pub fn exact_len(&self) -> usize {
        self.exact.len()
    }

    pub fn repeating_len(&self) -> usize {
        self.repeating.len()
    }

    /// Total number of stored digits.
    pub fn len(&self) -> usize {
        self.exact.len() + self.repeating.len()
    }

    /// True for the canonical zero, which stores no digits at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Digit at `index` places after the radix point (0-based).
    ///
    /// ```
    /// use lamina_core::fraction::CircularFraction;
    /// let f = CircularFraction::parse(3, "10_102").unwrap();
    /// assert_eq!(f.digit_at(2), 1);
    /// assert_eq!(f.digit_at(19), 2);
    /// ```
    pub fn digit_at(&self, index: usize) -> u32 {
        if index < self.exact.len() {
            return self.exact[index];
        }
        if self.repeating.is_empty() {
            return 0;
        }
        self.repeating[(index - self.exact.len()) % self.repeating.len()]
    }

    /// Unreduced numerator: `(b^r - 1) * value(exact) + value(repeating)`.
    pub fn numerator(&self) -> &BigUint {
        &self.numerator
    }

    /// Unreduced denominator: `(b^r - 1) * b^e`, with `b^0 - 1` read as `1`.
    pub fn denominator(&self) -> &BigUint {
        &self.denominator
    }

    /// The value as a fully reduced `(numerator, denominator)` pair.
    pub fn to_rational(&self) -> (&BigUint, &BigUint) {
        (&self.reduced.0, &self.reduced.1)
    }

    /// `"p/q"` with `p/q` fully reduced.
    pub fn rational_string(&self) -> String {
        format!("{}/{}", self.reduced.0, self.reduced.1)
    }

    /// Approximate value for display. Never use this for comparisons.
    pub fn to_f64(&self) -> f64 {
        let num = self.reduced.0.to_f64().unwrap_or(f64::NAN);
        let den = self.reduced.1.to_f64().unwrap_or(f64::NAN);
        num / den
    }

    /// One step of the digit shift `x -> b*x mod 1`.
    ///
    /// Drops the leading exact digit, or rotates the cycle when there is no
    /// exact digit left.
    pub fn map_forward(&self) -> Self {
        let (exact, shift) = match self.exact.split_first() {
            Some((_, rest)) => (rest, 0),
            None => (&self.exact[..], 1),
        };
        Self::canonical(self.base, exact, &rotate_left(&self.repeating, shift))
    }

    /// All `base` preimages under [`map_forward`](Self::map_forward), one per
    /// leading digit `0..base`.
    pub fn map_backward(&self) -> Vec<Self> {
        (0..self.base)
            .map(|digit| {
                let mut exact = Vec::with_capacity(self.exact.len() + 1);
                exact.push(digit);
                exact.extend_from_slice(&self.exact);
                Self::canonical(self.base, &exact, &self.repeating)
            })
            .collect()
    }

    fn cross_cmp(&self, other: &Self) -> Ordering {
        let (a_num, a_den) = self.to_rational();
        let (b_num, b_den) = other.to_rational();
        (a_num * b_den).cmp(&(b_num * a_den))
    }
}

fn check_base(base: u32) -> Result<(), FractionError> {
    if base < MIN_BASE {
        return Err(FractionError::InvalidBase { base });
    }
    Ok(())
}

/// `b^len - 1`, or `1` for an empty cycle.
fn repeating_factor(base: u32, len: usize) -> BigUint {
    if len == 0 {
        return BigUint::one();
    }
    BigUint::from(base).pow(len as u32) - 1u32
}

fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let (mut a, mut b) = (a.clone(), b.clone());
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

fn read_digits(base: u32, text: &str, problems: &mut Vec<DigitProblem>) -> Vec<u32> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let tokens: Vec<&str> = if uses_digit_delimiter(base) {
        text.split(DIGIT_DELIMITER).map(str::trim).collect()
    } else {
        text.char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect()
    };

    let mut digits = Vec::with_capacity(tokens.len());
    for token in tokens {
        if token.is_empty() {
            problems.push(DigitProblem::Empty);
            continue;
        }
        if !token.bytes().all(|b| b.is_ascii_digit()) {
            problems.push(DigitProblem::NotAnInteger(token.to_string()));
            continue;
        }
        match token.parse::<u32>() {
            Ok(digit) if digit < base => digits.push(digit),
            Ok(digit) => problems.push(DigitProblem::OutOfRange { digit, base }),
            Err(_) => problems.push(DigitProblem::NotAnInteger(token.to_string())),
        }
    }
    digits
}

impl PartialEq for CircularFraction {
    fn eq(&self, other: &Self) -> bool {
        if self.base != other.base {
            return self.reduced == other.reduced;
        }
        self.exact == other.exact && self.repeating == other.repeating
    }
}

impl Eq for CircularFraction {}

impl Hash for CircularFraction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with cross-base equality.
        self.reduced.hash(state);
    }
}

impl Ord for CircularFraction {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.base != other.base {
            return self.cross_cmp(other);
        }

        // Both expansions are eventually periodic within this bound.
        let bound = 2 * self.len().max(other.len());
        for index in 0..bound {
            match self.digit_at(index).cmp(&other.digit_at(index)) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for CircularFraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CircularFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joiner = if uses_digit_delimiter(self.base) {
            DIGIT_DELIMITER.to_string()
        } else {
            String::new()
        };
        let join = |digits: &[u32]| {
            digits
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(&joiner)
        };
        write!(f, "{}{}{}", join(&self.exact), REPEAT_MARKER, join(&self.repeating))
    }
}
