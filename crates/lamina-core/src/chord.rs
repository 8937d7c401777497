//! Chords of the circle and their region predicates.
//!
//! A chord splits the circle into an inner arc `(lower, upper)` and an outer
//! arc `(upper, 1) ∪ [0, lower)`. Which of the two a chord "contains" depends
//! on its width: the shorter arc is designated unless the caller flips it.
//! A diameter has two equal arcs and designates the inner one.

use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::fraction::CircularFraction;

/// Unordered pair of circle points, stored as `(lower, upper)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawChord")]
pub struct Chord {
    lower: CircularFraction,
    upper: CircularFraction,
}

#[derive(Deserialize)]
struct RawChord {
    lower: CircularFraction,
    upper: CircularFraction,
}

impl From<RawChord> for Chord {
    fn from(raw: RawChord) -> Self {
        Self::new(raw.lower, raw.upper)
    }
}

impl Chord {
    /// Chord through `a` and `b`, in either order.
    pub fn new(a: CircularFraction, b: CircularFraction) -> Self {
        if a > b {
            Self { lower: b, upper: a }
        } else {
            Self { lower: a, upper: b }
        }
    }

    pub fn lower(&self) -> &CircularFraction {
        &self.lower
    }

    pub fn upper(&self) -> &CircularFraction {
        &self.upper
    }

    /// Both endpoints, lower first.
    pub fn endpoints(&self) -> [&CircularFraction; 2] {
        [&self.lower, &self.upper]
    }

    /// `lower < point < upper`.
    pub fn in_inner_region(&self, point: &CircularFraction) -> bool {
        &self.lower < point && point < &self.upper
    }

    /// Inner region including both endpoints.
    pub fn in_inner_region_loose(&self, point: &CircularFraction) -> bool {
        self.in_inner_region(point) || self.on_boundary(point)
    }

    /// Strictly outside: neither inner nor an endpoint.
    pub fn in_outer_region(&self, point: &CircularFraction) -> bool {
        !self.in_inner_region_loose(point)
    }

    /// Outer region including both endpoints.
    pub fn in_outer_region_loose(&self, point: &CircularFraction) -> bool {
        !self.in_inner_region(point)
    }

    pub fn on_boundary(&self, point: &CircularFraction) -> bool {
        &self.lower == point || &self.upper == point
    }

    /// Exact length of the inner arc as an unreduced `(numerator, denominator)`.
    pub fn width(&self) -> (BigUint, BigUint) {
        let upper = self.upper.numerator() * self.lower.denominator();
        let lower = self.lower.numerator() * self.upper.denominator();
        let denominator = self.upper.denominator() * self.lower.denominator();
        // lower <= upper as points, so the difference cannot underflow.
        (upper - lower, denominator)
    }

    /// Inner arc strictly longer than half the circle.
    pub fn is_wide(&self) -> bool {
        let (num, den) = self.width();
        num * 2u32 > den
    }

    /// Both arcs have exactly the same length.
    pub fn is_diameter(&self) -> bool {
        let (num, den) = self.width();
        num * 2u32 == den
    }

    /// Whether the designated side is the outer arc.
    pub fn designates_outer(&self, flip: bool) -> bool {
        self.is_wide() ^ flip
    }

    /// Point lies strictly inside the designated side.
    pub fn contains(&self, point: &CircularFraction, flip: bool) -> bool {
        if self.designates_outer(flip) {
            self.in_outer_region(point)
        } else {
            self.in_inner_region(point)
        }
    }

    /// Point lies inside the designated side or on the chord.
    pub fn contains_loose(&self, point: &CircularFraction, flip: bool) -> bool {
        if self.designates_outer(flip) {
            self.in_outer_region_loose(point)
        } else {
            self.in_inner_region_loose(point)
        }
    }

    /// The designated side as `(start, end)`, walking the circle upwards
    /// from `start` and wrapping through `0` when `start > end`.
    pub fn designated_arc(&self, flip: bool) -> (&CircularFraction, &CircularFraction) {
        if self.designates_outer(flip) {
            (&self.upper, &self.lower)
        } else {
            (&self.lower, &self.upper)
        }
    }

    /// Endpoints interleave: one endpoint of `other` is strictly inside this
    /// chord's inner arc and the other strictly outside.
    pub fn intersects(&self, other: &Chord) -> bool {
        let splits = |first: &CircularFraction, second: &CircularFraction| {
            self.in_inner_region(first) && self.in_outer_region(second)
        };
        splits(&other.lower, &other.upper) || splits(&other.upper, &other.lower)
    }

    /// Chord through the forward images of both endpoints.
    pub fn map_forward(&self) -> Self {
        Self::new(self.lower.map_forward(), self.upper.map_forward())
    }
}

/// `point` lies on the closed arc walked upwards from `start` to `end`.
///
/// The arc wraps through `0` when `start > end`; `start == end` is the single
/// point.
pub fn on_closed_arc(start: &CircularFraction, end: &CircularFraction, point: &CircularFraction) -> bool {
    if start <= end {
        start <= point && point <= end
    } else {
        point >= start || point <= end
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(text: &str) -> CircularFraction {
        CircularFraction::parse_trusted(2, text)
    }

    struct Points {
        zero: CircularFraction,
        one_seventh: CircularFraction,
        three_fourteenths: CircularFraction,
        two_sevenths: CircularFraction,
        one_half: CircularFraction,
        eleven_fourteenths: CircularFraction,
        six_sevenths: CircularFraction,
    }

    fn points() -> Points {
        Points {
            zero: binary("_"),
            one_seventh: binary("_001"),
            three_fourteenths: binary("0_011"),
            two_sevenths: binary("_010"),
            one_half: binary("1_"),
            eleven_fourteenths: binary("1_100"),
            six_sevenths: binary("_110"),
        }
    }

    fn chord(a: &CircularFraction, b: &CircularFraction) -> Chord {
        Chord::new(a.clone(), b.clone())
    }

    #[test]
    fn endpoints_are_ordered() {
        let p = points();
        let c = chord(&p.six_sevenths, &p.one_seventh);
        assert_eq!(c.lower(), &p.one_seventh);
        assert_eq!(c.upper(), &p.six_sevenths);
        assert_eq!(c, chord(&p.one_seventh, &p.six_sevenths));
    }

    #[test]
    fn boundary() {
        let p = points();
        let c = chord(&p.one_seventh, &p.two_sevenths);
        assert!(!c.on_boundary(&p.three_fourteenths));
        assert!(c.on_boundary(&p.one_seventh));
        assert!(c.on_boundary(&p.two_sevenths));
    }

    #[test]
    fn intersection() {
        let p = points();
        let zero_two_sevenths = chord(&p.zero, &p.two_sevenths);
        let zero_one_half = chord(&p.zero, &p.one_half);
        let one_seventh_two_sevenths = chord(&p.one_seventh, &p.two_sevenths);
        let three_fourteenths_one_half = chord(&p.three_fourteenths, &p.one_half);
        let two_sevenths_six_sevenths = chord(&p.two_sevenths, &p.six_sevenths);

        assert!(!zero_two_sevenths.intersects(&one_seventh_two_sevenths));
        assert!(zero_two_sevenths.intersects(&three_fourteenths_one_half));
        assert!(one_seventh_two_sevenths.intersects(&three_fourteenths_one_half));
        assert!(three_fourteenths_one_half.intersects(&two_sevenths_six_sevenths));
        assert!(!zero_one_half.intersects(&zero_two_sevenths));
        assert!(!zero_one_half.intersects(&zero_one_half));
    }

    #[test]
    fn intersection_is_symmetric() {
        let p = points();
        let a = chord(&p.zero, &p.two_sevenths);
        let b = chord(&p.three_fourteenths, &p.one_half);
        assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn containment_uses_the_short_side() {
        let p = points();
        let zero_one_half = chord(&p.zero, &p.one_half);
        let two_sevenths_six_sevenths = chord(&p.two_sevenths, &p.six_sevenths);

        assert!(zero_one_half.contains(&p.two_sevenths, false));
        assert!(!two_sevenths_six_sevenths.contains(&p.one_half, false));
        assert!(two_sevenths_six_sevenths.contains(&p.zero, false));
    }

    #[test]
    fn flip_swaps_the_designated_side() {
        let p = points();
        let c = chord(&p.two_sevenths, &p.six_sevenths);
        assert!(c.contains(&p.one_half, true));
        assert!(!c.contains(&p.zero, true));
        // Endpoints are never strictly contained on either side.
        assert!(!c.contains(&p.two_sevenths, false));
        assert!(!c.contains(&p.two_sevenths, true));
        assert!(c.contains_loose(&p.two_sevenths, false));
        assert!(c.contains_loose(&p.six_sevenths, true));
    }

    #[test]
    fn diameters() {
        let p = points();
        assert!(chord(&p.zero, &p.one_half).is_diameter());
        assert!(chord(&p.two_sevenths, &p.eleven_fourteenths).is_diameter());
        assert!(!chord(&p.two_sevenths, &p.six_sevenths).is_diameter());
        assert!(!chord(&p.zero, &p.one_half).is_wide());
    }

    #[test]
    fn width_is_exact() {
        let p = points();
        let (num, den) = chord(&p.one_seventh, &p.six_sevenths).width();
        // 6/7 - 1/7 = 5/7
        assert_eq!(num * 7u32, den * 5u32);
    }

    #[test]
    fn designated_arc_wraps_for_wide_chords() {
        let p = points();
        let wide = chord(&p.one_seventh, &p.six_sevenths);
        assert_eq!(wide.designated_arc(false), (&p.six_sevenths, &p.one_seventh));
        assert_eq!(wide.designated_arc(true), (&p.one_seventh, &p.six_sevenths));
    }

    #[test]
    fn closed_arcs() {
        let p = points();
        assert!(on_closed_arc(&p.one_seventh, &p.one_half, &p.two_sevenths));
        assert!(on_closed_arc(&p.one_seventh, &p.one_half, &p.one_half));
        assert!(!on_closed_arc(&p.one_seventh, &p.one_half, &p.zero));
        assert!(on_closed_arc(&p.six_sevenths, &p.one_seventh, &p.zero));
        assert!(!on_closed_arc(&p.six_sevenths, &p.one_seventh, &p.one_half));
        assert!(on_closed_arc(&p.zero, &p.zero, &p.zero));
        assert!(!on_closed_arc(&p.zero, &p.zero, &p.one_half));
    }

    #[test]
    fn forward_map_reorders() {
        let p = points();
        // 1/7 -> 2/7 and 4/7 -> 1/7
        let c = chord(&p.one_seventh, &binary("_100"));
        let image = c.map_forward();
        assert_eq!(image, chord(&p.one_seventh, &p.two_sevenths));
    }

    #[test]
    fn display() {
        let p = points();
        assert_eq!(chord(&p.one_half, &p.one_seventh).to_string(), "_001, 1_");
    }
}
