//! Lamination leaves: finite vertex sets on the circle.
//!
//! A polygon is kept sorted in circle order with duplicates removed, so two
//! polygons are equal exactly when they have the same vertices.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chord::Chord;
use crate::fraction::CircularFraction;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<CircularFraction>", into = "Vec<CircularFraction>")]
pub struct Polygon {
    points: Vec<CircularFraction>,
}

impl Polygon {
    /// Sort `points` and drop repeated vertices.
    pub fn new(mut points: Vec<CircularFraction>) -> Self {
        points.sort();
        points.dedup();
        Self { points }
    }

    /// Two-vertex polygon spanning `chord`.
    pub fn from_chord(chord: &Chord) -> Self {
        Self::new(vec![chord.lower().clone(), chord.upper().clone()])
    }

    pub fn points(&self) -> &[CircularFraction] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Image of every vertex under the digit shift, re-sorted.
    pub fn map_forward(&self) -> Self {
        Self::new(self.points.iter().map(CircularFraction::map_forward).collect())
    }

    /// Sides of the polygon: consecutive vertices, plus the closing side once
    /// there are at least three vertices.
    pub fn to_chords(&self) -> Vec<Chord> {
        let mut chords: Vec<Chord> = self
            .points
            .windows(2)
            .map(|pair| Chord::new(pair[0].clone(), pair[1].clone()))
            .collect();

        if let [first, .., last] = self.points.as_slice() {
            if self.points.len() > 2 {
                chords.push(Chord::new(first.clone(), last.clone()));
            }
        }
        chords
    }

    /// Vertices as reduced rationals: `"1/7, 2/7, 4/7"`.
    pub fn rational_string(&self) -> String {
        self.points
            .iter()
            .map(CircularFraction::rational_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<Vec<CircularFraction>> for Polygon {
    fn from(points: Vec<CircularFraction>) -> Self {
        Self::new(points)
    }
}

impl From<Polygon> for Vec<CircularFraction> {
    fn from(polygon: Polygon) -> Self {
        polygon.points
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{point}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(text: &str) -> CircularFraction {
        CircularFraction::parse_trusted(2, text)
    }

    fn triangle() -> Polygon {
        Polygon::new(vec![binary("_100"), binary("_001"), binary("_010")])
    }

    #[test]
    fn vertices_are_sorted() {
        assert_eq!(triangle().to_string(), "_001, _010, _100");
        assert_eq!(triangle().rational_string(), "1/7, 2/7, 4/7");
    }

    #[test]
    fn duplicates_collapse_across_representations() {
        let p = Polygon::new(vec![binary("1_"), binary("0_1"), binary("_01")]);
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn forward_map_of_periodic_triangle_is_itself() {
        assert_eq!(triangle().map_forward(), triangle());
    }

    #[test]
    fn chord_polygon_has_one_side() {
        let c = Chord::new(binary("_01"), binary("_10"));
        let p = Polygon::from_chord(&c);
        assert_eq!(p.to_chords(), vec![c]);
    }

    #[test]
    fn triangle_sides_close_up() {
        let sides = triangle().to_chords();
        assert_eq!(sides.len(), 3);
        assert_eq!(sides[2], Chord::new(binary("_001"), binary("_100")));
    }

    #[test]
    fn empty_polygon_has_no_sides() {
        let p = Polygon::new(Vec::new());
        assert!(p.is_empty());
        assert!(p.to_chords().is_empty());
    }

    #[test]
    fn serde_recanonicalises_order() {
        let json = serde_json::to_string(&triangle()).unwrap();
        let back: Polygon = serde_json::from_str(&json).unwrap();
        assert_eq!(back, triangle());
    }
}
