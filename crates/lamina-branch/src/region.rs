//! Branch regions: composable membership predicates over circle points.
//!
//! A region is a small expression tree of point tests, chord sides and the
//! boolean combinators. Subtrees are reference counted, so carving children
//! out of a parent or taking the complement of many regions never copies
//! the regions involved.

use std::ops::Not;
use std::sync::Arc;

use lamina_core::{Chord, CircularFraction};

/// Membership test at one node of a region expression.
#[derive(Debug)]
pub enum Predicate {
    /// Exactly one point.
    Point(CircularFraction),
    /// Strictly inside the designated side of a chord.
    Chord {
        chord: Chord,
        /// [`Chord::designates_outer`] for the flip the region was built with.
        outer: bool,
    },
    Or(Vec<BranchRegion>),
    And(Vec<BranchRegion>),
    Not(BranchRegion),
}

/// A set of circle points described by a [`Predicate`] expression.
#[derive(Clone, Debug)]
pub struct BranchRegion {
    predicate: Arc<Predicate>,
}

impl BranchRegion {
    fn unit(predicate: Predicate) -> Self {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// The single point `p`.
    pub fn point(p: CircularFraction) -> Self {
        Self::unit(Predicate::Point(p))
    }

    /// Points strictly inside the designated side of `chord`
    /// (see [`Chord::contains`]).
    pub fn chord(chord: Chord, flip: bool) -> Self {
        let outer = chord.designates_outer(flip);
        Self::unit(Predicate::Chord { chord, outer })
    }

    /// Union. The empty union contains nothing.
    pub fn any(regions: impl IntoIterator<Item = BranchRegion>) -> Self {
        Self::unit(Predicate::Or(regions.into_iter().collect()))
    }

    /// Intersection. The empty intersection contains everything.
    pub fn all(regions: impl IntoIterator<Item = BranchRegion>) -> Self {
        Self::unit(Predicate::And(regions.into_iter().collect()))
    }

    /// Points in none of `regions`.
    pub fn none(regions: impl IntoIterator<Item = BranchRegion>) -> Self {
        !Self::any(regions)
    }

    /// Designated side of `chord` plus the identified boundary `points`.
    ///
    /// Naming one endpoint lets neighbouring branches share a chord without
    /// overlapping or leaving a gap at that endpoint.
    pub fn simple(chord: Chord, points: impl IntoIterator<Item = CircularFraction>) -> Self {
        Self::simple_with_flip(chord, false, points)
    }

    /// [`simple`](Self::simple) on the other side of the chord.
    pub fn simple_flipped(chord: Chord, points: impl IntoIterator<Item = CircularFraction>) -> Self {
        Self::simple_with_flip(chord, true, points)
    }

    pub fn simple_with_flip(
        chord: Chord,
        flip: bool,
        points: impl IntoIterator<Item = CircularFraction>,
    ) -> Self {
        Self::any(std::iter::once(Self::chord(chord, flip)).chain(points.into_iter().map(Self::point)))
    }

    /// Everything outside all of `regions`. Used for the leftover branch.
    pub fn complement(regions: &[BranchRegion]) -> Self {
        Self::none(regions.iter().cloned())
    }

    /// This region with every one of `regions` carved out.
    pub fn without(&self, regions: &[BranchRegion]) -> Self {
        Self::all([self.clone(), Self::complement(regions)])
    }

    pub fn contains(&self, point: &CircularFraction) -> bool {
        match self.predicate.as_ref() {
            Predicate::Point(p) => p == point,
            Predicate::Chord { chord, outer } => {
                if *outer {
                    chord.in_outer_region(point)
                } else {
                    chord.in_inner_region(point)
                }
            }
            Predicate::Or(regions) => regions.iter().any(|r| r.contains(point)),
            Predicate::And(regions) => regions.iter().all(|r| r.contains(point)),
            Predicate::Not(region) => !region.contains(point),
        }
    }

    /// Both endpoints of `chord` are in the region.
    pub fn contains_chord(&self, chord: &Chord) -> bool {
        chord.endpoints().into_iter().all(|p| self.contains(p))
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

impl Not for BranchRegion {
    type Output = BranchRegion;

    fn not(self) -> Self::Output {
        Self::unit(Predicate::Not(self))
    }
}

impl Not for &BranchRegion {
    type Output = BranchRegion;

    fn not(self) -> Self::Output {
        !self.clone()
    }
}
