//! Pullback engine: pulls polygons back through the inverse branches.
//!
//! Every vertex of a polygon has `base` preimages under the digit shift. The
//! preimages of all vertices go into one pool, and each branch region in turn
//! takes the pooled points it contains. A point is taken by the first branch
//! that claims it, so overlapping region boundaries never duplicate a
//! vertex. Branches that take nothing produce no polygon.
//!
//! [`Lamination`] holds one generation plus the branch list and steps to
//! the next with [`Lamination::advance`]; [`Iterates`] drives it as an
//! endless iterator.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use lamina_branch::BranchRegion;
use lamina_core::{CircularFraction, Polygon};

/// A preimage together with the index of the vertex it came from.
type Tagged = (CircularFraction, usize);

/// Preimages of `polygon`, split into one polygon per branch that claims any.
pub fn pull_back(polygon: &Polygon, branches: &[BranchRegion]) -> Vec<Polygon> {
    let mut pool: Vec<Tagged> = polygon
        .points()
        .iter()
        .enumerate()
        .flat_map(|(vertex, point)| point.map_backward().into_iter().map(move |p| (p, vertex)))
        .collect();

    let mut pieces = Vec::new();
    for (index, branch) in branches.iter().enumerate() {
        let (claimed, rest): (Vec<Tagged>, Vec<Tagged>) =
            pool.into_iter().partition(|(point, _)| branch.contains(point));
        pool = rest;

        if claimed.is_empty() {
            trace!(branch = index, polygon = %polygon, "pullback: branch claims no preimage");
            continue;
        }
        pieces.push(Polygon::new(claimed.into_iter().map(|(point, _)| point).collect()));
    }

    if !pool.is_empty() {
        trace!(
            unclaimed = pool.len(),
            vertices = ?unclaimed_vertices(&pool),
            polygon = %polygon,
            "pullback: preimages outside every branch"
        );
    }
    pieces
}

/// Indices of the vertices whose preimages are still in `pool`, ascending.
fn unclaimed_vertices(pool: &[Tagged]) -> Vec<usize> {
    let mut vertices: Vec<usize> = pool.iter().map(|&(_, vertex)| vertex).collect();
    vertices.dedup();
    vertices
}

/// Pull back every polygon of `generation` and flatten the results.
pub fn pull_back_generation(generation: &[Polygon], branches: &[BranchRegion]) -> Vec<Polygon> {
    generation
        .iter()
        .flat_map(|polygon| pull_back(polygon, branches))
        .collect()
}

/// Forward images of `generation`, first occurrence kept.
pub fn map_forward(generation: &[Polygon]) -> Vec<Polygon> {
    let mut seen = HashSet::new();
    generation
        .iter()
        .map(Polygon::map_forward)
        .filter(|image| seen.insert(image.clone()))
        .collect()
}

/// Whether mapping `next` forward gives back exactly the polygons of
/// `previous`, in any order.
pub fn maps_onto(next: &[Polygon], previous: &[Polygon]) -> bool {
    let images: HashSet<Polygon> = map_forward(next).into_iter().collect();
    let expected: HashSet<&Polygon> = previous.iter().collect();
    images.len() == expected.len() && images.iter().all(|p| expected.contains(p))
}

/// One generation of a lamination together with the branches that produce
/// the next.
#[derive(Clone, Debug)]
pub struct Lamination {
    leaves: Vec<Polygon>,
    branches: Arc<[BranchRegion]>,
    generation: usize,
}

impl Lamination {
    /// Generation 0 holding `leaves`.
    pub fn new(leaves: Vec<Polygon>, branches: impl Into<Arc<[BranchRegion]>>) -> Self {
        Self {
            leaves,
            branches: branches.into(),
            generation: 0,
        }
    }

    pub fn leaves(&self) -> &[Polygon] {
        &self.leaves
    }

    pub fn branches(&self) -> &[BranchRegion] {
        &self.branches
    }

    /// Number of pullback steps taken from the initial leaves.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The next generation. `self` is left untouched.
    pub fn advance(&self) -> Self {
        let leaves = pull_back_generation(&self.leaves, &self.branches);
        let generation = self.generation + 1;
        debug!(generation, polygons = leaves.len(), "lamination: advanced generation");
        Self {
            leaves,
            branches: Arc::clone(&self.branches),
            generation,
        }
    }

    /// Endless iterator of generations starting with this one.
    pub fn iter(&self) -> Iterates {
        Iterates {
            state: self.clone(),
            started: false,
        }
    }
}

/// Generations of a lamination, beginning with the initial leaves.
///
/// Never returns `None`; take as many generations as needed.
#[derive(Clone, Debug)]
pub struct Iterates {
    state: Lamination,
    started: bool,
}

impl Iterator for Iterates {
    type Item = Vec<Polygon>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            self.state = self.state.advance();
        }
        self.started = true;
        Some(self.state.leaves.clone())
    }
}

/// Iterate the lamination generated by `leaves` under `branches`.
pub fn iterates(leaves: Vec<Polygon>, branches: Vec<BranchRegion>) -> Iterates {
    Lamination::new(leaves, branches).iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamina_branch::{BranchBuilder, BranchSpec};
    use lamina_core::Chord;

    fn binary(text: &str) -> CircularFraction {
        CircularFraction::parse_trusted(2, text)
    }

    fn polygon(texts: &[&str]) -> Polygon {
        Polygon::new(texts.iter().map(|t| binary(t)).collect())
    }

    fn rabbit_branches() -> Vec<BranchRegion> {
        let lower = binary("_001");
        let chord = Chord::new(lower.clone(), binary("1_010"));
        BranchBuilder::new(2).build([BranchSpec::new(chord, [lower])])
    }

    fn triangle() -> Polygon {
        polygon(&["_001", "_010", "_100"])
    }

    // --- pull_back ---

    #[test]
    fn rabbit_triangle_splits_in_two() {
        let pieces = pull_back(&triangle(), &rabbit_branches());
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0], triangle());
        assert_eq!(pieces[1].rational_string(), "1/14, 9/14, 11/14");
    }

    #[test]
    fn first_branch_wins_on_overlap() {
        let everything = BranchRegion::all(Vec::new());
        let pieces = pull_back(&triangle(), &[everything.clone(), everything]);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].len(), 6);
    }

    #[test]
    fn empty_branches_are_dropped() {
        let nothing = BranchRegion::any(Vec::new());
        let everything = BranchRegion::all(Vec::new());
        let pieces = pull_back(&triangle(), &[nothing.clone(), everything, nothing]);
        assert_eq!(pieces.len(), 1);
    }

    #[test]
    fn no_branches_no_pieces() {
        assert!(pull_back(&triangle(), &[]).is_empty());
    }

    #[test]
    fn preimages_are_partitioned() {
        let pieces = pull_back(&triangle(), &rabbit_branches());
        let total: usize = pieces.iter().map(Polygon::len).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn unclaimed_preimages_name_their_vertices() {
        // Only the inner side of the critical diameter, without its endpoint.
        let lower = binary("_001");
        let inner = BranchRegion::chord(Chord::new(lower, binary("1_010")), false);
        let square = polygon(&["_0001", "_0010", "_0100", "_1000"]);

        let mut pool: Vec<Tagged> = square
            .points()
            .iter()
            .enumerate()
            .flat_map(|(vertex, point)| point.map_backward().into_iter().map(move |p| (p, vertex)))
            .collect();
        pool.retain(|(point, _)| !inner.contains(point));

        // Every vertex has one preimage on each side of a diameter.
        assert_eq!(unclaimed_vertices(&pool), vec![0, 1, 2, 3]);
        let pieces = pull_back(&square, &[inner]);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].len(), 4);
    }

    #[test]
    fn unclaimed_vertices_collapse_repeats() {
        let pool: Vec<Tagged> = vec![(binary("_01"), 0), (binary("1_01"), 0), (binary("_10"), 2)];
        assert_eq!(unclaimed_vertices(&pool), vec![0, 2]);
    }

    // --- map_forward ---

    #[test]
    fn forward_map_deduplicates() {
        let generation = pull_back(&triangle(), &rabbit_branches());
        assert_eq!(map_forward(&generation), vec![triangle()]);
        assert!(maps_onto(&generation, &[triangle()]));
    }

    #[test]
    fn maps_onto_rejects_missing_polygons() {
        let generation = pull_back(&triangle(), &rabbit_branches());
        let extra = polygon(&["_01", "_10"]);
        assert!(!maps_onto(&generation, &[triangle(), extra]));
        assert!(!maps_onto(&[], &[triangle()]));
    }

    // --- Lamination / iterates ---

    #[test]
    fn iterates_yields_initial_leaves_first() {
        let mut gens = iterates(vec![triangle()], rabbit_branches());
        assert_eq!(gens.next(), Some(vec![triangle()]));
        assert_eq!(gens.next().map(|g| g.len()), Some(2));
        assert_eq!(gens.next().map(|g| g.len()), Some(4));
    }

    #[test]
    fn advance_leaves_state_untouched() {
        let start = Lamination::new(vec![triangle()], rabbit_branches());
        let next = start.advance();
        assert_eq!(start.generation(), 0);
        assert_eq!(start.leaves(), &[triangle()]);
        assert_eq!(next.generation(), 1);
        assert_eq!(next.branches().len(), 2);
    }

    #[test]
    fn recreated_iterators_restart() {
        let start = Lamination::new(vec![triangle()], rabbit_branches());
        let first: Vec<_> = start.iter().take(3).collect();
        let again: Vec<_> = start.iter().take(3).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn every_generation_maps_onto_its_parent() {
        let gens: Vec<_> = iterates(vec![triangle()], rabbit_branches()).take(5).collect();
        for pair in gens.windows(2) {
            assert!(maps_onto(&pair[1], &pair[0]));
        }
    }
}
