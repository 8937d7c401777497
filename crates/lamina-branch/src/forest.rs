//! Nested-region forest: turns branch specs into a partition of the circle.
//!
//! Each [`BranchSpec`] names a chord, the side of it that belongs to the
//! branch and the boundary points the branch claims. Specs nest: a spec
//! whose region lies inside another's becomes its descendant. Every node
//! then emits its own region minus its children's, so ancestors and
//! descendants never overlap. A degree-`b` map has `b` inverse branches; when
//! the specs describe fewer, the remainder of the circle is the last branch.
//!
//! The forest is an arena of nodes addressed by index. Insertion consumes the
//! forest and returns the updated one, so no node is ever shared between
//! two parents.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use lamina_core::chord::on_closed_arc;
use lamina_core::{Chord, CircularFraction};

use crate::region::BranchRegion;

/// Description of one explicitly specified inverse branch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSpec {
    /// Boundary chord of the branch.
    pub chord: Chord,
    /// Boundary points that belong to this branch.
    pub endpoints: Vec<CircularFraction>,
    /// Take the other side of the chord than the one it designates.
    #[serde(default)]
    pub flip: bool,
}

impl BranchSpec {
    pub fn new(chord: Chord, endpoints: impl IntoIterator<Item = CircularFraction>) -> Self {
        Self {
            chord,
            endpoints: endpoints.into_iter().collect(),
            flip: false,
        }
    }

    /// Same spec on the other side of its chord.
    pub fn flipped(self) -> Self {
        Self { flip: true, ..self }
    }

    /// Chord side plus identified endpoints.
    pub fn region(&self) -> BranchRegion {
        BranchRegion::simple_with_flip(self.chord.clone(), self.flip, self.endpoints.iter().cloned())
    }

    fn order(&self, other: &Self) -> Ordering {
        self.chord
            .lower()
            .cmp(other.chord.lower())
            .then_with(|| self.chord.upper().cmp(other.chord.upper()))
            .then_with(|| self.flip.cmp(&other.flip))
    }
}

/// `a` implies `b`.
pub fn implies(a: bool, b: bool) -> bool {
    !a || b
}

/// A spec together with the region built from it.
#[derive(Clone, Debug)]
pub struct BranchNode {
    pub spec: BranchSpec,
    pub region: BranchRegion,
}

impl BranchNode {
    pub fn new(spec: BranchSpec) -> Self {
        let region = spec.region();
        Self { spec, region }
    }

    /// Whether `other`'s region nests inside this one.
    ///
    /// Holds when
    /// - both of `other`'s chord endpoints lie on this node's closed side,
    /// - `other`'s side runs the same way round the circle as this one (two
    ///   opposite sides of one chord do not nest), and
    /// - every endpoint `other` claims is claimed here as well.
    pub fn contains(&self, other: &BranchNode) -> bool {
        let chord = &self.spec.chord;
        let flip = self.spec.flip;
        let inner = &other.spec.chord;

        if !inner.endpoints().into_iter().all(|p| chord.contains_loose(p, flip)) {
            return false;
        }

        let (start, _) = chord.designated_arc(flip);
        let (inner_start, inner_end) = inner.designated_arc(other.spec.flip);
        if !on_closed_arc(start, inner_end, inner_start) {
            return false;
        }

        inner
            .endpoints()
            .into_iter()
            .all(|p| implies(other.region.contains(p), self.region.contains(p)))
    }
}

#[derive(Clone, Debug)]
struct TreeNode {
    node: BranchNode,
    children: Vec<usize>,
}

/// Containment forest over branch specs.
#[derive(Clone, Debug, Default)]
pub struct BranchForest {
    nodes: Vec<TreeNode>,
    roots: Vec<usize>,
}

impl BranchForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forest holding every spec of `specs`.
    pub fn from_specs(specs: impl IntoIterator<Item = BranchSpec>) -> Self {
        specs.into_iter().fold(Self::new(), Self::insert)
    }

    /// Add one spec, descending into whichever existing node contains it and
    /// adopting every sibling it contains in turn.
    pub fn insert(mut self, spec: BranchSpec) -> Self {
        let id = self.nodes.len();
        self.nodes.push(TreeNode {
            node: BranchNode::new(spec),
            children: Vec::new(),
        });

        let roots = std::mem::take(&mut self.roots);
        self.roots = self.insert_among(roots, id);
        trace!(node = id, roots = self.roots.len(), "forest: inserted branch spec");
        self
    }

    fn insert_among(&mut self, siblings: Vec<usize>, id: usize) -> Vec<usize> {
        let host = siblings.iter().copied().find(|&s| self.node_contains(s, id));
        if let Some(host) = host {
            let children = std::mem::take(&mut self.nodes[host].children);
            self.nodes[host].children = self.insert_among(children, id);
            return siblings;
        }

        let (adopted, mut kept): (Vec<usize>, Vec<usize>) =
            siblings.into_iter().partition(|&s| self.node_contains(id, s));
        self.nodes[id].children.extend(adopted);
        kept.push(id);
        kept
    }

    fn node_contains(&self, outer: usize, inner: usize) -> bool {
        self.nodes[outer].node.contains(&self.nodes[inner].node)
    }

    /// Number of specs in the forest.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Specs that no other spec contains, in chord order.
    pub fn roots(&self) -> Vec<&BranchSpec> {
        self.sorted(&self.roots)
            .into_iter()
            .map(|id| &self.nodes[id].node.spec)
            .collect()
    }

    /// Nesting depth of the `index`-th inserted spec; roots are at depth 0.
    pub fn depth_of(&self, index: usize) -> Option<usize> {
        if index >= self.nodes.len() {
            return None;
        }
        let mut frontier: Vec<(usize, usize)> = self.roots.iter().map(|&r| (r, 0)).collect();
        while let Some((id, depth)) = frontier.pop() {
            if id == index {
                return Some(depth);
            }
            frontier.extend(self.nodes[id].children.iter().map(|&c| (c, depth + 1)));
        }
        None
    }

    fn sorted(&self, ids: &[usize]) -> Vec<usize> {
        let mut ids = ids.to_vec();
        ids.sort_by(|&a, &b| self.nodes[a].node.spec.order(&self.nodes[b].node.spec));
        ids
    }

    /// Pairwise disjoint regions, children before parents, trees in chord
    /// order. Each region excludes the territory of its children.
    pub fn regions(&self) -> Vec<BranchRegion> {
        let mut regions = Vec::with_capacity(self.nodes.len());
        for root in self.sorted(&self.roots) {
            self.emit_post_order(root, &mut regions);
        }
        regions
    }

    fn emit_post_order(&self, id: usize, regions: &mut Vec<BranchRegion>) {
        let children = self.sorted(&self.nodes[id].children);
        for &child in &children {
            self.emit_post_order(child, regions);
        }
        let carved: Vec<BranchRegion> = children
            .iter()
            .map(|&child| self.nodes[child].node.region.clone())
            .collect();
        regions.push(self.nodes[id].node.region.without(&carved));
    }
}

/// Disjoint regions for `specs`, one per spec.
pub fn build_branches(specs: impl IntoIterator<Item = BranchSpec>) -> Vec<BranchRegion> {
    BranchForest::from_specs(specs).regions()
}

/// Append the leftover branch when `regions` names fewer than `base`.
pub fn with_final_branch(base: u32, mut regions: Vec<BranchRegion>) -> Vec<BranchRegion> {
    let expected = base as usize;
    match regions.len().cmp(&expected) {
        Ordering::Less => {
            let rest = BranchRegion::complement(&regions);
            regions.push(rest);
        }
        Ordering::Equal => {}
        Ordering::Greater => {
            warn!(regions = regions.len(), base, "more branch regions than inverse branches");
        }
    }
    regions
}

/// Builds the complete branch list for a fixed degree.
#[derive(Debug, Clone, Copy)]
pub struct BranchBuilder {
    base: u32,
}

impl BranchBuilder {
    pub fn new(base: u32) -> Self {
        Self { base }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    /// [`build_branches`] followed by [`with_final_branch`].
    pub fn build(&self, specs: impl IntoIterator<Item = BranchSpec>) -> Vec<BranchRegion> {
        with_final_branch(self.base, build_branches(specs))
    }
}
