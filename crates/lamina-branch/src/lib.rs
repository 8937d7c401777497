//! # lamina-branch: Inverse-branch regions for the digit-shift map.
//!
//! The degree-`b` map has `b` inverse branches. Each one is picked out by a
//! region of the circle, and the regions must partition it exactly.
//!
//! - [`region::BranchRegion`]: point, chord-side and boolean-combinator
//!   predicates.
//! - [`forest::BranchForest`]: nests branch specs by containment and emits
//!   disjoint regions.
//! - [`forest::BranchBuilder`]: forest plus the leftover branch.

pub mod forest;
pub mod region;

pub use forest::{BranchBuilder, BranchForest, BranchNode, BranchSpec, build_branches, implies, with_final_branch};
pub use region::{BranchRegion, Predicate};
