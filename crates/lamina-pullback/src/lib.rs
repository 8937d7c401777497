//! # lamina-pullback: Lamination generations under the digit-shift map.
//!
//! - [`engine`]: pullback of polygons through branch regions, the forward
//!   map on generations and the generation iterator.
//! - [`config`]: lamination descriptions loaded from disk or the environment.

pub mod config;
pub mod engine;

pub use config::{BranchEntry, LaminationConfig, LaminationSetup};
pub use engine::{Iterates, Lamination, iterates, map_forward, maps_onto, pull_back, pull_back_generation};
