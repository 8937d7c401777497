//! # lamina-core: Circle points, chords and polygons.
//!
//! All arithmetic is exact: points are eventually periodic base-`b`
//! expansions backed by big-integer rationals, never floating point.
//!
//! - [`fraction::CircularFraction`]: canonical point of `[0, 1)` with the
//!   digit-shift map and its `b` inverse branches.
//! - [`chord::Chord`]: pair of points with inner/outer region predicates.
//! - [`polygon::Polygon`]: sorted, duplicate-free vertex set (a leaf).
//! - [`digits`]: minimal-period and split-point algorithms used for
//!   canonicalisation.

pub mod chord;
pub mod constants;
pub mod digits;
pub mod error;
pub mod fraction;
pub mod polygon;

pub use chord::Chord;
pub use error::{FractionError, LaminaError, ParseError};
pub use fraction::CircularFraction;
pub use polygon::Polygon;
