//! Scenario and property test suite for Lamina.
//!
//! Integration tests live in `tests/`: worked laminations checked generation
//! by generation, and randomized properties of the branch partition and the
//! pullback. Shared builders are in [`helpers`].

pub mod helpers;
