//! Reusable grid fixtures for Smolder tests.
//!
//! Builders for the grid shapes the integration tests keep reaching for:
//! a zero-conduction margin around a uniform interior, an already-settled
//! grid, and a grid with a single heat source.

mod fixtures;

pub use fixtures::{bordered_grid, settled_grid, source_grid, wide_margin_grid};
