//! Smolder: distributed steady-state heat relaxation over 2D grids.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Smolder sub-crates. For most users, adding `smolder` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use smolder::prelude::*;
//!
//! // A 6x6 grid: zero-conduction margin, conductive interior, one heat
//! // source in the middle.
//! let mut grid = Grid::new(6, 6).unwrap();
//! for r in 1..5 {
//!     for c in 1..5 {
//!         *grid.cell_mut(r, c) = Cell::new(0.0, 20.0, 0.8);
//!     }
//! }
//! grid.cell_mut(3, 3).heat = 255.0;
//!
//! let config = RunConfig {
//!     workers: Some(2),
//!     ..Default::default()
//! };
//! let outcome = solve_distributed(grid, &config).unwrap();
//! assert!(outcome.state.iterations > 0);
//! let report = RunReport::from_run(&outcome.grid, outcome.state);
//! assert!(report.max_temperature >= report.min_temperature);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`model`] | `smolder-core` | [`Cell`](model::Cell), [`Grid`](model::Grid), grid errors |
//! | [`solver`] | `smolder-solver` | Sweep kernel, partition planner, [`Partition`](solver::Partition) |
//! | [`engine`] | `smolder-engine` | Halo ring, all-reduce, run entry points, configuration |
//! | [`raster`] | `smolder-raster` | Image decode/encode and the color gradient |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Cell and grid types (`smolder-core`).
pub use smolder_core as model;

/// Sweep kernel and partitioning (`smolder-solver`).
///
/// [`checkerboard_sweep`](solver::checkerboard_sweep) is the update rule;
/// [`span_for`](solver::span_for) maps workers to row ranges.
pub use smolder_solver as solver;

/// Worker orchestration and run entry points (`smolder-engine`).
///
/// [`solve`](engine::solve) runs serially in place;
/// [`solve_distributed`](engine::solve_distributed) partitions the grid
/// across worker threads.
pub use smolder_engine as engine;

/// Raster decode/encode (`smolder-raster`).
///
/// [`decode`](raster::decode) maps pixels to cells,
/// [`encode`](raster::encode) renders temperatures through the gradient.
pub use smolder_raster as raster;

/// Common imports for typical Smolder usage.
///
/// ```rust
/// use smolder::prelude::*;
/// ```
pub mod prelude {
    pub use smolder_core::{Cell, Grid, GridError};
    pub use smolder_engine::{
        solve, solve_distributed, ConfigError, EngineError, Outcome, RunConfig, RunReport,
        RunState,
    };
    pub use smolder_raster::{decode, encode, RasterError};
    pub use smolder_solver::{span_for, Partition, RowSpan};
}
