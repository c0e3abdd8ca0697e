//! Relaxation kernel and row partitioning for the Smolder solver.
//!
//! Three pieces:
//!
//! - [`checkerboard_sweep`] / [`sweep_grid`] — the two-phase in-place
//!   relaxation sweep and its whole-grid convenience wrapper.
//! - [`span_for`] / [`RowSpan`] — the pure partition planner mapping a
//!   worker index to its owned row range.
//! - [`Partition`] — a worker's owned slice of the grid: its rows plus one
//!   ghost row above and one below.
//!
//! The distributed orchestration (halo ring, all-reduce, gather) lives in
//! `smolder-engine` and is built on these types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod partition;
mod plan;
mod sweep;

pub use partition::Partition;
pub use plan::{span_for, RowSpan};
pub use sweep::{checkerboard_sweep, sweep_grid};
