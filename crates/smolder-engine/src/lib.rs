//! Worker orchestration for the Smolder heat relaxation solver.
//!
//! Drives the sweep / halo-exchange / reduce cycle across a fixed group of
//! worker threads, each owning one row [`Partition`](smolder_solver::Partition)
//! of the grid. There is no shared mutable state: workers communicate only
//! through the halo ring, the all-reduce mesh, and the final gather, all
//! built on bounded crossbeam channels.
//!
//! Entry points: [`solve`] (serial, in place) and [`solve_distributed`]
//! (spawns workers, gathers on worker 0).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod gather;
mod halo;
mod reduce;
mod run;
mod state;
mod worker;

pub use config::{ConfigError, RunConfig};
pub use error::{EngineError, ExchangeError};
pub use halo::{halo_ring, HaloLinks};
pub use reduce::{reduce_mesh, Reducer};
pub use run::{solve, solve_distributed, Outcome};
pub use state::{RunReport, RunState};
