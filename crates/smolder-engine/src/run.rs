//! Solver entry points: serial in-place and distributed across workers.

use std::thread;

use smolder_core::Grid;
use smolder_solver::{span_for, sweep_grid, Partition};

use crate::config::{ConfigError, RunConfig};
use crate::error::{EngineError, ExchangeError};
use crate::gather::gather_links;
use crate::halo::halo_ring;
use crate::reduce::reduce_mesh;
use crate::state::RunState;
use crate::worker::iterate;

/// Result of a distributed run: the gathered grid and the final state.
#[derive(Clone, Debug)]
pub struct Outcome {
    /// The full grid with every worker's rows written back. Margin rows
    /// keep their input values; only owned interior rows are gathered.
    pub grid: Grid,
    /// Final iteration count and convergence metric.
    pub state: RunState,
}

/// Run the relaxation serially, sweeping the grid in place until the
/// metric drops to `config.threshold` or `config.max_iterations` is hit.
///
/// # Errors
///
/// Returns [`ConfigError`] if the configuration fails validation. The
/// iteration itself cannot fail.
pub fn solve(grid: &mut Grid, config: &RunConfig) -> Result<RunState, ConfigError> {
    config.validate()?;
    let cell_count = grid.len();
    let mut state = RunState::initial(config.threshold);

    while state.continues(config.max_iterations, config.threshold) {
        let delta = sweep_grid(grid, config.noise);
        state = state.advance(delta / cell_count as f32);
    }

    Ok(state)
}

/// Run the relaxation across `config.resolved_workers()` worker threads.
///
/// The grid is split into row partitions; each partition moves into its
/// own thread along with its halo, reduce, and gather endpoints. Worker 0
/// runs on the calling thread and collects the final grid. All workers
/// execute the same number of iterations because termination is evaluated
/// on the globally reduced metric.
///
/// The grid's outermost ring should have zero conduction (see
/// [`Grid::has_zero_margin`]): the halo ring wraps the top and bottom
/// edges around to each other, and only an inert margin keeps that
/// wrapped data out of the results.
///
/// # Errors
///
/// - [`EngineError::Config`] if the configuration fails validation.
/// - [`EngineError::GridTooSmall`] if `height < 3` (no interior rows).
/// - [`EngineError::Exchange`] if a peer worker exited early.
/// - [`EngineError::WorkerPanicked`] if a worker thread panicked.
pub fn solve_distributed(grid: Grid, config: &RunConfig) -> Result<Outcome, EngineError> {
    config.validate()?;
    let height = grid.height();
    if height < 3 {
        return Err(EngineError::GridTooSmall { height });
    }

    let workers = config.resolved_workers();
    let cell_count = grid.len();

    let mut halos = halo_ring(workers);
    let mut reducers = reduce_mesh(workers);
    let mut gathers = gather_links(workers);

    // Workers 1..n get spawned threads; worker 0 stays on this thread and
    // keeps the grid for the gather.
    let mut handles = Vec::with_capacity(workers - 1);
    for r in (1..workers).rev() {
        let mut partition = Partition::from_grid(&grid, span_for(r, workers, height));
        let halo = halos.pop().expect("one halo endpoint per worker");
        let reducer = reducers.pop().expect("one reducer per worker");
        let gather = gathers.pop().expect("one gather role per worker");
        let config = *config;

        let handle = thread::Builder::new()
            .name(format!("smolder-worker-{r}"))
            .spawn(move || -> Result<(), ExchangeError> {
                iterate(&mut partition, &halo, &reducer, cell_count, &config)?;
                gather.send(&partition)
            })
            .map_err(|_| EngineError::ThreadSpawnFailed)?;
        handles.push(handle);
    }

    let halo0 = halos.pop().expect("worker 0 halo endpoint");
    let reducer0 = reducers.pop().expect("worker 0 reducer");
    let collector = gathers.pop().expect("worker 0 gather role");
    let mut grid = grid;
    let mut partition0 = Partition::from_grid(&grid, span_for(0, workers, height));

    let local: Result<RunState, ExchangeError> = (|| {
        let state = iterate(&mut partition0, &halo0, &reducer0, cell_count, config)?;
        collector.collect(&mut grid, &partition0, workers)?;
        Ok(state)
    })();

    // Close worker 0's endpoints before joining: a peer blocked on worker
    // 0 must see a disconnect rather than wait forever if this side bailed
    // out early. Peers that are merely behind still drain the buffered
    // messages worker 0 already sent.
    drop(halo0);
    drop(reducer0);

    // Join everyone before reporting, so a failure can't leave detached
    // workers blocked on half a ring.
    let mut first_err: Option<EngineError> = local.as_ref().err().map(|e| e.clone().into());
    for handle in handles {
        match handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                first_err.get_or_insert(e.into());
            }
            Err(_) => {
                first_err.get_or_insert(EngineError::WorkerPanicked);
            }
        }
    }
    if let Some(e) = first_err {
        return Err(e);
    }

    Ok(Outcome {
        grid,
        state: local.expect("error case returned above"),
    })
}
