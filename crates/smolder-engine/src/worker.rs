//! The per-worker iteration loop.

use smolder_solver::Partition;

use crate::config::RunConfig;
use crate::error::ExchangeError;
use crate::halo::HaloLinks;
use crate::reduce::Reducer;
use crate::state::RunState;

/// Drive the sweep / exchange / reduce cycle for one worker until the
/// group-wide termination condition holds.
///
/// Each iteration: sweep the owned rows, post both halo sends, run the
/// blocking all-reduce, then complete the halo receives so the next sweep
/// reads fresh ghosts. The termination condition is evaluated on the
/// globally reduced metric, so every worker executes the same number of
/// iterations; converging and hitting the cap look identical to callers,
/// which see only the final [`RunState`].
///
/// `cell_count` is the full grid's `width * height`; the reduced delta sum
/// is normalized by it to a mean absolute change per cell.
pub(crate) fn iterate(
    partition: &mut Partition,
    halo: &HaloLinks,
    reducer: &Reducer,
    cell_count: usize,
    config: &RunConfig,
) -> Result<RunState, ExchangeError> {
    let mut state = RunState::initial(config.threshold);

    while state.continues(config.max_iterations, config.threshold) {
        let local_delta = partition.sweep(config.noise);
        halo.begin_exchange(partition)?;
        let global_delta = reducer.all_reduce(local_delta)?;
        halo.complete_exchange(partition)?;
        state = state.advance(global_delta / cell_count as f32);
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::halo::halo_ring;
    use crate::reduce::reduce_mesh;
    use smolder_solver::span_for;
    use smolder_test_utils::settled_grid;
    use std::thread;

    #[test]
    fn zero_iteration_cap_touches_nothing() {
        let grid = settled_grid(5, 5, 10.0, 0.5);
        let mut part = Partition::from_grid(&grid, span_for(0, 1, 5));
        let before = part.clone();
        let halo = halo_ring(1);
        let reducers = reduce_mesh(1);
        let config = RunConfig {
            max_iterations: 0,
            ..Default::default()
        };

        let state = iterate(&mut part, &halo[0], &reducers[0], grid.len(), &config).unwrap();
        assert_eq!(state, RunState::initial(config.threshold));
        assert_eq!(part, before);
    }

    #[test]
    fn settled_grid_converges_in_one_iteration_across_workers() {
        let grid = settled_grid(6, 8, 12.0, 0.7);
        let config = RunConfig {
            noise: 0.0,
            ..Default::default()
        };
        let workers = 3;

        let halos = halo_ring(workers);
        let reducers = reduce_mesh(workers);
        let cell_count = grid.len();

        let handles: Vec<_> = halos
            .into_iter()
            .zip(reducers)
            .enumerate()
            .map(|(r, (halo, reducer))| {
                let mut part = Partition::from_grid(&grid, span_for(r, workers, 8));
                thread::spawn(move || {
                    iterate(&mut part, &halo, &reducer, cell_count, &config).unwrap()
                })
            })
            .collect();

        for h in handles {
            let state = h.join().unwrap();
            assert_eq!(state.iterations, 1);
            assert_eq!(state.metric, 0.0);
        }
    }
}
