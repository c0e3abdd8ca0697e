//! Final consolidation of all partitions onto the collector.

use crossbeam_channel::{bounded, Receiver, Sender};

use smolder_core::{Cell, Grid};
use smolder_solver::{span_for, Partition};

use crate::error::ExchangeError;

/// A worker's side of the gather: worker 0 collects, everyone else sends
/// its owned rows exactly once. A plain point-to-point rendezvous, not a
/// collective; it runs after the iteration loop has terminated.
pub(crate) enum GatherRole {
    /// Worker 0: receives each other worker's rows in index order.
    Collector {
        /// Receiver `i` belongs to worker `i + 1`.
        sources: Vec<Receiver<Vec<Cell>>>,
    },
    /// Workers 1..n: one send of the owned rows, then done.
    Sender(Sender<Vec<Cell>>),
}

/// Build the gather links: element 0 is the collector, the rest senders.
pub(crate) fn gather_links(workers: usize) -> Vec<GatherRole> {
    assert!(workers > 0, "worker count must be nonzero");

    let mut sources = Vec::with_capacity(workers - 1);
    let mut senders = Vec::with_capacity(workers - 1);
    for _ in 1..workers {
        let (tx, rx) = bounded(1);
        sources.push(rx);
        senders.push(tx);
    }

    let mut roles = Vec::with_capacity(workers);
    roles.push(GatherRole::Collector { sources });
    roles.extend(senders.into_iter().map(GatherRole::Sender));
    roles
}

impl GatherRole {
    /// Sender side: ship the partition's owned rows to the collector.
    ///
    /// # Panics
    ///
    /// Panics if called on the collector role; the roles are assigned by
    /// worker index and never change.
    pub(crate) fn send(self, partition: &Partition) -> Result<(), ExchangeError> {
        match self {
            GatherRole::Sender(tx) => tx
                .send(partition.owned_cells().to_vec())
                .map_err(|_| ExchangeError::PeerDisconnected),
            GatherRole::Collector { .. } => unreachable!("collector does not send"),
        }
    }

    /// Collector side: write the collector's own rows plus every received
    /// span into `grid`. Row ranges are re-derived from the partition
    /// planner, never taken from the payload.
    ///
    /// # Panics
    ///
    /// Panics if called on a sender role.
    pub(crate) fn collect(
        self,
        grid: &mut Grid,
        own: &Partition,
        workers: usize,
    ) -> Result<(), ExchangeError> {
        match self {
            GatherRole::Collector { sources } => {
                write_span(grid, own.span().start, own.owned_cells());
                for (i, rx) in sources.iter().enumerate() {
                    let cells = rx.recv().map_err(|_| ExchangeError::PeerDisconnected)?;
                    let span = span_for(i + 1, workers, grid.height());
                    debug_assert_eq!(cells.len(), span.len() * grid.width());
                    write_span(grid, span.start, &cells);
                }
                Ok(())
            }
            GatherRole::Sender(_) => unreachable!("sender does not collect"),
        }
    }
}

fn write_span(grid: &mut Grid, start_row: usize, cells: &[Cell]) {
    let width = grid.width();
    for (offset, chunk) in cells.chunks_exact(width).enumerate() {
        grid.row_mut(start_row + offset).copy_from_slice(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use smolder_solver::span_for;

    fn numbered_grid(width: usize, height: usize) -> Grid {
        let mut g = Grid::new(width, height).unwrap();
        for r in 0..height {
            for c in 0..width {
                g.cell_mut(r, c).temperature = (r * 100 + c) as f32;
            }
        }
        g
    }

    #[test]
    fn split_and_gather_round_trips() {
        let original = numbered_grid(5, 11);
        for workers in [1usize, 2, 3, 4] {
            let parts: Vec<_> = (0..workers)
                .map(|r| Partition::from_grid(&original, span_for(r, workers, 11)))
                .collect();
            let mut roles = gather_links(workers);

            // Senders first (capacity 1, so none of them block), then the
            // collector drains in index order.
            let collector = roles.remove(0);
            for (role, part) in roles.into_iter().zip(&parts[1..]) {
                role.send(part).unwrap();
            }

            let mut assembled = original.clone();
            collector.collect(&mut assembled, &parts[0], workers).unwrap();
            assert_eq!(assembled, original, "workers = {workers}");
        }
    }

    #[test]
    fn collector_places_modified_rows_at_their_spans() {
        let original = numbered_grid(4, 8);
        let workers = 2;
        let mut parts: Vec<_> = (0..workers)
            .map(|r| Partition::from_grid(&original, span_for(r, workers, 8)))
            .collect();

        // Worker 1 heats its owned rows by one degree.
        let span1 = parts[1].span();
        for r in span1.rows() {
            for cell in parts[1].row_mut(r) {
                cell.temperature += 1.0;
            }
        }

        let mut roles = gather_links(workers);
        let collector = roles.remove(0);
        roles.remove(0).send(&parts[1]).unwrap();

        let mut assembled = original.clone();
        collector.collect(&mut assembled, &parts[0], workers).unwrap();

        for r in 0..8 {
            for c in 0..4 {
                let expected = if span1.rows().contains(&r) {
                    original.cell(r, c).temperature + 1.0
                } else {
                    original.cell(r, c).temperature
                };
                assert_eq!(assembled.cell(r, c).temperature, expected, "({r}, {c})");
            }
        }
    }

    proptest! {
        #[test]
        fn gather_reassembles_any_partitioning(height in 3usize..40, workers in 1usize..10) {
            let original = numbered_grid(4, height);
            let parts: Vec<_> = (0..workers)
                .map(|r| Partition::from_grid(&original, span_for(r, workers, height)))
                .collect();
            let mut roles = gather_links(workers);

            let collector = roles.remove(0);
            for (role, part) in roles.into_iter().zip(&parts[1..]) {
                role.send(part).unwrap();
            }

            let mut assembled = original.clone();
            collector.collect(&mut assembled, &parts[0], workers).unwrap();
            prop_assert_eq!(assembled, original);
        }
    }

    #[test]
    fn dropped_collector_surfaces_as_disconnect() {
        let original = numbered_grid(4, 8);
        let part = Partition::from_grid(&original, span_for(1, 2, 8));
        let mut roles = gather_links(2);
        roles.remove(0); // collector dropped
        assert_eq!(
            roles.remove(0).send(&part),
            Err(ExchangeError::PeerDisconnected)
        );
    }
}
