//! Ghost-row exchange over a ring of workers.

use crossbeam_channel::{bounded, Receiver, Sender};

use smolder_core::Cell;
use smolder_solver::Partition;

use crate::error::ExchangeError;

/// Two messages per channel is enough to keep the sends non-blocking: the
/// all-reduce barrier means a worker can be at most one iteration ahead of
/// any peer, so a channel never holds more than this iteration's row plus
/// the next one's.
const HALO_CAPACITY: usize = 2;

/// One worker's endpoints into the halo ring.
///
/// Neighbor indices wrap modulo the worker count, so the logically linear
/// strip of partitions forms a ring. At the global top and bottom edges
/// the wrapped rows land in the outermost margin ghosts, whose cells are
/// zero-conduction by the grid's margin precondition; the stale data is
/// therefore never propagated by an update.
///
/// Per iteration the protocol is: [`begin_exchange`](HaloLinks::begin_exchange)
/// immediately after the sweep (both sends, non-blocking),
/// [`complete_exchange`](HaloLinks::complete_exchange) before the next
/// sweep (both receives). The all-reduce may run in between; it touches no
/// grid data.
pub struct HaloLinks {
    /// Carries this worker's topmost row to the worker above.
    up_tx: Sender<Vec<Cell>>,
    /// Carries this worker's bottommost row to the worker below.
    down_tx: Sender<Vec<Cell>>,
    /// Delivers the row below's topmost row, into the bottom ghost.
    from_below_rx: Receiver<Vec<Cell>>,
    /// Delivers the row above's bottommost row, into the top ghost.
    from_above_rx: Receiver<Vec<Cell>>,
}

impl HaloLinks {
    /// Send both boundary rows to the ring neighbors.
    ///
    /// The row sent up is global row `span.start` and the row sent down is
    /// global row `span.end - 1`. For a worker with an empty span those
    /// are its own ghost rows: the worker relays its neighbors' data so
    /// the ring never stalls.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::PeerDisconnected`] if a neighbor has already
    /// exited.
    pub fn begin_exchange(&self, partition: &Partition) -> Result<(), ExchangeError> {
        let span = partition.span();
        self.up_tx
            .send(partition.row(span.start).to_vec())
            .map_err(|_| ExchangeError::PeerDisconnected)?;
        self.down_tx
            .send(partition.row(span.end - 1).to_vec())
            .map_err(|_| ExchangeError::PeerDisconnected)?;
        Ok(())
    }

    /// Receive both ghost rows, blocking until the neighbors' sends of
    /// this iteration have arrived. Must complete before the next sweep
    /// reads any ghost cell.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::PeerDisconnected`] if a neighbor has already
    /// exited.
    pub fn complete_exchange(&self, partition: &mut Partition) -> Result<(), ExchangeError> {
        let span = partition.span();
        let below = self
            .from_below_rx
            .recv()
            .map_err(|_| ExchangeError::PeerDisconnected)?;
        partition.row_mut(span.end).copy_from_slice(&below);
        let above = self
            .from_above_rx
            .recv()
            .map_err(|_| ExchangeError::PeerDisconnected)?;
        partition.row_mut(span.start - 1).copy_from_slice(&above);
        Ok(())
    }
}

/// Build the halo ring for `workers` workers: one [`HaloLinks`] per
/// worker, wired so that worker `r` talks to `(r + n - 1) % n` above and
/// `(r + 1) % n` below. With a single worker both neighbors are the worker
/// itself and the exchange becomes a self-delivery.
pub fn halo_ring(workers: usize) -> Vec<HaloLinks> {
    assert!(workers > 0, "worker count must be nonzero");

    // up[r]: r -> (r + n - 1) % n, carrying r's topmost row.
    // down[r]: r -> (r + 1) % n, carrying r's bottommost row.
    let mut up: Vec<_> = (0..workers).map(|_| Some(bounded(HALO_CAPACITY))).collect();
    let mut down: Vec<_> = (0..workers).map(|_| Some(bounded(HALO_CAPACITY))).collect();

    // Collect endpoints per worker: r's own senders, plus the receivers of
    // the channels its neighbors send on.
    let mut up_txs = Vec::with_capacity(workers);
    let mut down_txs = Vec::with_capacity(workers);
    for r in 0..workers {
        let (tx, _) = up[r].as_ref().unwrap();
        up_txs.push(tx.clone());
        let (tx, _) = down[r].as_ref().unwrap();
        down_txs.push(tx.clone());
    }

    (0..workers)
        .map(|r| {
            let below = (r + 1) % workers;
            let above = (r + workers - 1) % workers;
            HaloLinks {
                up_tx: up_txs[r].clone(),
                down_tx: down_txs[r].clone(),
                // The worker below sends its topmost row on its up channel.
                from_below_rx: take_rx(&mut up, below),
                // The worker above sends its bottommost row on its down channel.
                from_above_rx: take_rx(&mut down, above),
            }
        })
        .collect()
}

fn take_rx(
    channels: &mut [Option<(Sender<Vec<Cell>>, Receiver<Vec<Cell>>)>],
    index: usize,
) -> Receiver<Vec<Cell>> {
    channels[index]
        .take()
        .map(|(_, rx)| rx)
        .expect("each channel receiver is claimed exactly once")
}
