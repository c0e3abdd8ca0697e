//! The convergence all-reduce: every worker learns the global delta sum.

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::error::ExchangeError;

/// Same bound as the halo channels: the collective itself is the barrier
/// that keeps any channel at no more than two iterations of traffic.
const REDUCE_CAPACITY: usize = 2;

/// One worker's endpoints into the all-reduce mesh.
///
/// The reduction is a full mesh of dedicated per-peer channels: each
/// worker sends its local value to every peer, receives one value from
/// every peer, and folds the contributions in worker-index order. The
/// fixed fold order makes the f32 sum bitwise identical on every worker,
/// which is what lets each worker evaluate the termination condition
/// locally and still agree on the iteration count.
///
/// Calling [`all_reduce`](Reducer::all_reduce) blocks until every peer has
/// called it for the same iteration; it is the once-per-iteration barrier
/// for the whole group.
pub struct Reducer {
    index: usize,
    workers: usize,
    peer_txs: Vec<Sender<f32>>,
    /// Receivers paired with their peer's index, ascending.
    peer_rxs: Vec<(usize, Receiver<f32>)>,
}

impl Reducer {
    /// This worker's index in the group.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Fold `local` with every peer's contribution and return the global
    /// sum, identical on every worker.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::PeerDisconnected`] if any peer has already exited.
    pub fn all_reduce(&self, local: f32) -> Result<f32, ExchangeError> {
        for tx in &self.peer_txs {
            tx.send(local).map_err(|_| ExchangeError::PeerDisconnected)?;
        }

        let mut values = vec![0.0f32; self.workers];
        values[self.index] = local;
        for (peer, rx) in &self.peer_rxs {
            values[*peer] = rx.recv().map_err(|_| ExchangeError::PeerDisconnected)?;
        }

        Ok(values.iter().sum())
    }
}

/// Build the all-reduce mesh for `workers` workers: one dedicated bounded
/// channel per ordered peer pair. A single worker gets a mesh with no
/// channels; its reduction returns the local value unchanged.
pub fn reduce_mesh(workers: usize) -> Vec<Reducer> {
    assert!(workers > 0, "worker count must be nonzero");

    let mut txs: Vec<Vec<Sender<f32>>> = (0..workers).map(|_| Vec::new()).collect();
    let mut rxs: Vec<Vec<(usize, Receiver<f32>)>> = (0..workers).map(|_| Vec::new()).collect();

    for from in 0..workers {
        for to in 0..workers {
            if from == to {
                continue;
            }
            let (tx, rx) = bounded(REDUCE_CAPACITY);
            txs[from].push(tx);
            rxs[to].push((from, rx));
        }
    }

    txs.into_iter()
        .zip(rxs)
        .enumerate()
        .map(|(index, (peer_txs, peer_rxs))| Reducer {
            index,
            workers,
            peer_txs,
            peer_rxs,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn single_worker_reduces_to_its_own_value() {
        let reducers = reduce_mesh(1);
        assert_eq!(reducers[0].all_reduce(1.25).unwrap(), 1.25);
    }

    #[test]
    fn all_workers_agree_on_the_sum() {
        let locals = [0.5f32, 0.25, 2.0, 0.125];
        let expected: f32 = locals.iter().sum();

        let reducers = reduce_mesh(4);
        let handles: Vec<_> = reducers
            .into_iter()
            .zip(locals)
            .map(|(r, local)| thread::spawn(move || r.all_reduce(local).unwrap()))
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    }

    #[test]
    fn repeated_reductions_stay_in_step() {
        let reducers = reduce_mesh(2);
        let handles: Vec<_> = reducers
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                thread::spawn(move || {
                    (0..50)
                        .map(|k| r.all_reduce((i + k) as f32).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results[0], results[1]);
        // Iteration k sums (0 + k) + (1 + k).
        assert_eq!(results[0][0], 1.0);
        assert_eq!(results[0][49], 99.0);
    }

    #[test]
    fn dropped_peer_surfaces_as_disconnect() {
        let mut reducers = reduce_mesh(2);
        reducers.truncate(1);
        assert_eq!(
            reducers[0].all_reduce(1.0),
            Err(ExchangeError::PeerDisconnected)
        );
    }
}
