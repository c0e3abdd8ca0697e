//! Engine and exchange error types.

use std::error::Error;
use std::fmt;

use crate::config::ConfigError;

/// Errors from the message-passing layer (halo ring, all-reduce, gather).
///
/// There is exactly one failure mode: a peer's channel endpoints were
/// dropped, which only happens when that worker has already exited. A peer
/// that is alive but stalled blocks the caller indefinitely instead; the
/// protocol has no timeouts by design.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExchangeError {
    /// A send or receive found the peer's side of the channel closed.
    PeerDisconnected,
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PeerDisconnected => write!(f, "peer worker disconnected"),
        }
    }
}

impl Error for ExchangeError {}

/// Errors from [`solve_distributed`](crate::solve_distributed).
#[derive(Debug)]
pub enum EngineError {
    /// The run configuration failed validation.
    Config(ConfigError),
    /// A communication step failed because a peer worker exited early.
    Exchange(ExchangeError),
    /// The grid has no partitionable interior (`height < 3`).
    GridTooSmall {
        /// Height of the rejected grid.
        height: usize,
    },
    /// A worker thread panicked.
    WorkerPanicked,
    /// A worker thread could not be spawned.
    ThreadSpawnFailed,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid config: {e}"),
            Self::Exchange(e) => write!(f, "exchange failed: {e}"),
            Self::GridTooSmall { height } => {
                write!(f, "grid height {height} leaves no interior rows to partition")
            }
            Self::WorkerPanicked => write!(f, "a worker thread panicked"),
            Self::ThreadSpawnFailed => write!(f, "could not spawn a worker thread"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Exchange(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ExchangeError> for EngineError {
    fn from(e: ExchangeError) -> Self {
        Self::Exchange(e)
    }
}
