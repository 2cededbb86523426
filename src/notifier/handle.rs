//! Per-client delivery.

use thiserror::Error;
use tokio::sync::mpsc;

/// Why a single delivery did not go through.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryError {
    /// The client's transport is gone; the handle is dead.
    #[error("client transport closed")]
    Closed,

    /// The client's queue is full. The hub folds an `Update` into the one
    /// already pending and drops anything else.
    #[error("client queue full")]
    Lagging,
}

/// One connected client as seen by the hub.
///
/// `deliver` must not block: it hands the event to the transport and
/// returns. Actual network I/O happens elsewhere, outside the hub's lock.
pub trait ClientHandle: Send + Sync {
    fn deliver(&self, event: &str) -> Result<(), DeliveryError>;
}

/// A [`ClientHandle`] backed by a bounded tokio channel.
///
/// The transport task owns the receiving half and writes each event to the
/// wire. When the hub drops its last handle the receiver yields `None`,
/// which is how a drained hub closes its connections.
#[derive(Debug, Clone)]
pub struct ChannelHandle {
    tx: mpsc::Sender<String>,
}

impl ChannelHandle {
    /// Create a handle and the receiver its transport task drains.
    ///
    /// A capacity of zero is raised to one.
    pub fn pair(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl ClientHandle for ChannelHandle {
    fn deliver(&self, event: &str) -> Result<(), DeliveryError> {
        self.tx.try_send(event.to_string()).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DeliveryError::Lagging,
            mpsc::error::TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }
}
