//! Real-time change notification fan-out.
//!
//! CRUD handlers call [`Notifier::notify_changed`] after a mutation commits;
//! every connected client receives the [`UPDATE_EVENT`] signal and re-fetches
//! the full contact list through the read path. The protocol carries no
//! payload and no deltas.
//!
//! - **handle**: the per-client delivery seam ([`ClientHandle`]) and the
//!   bounded-queue implementation used by the WebSocket transport
//! - **hub**: [`ChangeHub`], the explicitly owned registry of connected clients

pub mod handle;
pub mod hub;

pub use handle::{ChannelHandle, ClientHandle, DeliveryError};
pub use hub::ChangeHub;

use std::fmt;
use std::sync::Arc;

/// The only signal clients ever receive.
pub const UPDATE_EVENT: &str = "Update";

/// Identifies one registration in the broadcast set.
///
/// Allocated from a monotonically increasing counter and never reused
/// within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Outcome of one broadcast, for logging and metrics.
///
/// `attempted == delivered + coalesced + failed`. Failures never surface to
/// the caller as errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Clients in the snapshot taken at dispatch time
    pub attempted: usize,
    /// Clients whose queue accepted the event
    pub delivered: usize,
    /// Clients that already had a signal pending
    pub coalesced: usize,
    /// Clients that did not get the event: the transport had closed, or the
    /// queue was full and the event was not `Update`
    pub failed: usize,
    /// Closed clients removed from the set by this broadcast
    pub removed: usize,
}

/// Capability to register clients and fan out change signals.
///
/// The transport behind a [`ClientHandle`] is opaque here, so long-lived
/// sockets, polling endpoints or queue-backed fan-out can all sit behind the
/// same registry without touching the CRUD path.
pub trait Notifier: Send + Sync {
    /// Add a client to the broadcast set. Always succeeds.
    fn connect(&self, handle: Arc<dyn ClientHandle>) -> SubscriptionId;

    /// Remove a client. Unknown or already removed ids are a no-op.
    fn disconnect(&self, id: SubscriptionId);

    /// Deliver `event` to every currently connected client.
    ///
    /// Returns once dispatch has been initiated to all of them; never waits
    /// for a client to process the event and never fails.
    ///
    /// A client whose queue is full only has [`UPDATE_EVENT`] folded into
    /// the signal it already has pending. Any other event is dropped for that
    /// client and counted as failed; the client stays connected.
    fn broadcast(&self, event: &str) -> DispatchSummary;

    /// Number of clients currently in the broadcast set.
    fn connected(&self) -> usize;

    /// Signal that contact data changed. Call only after the mutation committed.
    fn notify_changed(&self) -> DispatchSummary {
        self.broadcast(UPDATE_EVENT)
    }
}
