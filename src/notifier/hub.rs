//! In-process registry of connected clients.

use super::{
    ClientHandle, DeliveryError, DispatchSummary, Notifier, SubscriptionId, UPDATE_EVENT,
};
use crate::observability::MetricsTracker;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

type ClientMap = HashMap<SubscriptionId, Arc<dyn ClientHandle>>;

/// The broadcast set.
///
/// Created once at startup, shared (behind `Arc`) by the contact service and
/// the transport listener, and drained on shutdown. State is volatile: a
/// restart starts with nobody connected.
///
/// The set is guarded by a read/write lock that is only held to insert,
/// remove, or snapshot entries. Delivery runs on the snapshot with no lock
/// held.
pub struct ChangeHub {
    clients: RwLock<ClientMap>,
    next_id: AtomicU64,
    metrics: MetricsTracker,
}

impl ChangeHub {
    /// Create an empty hub with its own metrics tracker.
    pub fn new() -> Self {
        Self::with_metrics(MetricsTracker::new())
    }

    /// Create an empty hub that reports into a shared tracker.
    pub fn with_metrics(metrics: MetricsTracker) -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(0),
            metrics,
        }
    }

    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    /// Whether `id` is still in the broadcast set.
    pub fn is_connected(&self, id: SubscriptionId) -> bool {
        self.read().contains_key(&id)
    }

    /// Remove every client, returning how many were registered.
    ///
    /// Dropping the handles closes channel-backed transports.
    pub fn drain(&self) -> usize {
        let drained = std::mem::take(&mut *self.write());
        let count = drained.len();
        for _ in 0..count {
            self.metrics.track_disconnect();
        }
        info!(clients = count, "Change hub drained");
        count
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, ClientMap> {
        self.clients.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ClientMap> {
        self.clients.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeHub")
            .field("connected", &self.connected())
            .finish()
    }
}

impl Notifier for ChangeHub {
    fn connect(&self, handle: Arc<dyn ClientHandle>) -> SubscriptionId {
        let id = SubscriptionId::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let connected = {
            let mut clients = self.write();
            clients.insert(id, handle);
            clients.len()
        };
        self.metrics.track_connect();
        debug!(subscription = %id, connected, "Client connected");
        id
    }

    fn disconnect(&self, id: SubscriptionId) {
        let removed = self.write().remove(&id);
        if removed.is_some() {
            self.metrics.track_disconnect();
            debug!(subscription = %id, "Client disconnected");
        }
    }

    fn broadcast(&self, event: &str) -> DispatchSummary {
        let snapshot: Vec<(SubscriptionId, Arc<dyn ClientHandle>)> = self
            .read()
            .iter()
            .map(|(id, handle)| (*id, Arc::clone(handle)))
            .collect();

        let mut summary = DispatchSummary {
            attempted: snapshot.len(),
            ..Default::default()
        };
        let mut dead = Vec::new();

        for (id, handle) in snapshot {
            match handle.deliver(event) {
                Ok(()) => summary.delivered += 1,
                // A pending Update already covers another one
                Err(DeliveryError::Lagging) if event == UPDATE_EVENT => {
                    summary.coalesced += 1;
                    debug!(subscription = %id, event, "Client lagging, signal coalesced");
                }
                Err(err @ DeliveryError::Lagging) => {
                    summary.failed += 1;
                    warn!(
                        subscription = %id,
                        event,
                        error = %err,
                        "Event dropped for lagging client"
                    );
                }
                Err(err @ DeliveryError::Closed) => {
                    summary.failed += 1;
                    warn!(
                        subscription = %id,
                        event,
                        error = %err,
                        "Delivery failed, dropping client"
                    );
                    dead.push(id);
                }
            }
        }

        if !dead.is_empty() {
            let mut clients = self.write();
            summary.removed = dead
                .iter()
                .filter(|id| clients.remove(*id).is_some())
                .count();
        }

        self.metrics.track_broadcast(&summary);
        debug!(
            event,
            attempted = summary.attempted,
            delivered = summary.delivered,
            coalesced = summary.coalesced,
            failed = summary.failed,
            "Broadcast dispatched"
        );

        summary
    }

    fn connected(&self) -> usize {
        self.read().len()
    }
}
