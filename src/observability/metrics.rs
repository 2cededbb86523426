//! Counters for the change notifier and the mutation path.
//!
//! All counters are process-lifetime atomics shared by cheap clones of the
//! tracker, so the hub, the service and the HTTP layer can each hold one.

use crate::notifier::DispatchSummary;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared metrics tracker for the application.
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    connections_opened_total: Arc<AtomicU64>,
    connections_closed_total: Arc<AtomicU64>,
    broadcasts_total: Arc<AtomicU64>,
    deliveries_total: Arc<AtomicU64>,
    coalesced_total: Arc<AtomicU64>,
    failed_deliveries_total: Arc<AtomicU64>,
    mutations_total: Arc<AtomicU64>,
}

/// Point-in-time copy of every counter, served at `/metrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub connections_opened_total: u64,
    pub connections_closed_total: u64,
    pub connected_clients: u64,
    pub broadcasts_total: u64,
    pub deliveries_total: u64,
    pub coalesced_total: u64,
    pub failed_deliveries_total: u64,
    pub mutations_total: u64,
}

impl MetricsTracker {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            connections_opened_total: Arc::new(AtomicU64::new(0)),
            connections_closed_total: Arc::new(AtomicU64::new(0)),
            broadcasts_total: Arc::new(AtomicU64::new(0)),
            deliveries_total: Arc::new(AtomicU64::new(0)),
            coalesced_total: Arc::new(AtomicU64::new(0)),
            failed_deliveries_total: Arc::new(AtomicU64::new(0)),
            mutations_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track a client joining the broadcast set.
    pub fn track_connect(&self) {
        self.connections_opened_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Track a client leaving the broadcast set, explicitly or after a failed delivery.
    pub fn track_disconnect(&self) {
        self.connections_closed_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Track the outcome of one broadcast.
    pub fn track_broadcast(&self, summary: &DispatchSummary) {
        self.broadcasts_total.fetch_add(1, Ordering::Relaxed);
        self.deliveries_total
            .fetch_add(summary.delivered as u64, Ordering::Relaxed);
        self.coalesced_total
            .fetch_add(summary.coalesced as u64, Ordering::Relaxed);
        self.failed_deliveries_total
            .fetch_add(summary.failed as u64, Ordering::Relaxed);
        self.connections_closed_total
            .fetch_add(summary.removed as u64, Ordering::Relaxed);
    }

    /// Track a committed contact mutation.
    pub fn track_mutation(&self, operation: &str) {
        self.mutations_total.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(operation = %operation, "Mutation committed");
    }

    pub fn connections_opened_total(&self) -> u64 {
        self.connections_opened_total.load(Ordering::Relaxed)
    }

    pub fn connections_closed_total(&self) -> u64 {
        self.connections_closed_total.load(Ordering::Relaxed)
    }

    /// Clients opened and not yet closed.
    pub fn connected_clients(&self) -> u64 {
        self.connections_opened_total()
            .saturating_sub(self.connections_closed_total())
    }

    pub fn broadcasts_total(&self) -> u64 {
        self.broadcasts_total.load(Ordering::Relaxed)
    }

    pub fn deliveries_total(&self) -> u64 {
        self.deliveries_total.load(Ordering::Relaxed)
    }

    pub fn coalesced_total(&self) -> u64 {
        self.coalesced_total.load(Ordering::Relaxed)
    }

    pub fn failed_deliveries_total(&self) -> u64 {
        self.failed_deliveries_total.load(Ordering::Relaxed)
    }

    pub fn mutations_total(&self) -> u64 {
        self.mutations_total.load(Ordering::Relaxed)
    }

    /// Copy every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            connections_opened_total: self.connections_opened_total(),
            connections_closed_total: self.connections_closed_total(),
            connected_clients: self.connected_clients(),
            broadcasts_total: self.broadcasts_total(),
            deliveries_total: self.deliveries_total(),
            coalesced_total: self.coalesced_total(),
            failed_deliveries_total: self.failed_deliveries_total(),
            mutations_total: self.mutations_total(),
        }
    }

    /// Human-readable summary, logged at shutdown.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             Connections: {} opened, {} closed\n\
             Broadcasts: {}\n\
             Deliveries: {} ({} coalesced, {} failed)\n\
             Mutations: {}",
            self.connections_opened_total(),
            self.connections_closed_total(),
            self.broadcasts_total(),
            self.deliveries_total(),
            self.coalesced_total(),
            self.failed_deliveries_total(),
            self.mutations_total(),
        )
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Finish the timer, logging the outcome, and return the elapsed milliseconds.
    pub fn finish_with_status(self, success: bool) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        if success {
            tracing::debug!(
                operation = self.operation,
                duration_ms = duration_ms,
                "Operation succeeded"
            );
        } else {
            tracing::warn!(
                operation = self.operation,
                duration_ms = duration_ms,
                "Operation failed"
            );
        }

        duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_tracker_creation() {
        let tracker = MetricsTracker::new();
        assert_eq!(
            tracker.snapshot(),
            MetricsSnapshot {
                connections_opened_total: 0,
                connections_closed_total: 0,
                connected_clients: 0,
                broadcasts_total: 0,
                deliveries_total: 0,
                coalesced_total: 0,
                failed_deliveries_total: 0,
                mutations_total: 0,
            }
        );
    }

    #[test]
    fn test_connected_clients() {
        let tracker = MetricsTracker::new();
        tracker.track_connect();
        tracker.track_connect();
        tracker.track_disconnect();
        assert_eq!(tracker.connected_clients(), 1);
    }

    #[test]
    fn test_track_broadcast() {
        let tracker = MetricsTracker::new();
        tracker.track_connect();
        tracker.track_connect();
        tracker.track_connect();

        tracker.track_broadcast(&DispatchSummary {
            attempted: 3,
            delivered: 1,
            coalesced: 1,
            failed: 1,
            removed: 1,
        });

        assert_eq!(tracker.broadcasts_total(), 1);
        assert_eq!(tracker.deliveries_total(), 1);
        assert_eq!(tracker.coalesced_total(), 1);
        assert_eq!(tracker.failed_deliveries_total(), 1);
        assert_eq!(tracker.connected_clients(), 2);
    }

    #[test]
    fn test_track_mutation() {
        let tracker = MetricsTracker::new();
        tracker.track_mutation("save_contact");
        tracker.track_mutation("delete_contact");
        assert_eq!(tracker.mutations_total(), 2);
    }

    #[test]
    fn test_timer() {
        let timer = Timer::new("test_operation");
        std::thread::sleep(std::time::Duration::from_millis(10));
        let duration = timer.finish_with_status(true);
        assert!(duration >= 10);
    }

    #[test]
    fn test_summary() {
        let tracker = MetricsTracker::new();
        tracker.track_connect();
        tracker.track_mutation("save_contact");

        let summary = tracker.summary();
        assert!(summary.contains("Connections: 1 opened, 0 closed"));
        assert!(summary.contains("Mutations: 1"));
    }
}
