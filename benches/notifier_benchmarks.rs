//! Performance benchmarks for change notification fan-out.
//!
//! These benchmarks measure:
//! - Broadcast cost as the number of connected clients grows
//! - Broadcast to clients whose queues are already full (coalesced path)
//! - A full save through the service, including the notification

use contact_manager::models::SaveContactRequest;
use contact_manager::notifier::{
    ChangeHub, ChannelHandle, ClientHandle, DeliveryError, Notifier, UPDATE_EVENT,
};
use contact_manager::repositories::InMemoryContactRepository;
use contact_manager::services::{ContactService, ContactServiceImpl};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

/// Accepts every event and discards it.
struct Sink;

impl ClientHandle for Sink {
    fn deliver(&self, event: &str) -> Result<(), DeliveryError> {
        black_box(event);
        Ok(())
    }
}

fn hub_with_sinks(clients: usize) -> ChangeHub {
    let hub = ChangeHub::new();
    for _ in 0..clients {
        hub.connect(Arc::new(Sink));
    }
    hub
}

/// Benchmark broadcast fan-out at different client counts.
fn bench_broadcast_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadcast_fan_out");

    for clients in [1, 10, 100, 1000].iter() {
        let hub = hub_with_sinks(*clients);
        group.bench_with_input(BenchmarkId::from_parameter(clients), clients, |b, _| {
            b.iter(|| hub.broadcast(black_box(UPDATE_EVENT)));
        });
    }

    group.finish();
}

/// Benchmark broadcast to channel-backed clients that never drain their queue.
fn bench_broadcast_lagging_clients(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadcast_lagging_clients");

    for clients in [10, 100, 1000].iter() {
        let hub = ChangeHub::new();
        // Receivers stay alive so deliveries report lagging rather than closed
        let mut receivers = Vec::with_capacity(*clients);
        for _ in 0..*clients {
            let (handle, rx) = ChannelHandle::pair(1);
            hub.connect(Arc::new(handle));
            receivers.push(rx);
        }
        hub.notify_changed();

        group.bench_with_input(BenchmarkId::from_parameter(clients), clients, |b, _| {
            b.iter(|| hub.notify_changed());
        });

        drop(receivers);
    }

    group.finish();
}

/// Benchmark a create through the service with 100 connected clients.
fn bench_save_with_notification(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let hub = Arc::new(hub_with_sinks(100));
    let service = ContactServiceImpl::new(
        Arc::new(InMemoryContactRepository::new()),
        hub.clone(),
        hub.metrics().clone(),
    );

    c.bench_function("save_contact_with_notification", |b| {
        b.to_async(&rt).iter(|| async {
            let request = SaveContactRequest {
                first_name: "Bench".to_string(),
                last_name: "Mark".to_string(),
                ..Default::default()
            };
            let _result = service.save_contact(request).await;
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(50);
    targets = bench_broadcast_fan_out,
        bench_broadcast_lagging_clients,
        bench_save_with_notification
}

criterion_main!(benches);
