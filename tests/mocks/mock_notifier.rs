use contact_manager::domain::ContactId;
use contact_manager::notifier::{
    ClientHandle, DeliveryError, DispatchSummary, Notifier, SubscriptionId,
};
use std::sync::{Arc, Mutex};

use super::MockContactRepository;

/// Notifier that records every broadcast together with what the repository
/// had committed at that instant.
#[allow(dead_code)]
#[derive(Clone)]
pub struct ProbeNotifier {
    repository: MockContactRepository,
    broadcasts: Arc<Mutex<Vec<(String, Vec<ContactId>)>>>,
}

#[allow(dead_code)]
impl ProbeNotifier {
    pub fn new(repository: MockContactRepository) -> Self {
        Self {
            repository,
            broadcasts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Event names broadcast so far.
    pub fn events(&self) -> Vec<String> {
        self.broadcasts
            .lock()
            .unwrap()
            .iter()
            .map(|(event, _)| event.clone())
            .collect()
    }

    /// Committed contact ids observed at the n-th broadcast.
    pub fn committed_at(&self, n: usize) -> Vec<ContactId> {
        self.broadcasts.lock().unwrap()[n].1.clone()
    }
}

impl Notifier for ProbeNotifier {
    fn connect(&self, _handle: Arc<dyn ClientHandle>) -> SubscriptionId {
        unimplemented!("probe notifier has no clients")
    }

    fn disconnect(&self, _id: SubscriptionId) {}

    fn broadcast(&self, event: &str) -> DispatchSummary {
        let committed = self.repository.contact_ids();
        self.broadcasts
            .lock()
            .unwrap()
            .push((event.to_string(), committed));
        DispatchSummary::default()
    }

    fn connected(&self) -> usize {
        0
    }
}

/// Client handle that records what it receives.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingClient {
    events: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingClient {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl ClientHandle for RecordingClient {
    fn deliver(&self, event: &str) -> Result<(), DeliveryError> {
        self.events.lock().unwrap().push(event.to_string());
        Ok(())
    }
}
