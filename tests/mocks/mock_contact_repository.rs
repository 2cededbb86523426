use async_trait::async_trait;
use contact_manager::domain::ContactId;
use contact_manager::error::{StoreError, StoreResult};
use contact_manager::models::Contact;
use contact_manager::repositories::ContactRepository;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Provides an in-memory implementation of ContactRepository that can be
/// seeded with test data, tracks method calls for verification, and can be
/// told to fail every write.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<HashMap<ContactId, Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    fail_writes: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(HashMap::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Add a contact to the mock repository.
    pub fn add_contact(&self, contact: Contact) {
        let mut contacts = self.contacts.lock().unwrap();
        contacts.insert(contact.id, contact);
    }

    /// Ids of everything currently committed.
    pub fn contact_ids(&self) -> Vec<ContactId> {
        self.contacts.lock().unwrap().keys().copied().collect()
    }

    /// Make every insert/update/delete fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "simulated write failure",
            )));
        }
        Ok(())
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn get(&self, id: ContactId) -> StoreResult<Contact> {
        self.track_call("get");

        let contacts = self.contacts.lock().unwrap();
        contacts
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list(&self) -> StoreResult<Vec<Contact>> {
        self.track_call("list");

        let contacts = self.contacts.lock().unwrap();
        let mut result: Vec<Contact> = contacts.values().cloned().collect();
        result.sort_by(|a, b| a.first_name.cmp(&b.first_name));
        Ok(result)
    }

    async fn insert(&self, contact: Contact) -> StoreResult<Contact> {
        self.track_call("insert");
        self.check_writable()?;

        let mut contacts = self.contacts.lock().unwrap();
        contacts.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn update(&self, contact: Contact) -> StoreResult<Contact> {
        self.track_call("update");
        self.check_writable()?;

        let mut contacts = self.contacts.lock().unwrap();
        if !contacts.contains_key(&contact.id) {
            return Err(StoreError::NotFound(contact.id.to_string()));
        }

        contacts.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn delete(&self, id: ContactId) -> StoreResult<Contact> {
        self.track_call("delete");
        self.check_writable()?;

        let mut contacts = self.contacts.lock().unwrap();
        contacts
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
