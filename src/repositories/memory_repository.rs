use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::ContactId;
use crate::error::{StoreError, StoreResult};
use crate::models::Contact;
use crate::repositories::sort_for_listing;
use crate::repositories::traits::ContactRepository;

/// Contact repository held entirely in memory.
///
/// Used when no data file is configured. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryContactRepository {
    contacts: RwLock<HashMap<ContactId, Contact>>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with existing contacts.
    pub fn with_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
        Self {
            contacts: RwLock::new(contacts.into_iter().map(|c| (c.id, c)).collect()),
        }
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn get(&self, id: ContactId) -> StoreResult<Contact> {
        self.contacts
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list(&self) -> StoreResult<Vec<Contact>> {
        let mut contacts: Vec<Contact> = self.contacts.read().await.values().cloned().collect();
        sort_for_listing(&mut contacts);
        Ok(contacts)
    }

    async fn insert(&self, contact: Contact) -> StoreResult<Contact> {
        self.contacts
            .write()
            .await
            .insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn update(&self, contact: Contact) -> StoreResult<Contact> {
        let mut contacts = self.contacts.write().await;
        match contacts.get_mut(&contact.id) {
            Some(existing) => {
                *existing = contact.clone();
                Ok(contact)
            }
            None => Err(StoreError::NotFound(contact.id.to_string())),
        }
    }

    async fn delete(&self, id: ContactId) -> StoreResult<Contact> {
        self.contacts
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
