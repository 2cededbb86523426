use crate::domain::ContactId;
use crate::error::StoreResult;
use crate::models::Contact;
use async_trait::async_trait;

/// Repository for managing contacts.
///
/// A contact is stored together with its email addresses and postal
/// addresses; every operation reads or writes the whole aggregate. When a
/// mutating call returns `Ok`, the change is committed and visible to every
/// subsequent `get`/`list`.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Retrieve a single contact with its child records.
    async fn get(&self, id: ContactId) -> StoreResult<Contact>;

    /// Retrieve every contact, ordered by first name.
    async fn list(&self) -> StoreResult<Vec<Contact>>;

    /// Store a new contact.
    async fn insert(&self, contact: Contact) -> StoreResult<Contact>;

    /// Replace an existing contact and all of its child records.
    async fn update(&self, contact: Contact) -> StoreResult<Contact>;

    /// Delete a contact and, with it, its child records.
    ///
    /// Returns the removed contact.
    async fn delete(&self, id: ContactId) -> StoreResult<Contact>;
}
