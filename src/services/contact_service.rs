//! Contact service layer.
//!
//! List, edit, save and delete workflows. Every successful mutation is
//! followed by a change notification.

use crate::domain::ContactId;
use crate::error::StoreResult;
use crate::models::{Contact, EditContactView, SaveContactRequest};
use crate::notifier::Notifier;
use crate::observability::{MetricsTracker, Timer};
use crate::repositories::ContactRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// All contacts ordered by first name. Clients call this after every
    /// change signal.
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>>;

    /// Blank form for a new contact.
    fn new_contact(&self) -> EditContactView;

    /// Form data for an existing contact.
    async fn edit_contact(&self, id: ContactId) -> StoreResult<EditContactView>;

    /// Create (nil `contact_id`) or replace a contact, then notify clients.
    async fn save_contact(&self, request: SaveContactRequest) -> StoreResult<Contact>;

    /// Delete a contact with its child records, then notify clients.
    async fn delete_contact(&self, id: ContactId) -> StoreResult<Contact>;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    repository: Arc<dyn ContactRepository>,
    notifier: Arc<dyn Notifier>,
    metrics: MetricsTracker,
}

impl ContactServiceImpl {
    /// Create a new contact service.
    pub fn new(
        repository: Arc<dyn ContactRepository>,
        notifier: Arc<dyn Notifier>,
        metrics: MetricsTracker,
    ) -> Self {
        Self {
            repository,
            notifier,
            metrics,
        }
    }

    /// Runs after a commit. Notification never fails the mutation.
    fn committed(&self, operation: &str, contact: &Contact) {
        self.metrics.track_mutation(operation);

        let summary = self.notifier.notify_changed();
        debug!(
            operation = %operation,
            contact_id = %contact.id,
            contact = %contact.full_name(),
            clients = summary.attempted,
            delivered = summary.delivered,
            "Change notification dispatched"
        );
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        self.repository.list().await
    }

    fn new_contact(&self) -> EditContactView {
        EditContactView::default()
    }

    async fn edit_contact(&self, id: ContactId) -> StoreResult<EditContactView> {
        let contact = self.repository.get(id).await?;

        info!(
            contact_first = %contact.first_name,
            contact_last = %contact.last_name,
            contact_id = %contact.id,
            at = %Utc::now().format("%H:%M:%S"),
            "Contact opened for edit"
        );

        Ok(contact.into())
    }

    async fn save_contact(&self, request: SaveContactRequest) -> StoreResult<Contact> {
        let timer = Timer::new("save_contact");

        let result = match request.target() {
            None => {
                let contact = Contact::from_request(ContactId::generate(), &request);
                self.repository.insert(contact).await
            }
            Some(id) => match self.repository.get(id).await {
                Ok(mut contact) => {
                    contact.apply(&request);
                    self.repository.update(contact).await
                }
                Err(e) => Err(e),
            },
        };

        timer.finish_with_status(result.is_ok());
        let contact = result?;

        self.committed("save_contact", &contact);

        info!(
            contact_first = %contact.first_name,
            contact_last = %contact.last_name,
            contact_id = %contact.id,
            at = %Utc::now().format("%H:%M:%S"),
            "Contact saved"
        );

        Ok(contact)
    }

    async fn delete_contact(&self, id: ContactId) -> StoreResult<Contact> {
        let timer = Timer::new("delete_contact");
        let result = self.repository.delete(id).await;
        timer.finish_with_status(result.is_ok());
        let contact = result?;

        self.committed("delete_contact", &contact);

        info!(
            contact_first = %contact.first_name,
            contact_last = %contact.last_name,
            contact_id = %contact.id,
            at = %Utc::now().format("%H:%M:%S"),
            "Contact deleted"
        );

        Ok(contact)
    }
}
