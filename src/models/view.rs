//! Request and view shapes for the HTTP surface.

use crate::domain::ContactId;
use crate::models::contact::{Address, Contact, EmailAddress};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /contacts`.
///
/// A nil `contact_id` (or an omitted one) creates a new contact; any other
/// value replaces the existing contact with that id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SaveContactRequest {
    pub contact_id: Uuid,
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub dob: Option<NaiveDate>,
    pub emails: Vec<EmailInput>,
    pub addresses: Vec<AddressInput>,
}

/// Email address as submitted by the edit form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct EmailInput {
    #[serde(rename = "type")]
    pub kind: String,
    pub email: String,
}

/// Postal address as submitted by the edit form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct AddressInput {
    #[serde(rename = "type")]
    pub kind: String,
    pub street1: String,
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl SaveContactRequest {
    /// The contact this request targets, or `None` for a create.
    pub fn target(&self) -> Option<ContactId> {
        // Non-nil UUIDs always validate
        ContactId::new(self.contact_id).ok()
    }
}

/// Data backing the contact edit form.
///
/// `id` is `None` for the blank "new contact" form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EditContactView {
    pub id: Option<ContactId>,
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub dob: Option<NaiveDate>,
    pub email_addresses: Vec<EmailAddress>,
    pub addresses: Vec<Address>,
}

impl From<Contact> for EditContactView {
    fn from(contact: Contact) -> Self {
        Self {
            id: Some(contact.id),
            title: contact.title,
            first_name: contact.first_name,
            last_name: contact.last_name,
            dob: contact.dob,
            email_addresses: contact.email_addresses,
            addresses: contact.addresses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_contact_id_means_create() {
        let request: SaveContactRequest =
            serde_json::from_str(r#"{"first_name":"Grace","last_name":"Hopper"}"#).unwrap();
        assert_eq!(request.target(), None);
        assert!(request.emails.is_empty());
    }

    #[test]
    fn test_existing_contact_id_is_target() {
        let id = ContactId::generate();
        let request = SaveContactRequest {
            contact_id: id.into_inner(),
            ..Default::default()
        };
        assert_eq!(request.target(), Some(id));
    }

    #[test]
    fn test_blank_view_has_no_id() {
        let view = EditContactView::default();
        assert!(view.id.is_none());
        assert!(view.email_addresses.is_empty());
    }
}
