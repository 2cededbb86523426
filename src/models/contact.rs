//! Contact model and its owned child records.

use crate::domain::ContactId;
use crate::models::view::{AddressInput, EmailInput, SaveContactRequest};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person record.
///
/// A contact owns its email addresses and postal addresses: they are created,
/// replaced and deleted together with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    /// Unique identifier, immutable after creation
    pub id: ContactId,

    /// Honorific (e.g. "Dr.")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    /// Date of birth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,

    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,

    #[serde(default)]
    pub addresses: Vec<Address>,
}

/// An email address belonging to exactly one contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    pub id: Uuid,

    /// Owning contact
    pub contact_id: ContactId,

    /// Free-form tag such as "home" or "work"
    #[serde(rename = "type")]
    pub kind: String,

    pub email: String,
}

/// A postal address belonging to exactly one contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub id: Uuid,

    /// Owning contact
    pub contact_id: ContactId,

    /// Free-form tag such as "home" or "work"
    #[serde(rename = "type")]
    pub kind: String,

    pub street1: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,

    pub city: String,

    pub state: String,

    pub zip: String,
}

impl Contact {
    /// Create a contact with no child records.
    pub fn new(id: ContactId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            title: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            dob: None,
            email_addresses: Vec::new(),
            addresses: Vec::new(),
        }
    }

    /// Build a contact from a save request under the given id.
    pub fn from_request(id: ContactId, request: &SaveContactRequest) -> Self {
        let mut contact = Self::new(id, "", "");
        contact.apply(request);
        contact
    }

    /// Overwrite scalar fields and replace both child collections.
    ///
    /// Child records always get fresh ids; the previous ones are discarded.
    pub fn apply(&mut self, request: &SaveContactRequest) {
        self.title = request.title.clone();
        self.first_name = request.first_name.clone();
        self.last_name = request.last_name.clone();
        self.dob = request.dob;
        self.email_addresses = request
            .emails
            .iter()
            .map(|input| EmailAddress::from_input(self.id, input))
            .collect();
        self.addresses = request
            .addresses
            .iter()
            .map(|input| Address::from_input(self.id, input))
            .collect();
    }

    /// "First Last", trimmed when either part is empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl EmailAddress {
    fn from_input(contact_id: ContactId, input: &EmailInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            contact_id,
            kind: input.kind.clone(),
            email: input.email.clone(),
        }
    }
}

impl Address {
    fn from_input(contact_id: ContactId, input: &AddressInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            contact_id,
            kind: input.kind.clone(),
            street1: input.street1.clone(),
            street2: input.street2.clone().filter(|s| !s.trim().is_empty()),
            city: input.city.clone(),
            state: input.state.clone(),
            zip: input.zip.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SaveContactRequest {
        SaveContactRequest {
            contact_id: Uuid::nil(),
            title: Some("Dr.".to_string()),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            dob: NaiveDate::from_ymd_opt(1815, 12, 10),
            emails: vec![EmailInput {
                kind: "work".to_string(),
                email: "ada@example.com".to_string(),
            }],
            addresses: vec![AddressInput {
                kind: "home".to_string(),
                street1: "12 St James's Square".to_string(),
                street2: Some("  ".to_string()),
                city: "London".to_string(),
                state: "LDN".to_string(),
                zip: "SW1Y 4JH".to_string(),
            }],
        }
    }

    #[test]
    fn test_from_request_links_children_to_parent() {
        let id = ContactId::generate();
        let contact = Contact::from_request(id, &request());

        assert_eq!(contact.full_name(), "Ada Lovelace");
        assert_eq!(contact.email_addresses.len(), 1);
        assert_eq!(contact.addresses.len(), 1);
        assert!(contact.email_addresses.iter().all(|e| e.contact_id == id));
        assert!(contact.addresses.iter().all(|a| a.contact_id == id));
        assert_eq!(contact.addresses[0].street2, None);
    }

    #[test]
    fn test_apply_replaces_children() {
        let id = ContactId::generate();
        let mut contact = Contact::from_request(id, &request());
        let old_email_id = contact.email_addresses[0].id;

        let mut update = request();
        update.emails.push(EmailInput {
            kind: "home".to_string(),
            email: "ada@home.example.com".to_string(),
        });
        update.addresses.clear();
        contact.apply(&update);

        assert_eq!(contact.email_addresses.len(), 2);
        assert!(contact.addresses.is_empty());
        assert!(contact.email_addresses.iter().all(|e| e.id != old_email_id));
        assert_eq!(contact.id, id);
    }

    #[test]
    fn test_type_tag_serializes_as_type() {
        let contact = Contact::from_request(ContactId::generate(), &request());
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["email_addresses"][0]["type"], "work");
        assert_eq!(json["dob"], "1815-12-10");
    }

    #[test]
    fn test_full_name_trims() {
        let contact = Contact::new(ContactId::generate(), "Cher", "");
        assert_eq!(contact.full_name(), "Cher");
    }
}
