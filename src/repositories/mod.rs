mod json_file_repository;
mod memory_repository;
mod traits;

pub use json_file_repository::JsonFileContactRepository;
pub use memory_repository::InMemoryContactRepository;
pub use traits::ContactRepository;

use crate::models::Contact;

/// Order used by every `list` implementation: first name, then last name,
/// then id so that equal names have a stable order.
pub(crate) fn sort_for_listing(contacts: &mut [Contact]) {
    contacts.sort_by(|a, b| {
        a.first_name
            .cmp(&b.first_name)
            .then_with(|| a.last_name.cmp(&b.last_name))
            .then_with(|| a.id.cmp(&b.id))
    });
}
