//! Data models for the Contact Manager.
//!
//! This module contains the stored records (contacts and their child email
//! and postal addresses) and the request/view shapes exchanged over HTTP.

pub mod contact;
pub mod view;

pub use contact::{Address, Contact, EmailAddress};
pub use view::{AddressInput, EditContactView, EmailInput, SaveContactRequest};
