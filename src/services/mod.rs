//! Application service layer.
//!
//! Services contain the contact workflows and sit between the HTTP handlers
//! and the data access layer. They are also the only place that triggers
//! change notifications, always after the store has committed.

mod contact_service;

pub use contact_service::{ContactService, ContactServiceImpl};
