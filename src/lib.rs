//! Contact Manager - contact records with real-time change notifications.
//!
//! Users list, create, edit and delete contacts (each with email addresses
//! and postal addresses). Every committed change is announced to all
//! connected browsers with a single `"Update"` signal, after which they
//! re-fetch the contact list.
//!
//! # Architecture
//!
//! - **notifier**: the change notification fan-out (`ChangeHub`)
//! - **models**: contacts, their child records, and request/view shapes
//! - **domain**: validated value objects
//! - **repositories**: contact storage (in-memory or JSON file)
//! - **services**: contact workflows; notify after commit
//! - **server**: axum HTTP endpoints and the `/hub` WebSocket
//! - **observability**: counters behind `/metrics`
//! - **config**: configuration from environment variables
//! - **error**: error types

pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod notifier;
pub mod observability;
pub mod repositories;
pub mod server;
pub mod services;

pub use config::Config;
pub use domain::ContactId;
pub use error::{ApiError, ConfigError, StoreError};
pub use models::{Address, Contact, EditContactView, EmailAddress, SaveContactRequest};
pub use notifier::{
    ChangeHub, ClientHandle, DispatchSummary, Notifier, SubscriptionId, UPDATE_EVENT,
};
pub use observability::MetricsTracker;
pub use repositories::{ContactRepository, InMemoryContactRepository, JsonFileContactRepository};
pub use server::AppState;
pub use services::{ContactService, ContactServiceImpl};
