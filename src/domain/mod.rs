//! Domain value objects and types.
//!
//! Type-safe wrappers for domain concepts. Value objects validate at
//! construction time so that a stored contact can never carry the nil id
//! that the save endpoint reserves for "create new".

pub mod contact_id;
pub mod errors;

pub use contact_id::ContactId;
pub use errors::ValidationError;
