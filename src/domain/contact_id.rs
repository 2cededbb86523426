//! ContactId value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A type-safe wrapper for contact IDs.
///
/// Contact IDs are UUIDs. The nil UUID is rejected because the save path
/// uses it to mean "no contact yet".
///
/// # Example
///
/// ```
/// use contact_manager::domain::ContactId;
///
/// let id: ContactId = "6f1c2b8e-3a52-4c1e-9a0f-1b2c3d4e5f60".parse().unwrap();
/// assert_eq!(id.to_string(), "6f1c2b8e-3a52-4c1e-9a0f-1b2c3d4e5f60");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(Uuid);

impl ContactId {
    /// Wrap an existing UUID, rejecting the nil UUID.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NilId` for `Uuid::nil()`.
    pub fn new(id: Uuid) -> Result<Self, ValidationError> {
        if id.is_nil() {
            return Err(ValidationError::NilId);
        }
        Ok(Self(id))
    }

    /// Allocate a fresh random ID. Never nil, never reused in practice.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Convert into the underlying UUID.
    pub fn into_inner(self) -> Uuid {
        self.0
    }
}

impl FromStr for ContactId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s).map_err(|_| ValidationError::InvalidId(s.to_string()))?;
        Self::new(uuid)
    }
}

// Serde support - serialize as UUID string
impl Serialize for ContactId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize with validation
impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let uuid = Uuid::deserialize(deserializer)?;
        ContactId::new(uuid).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
