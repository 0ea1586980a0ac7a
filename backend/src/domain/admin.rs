//! Administrator identity types.
//!
//! Profiles are created by the external auth system and read through the
//! [`crate::domain::ports::AdminDirectory`] port; this service never writes
//! them. The id is stamped onto triggered jobs and audit records.

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use uuid::Uuid;

/// Stable administrator identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AdminId(Uuid);

impl AdminId {
    /// Validate and construct an [`AdminId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, AdminIdError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| AdminIdError::InvalidUuid)
    }

    /// Construct an [`AdminId`] from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for AdminId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AdminId {
    type Error = AdminIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AdminId> for String {
    fn from(value: AdminId) -> Self {
        value.0.to_string()
    }
}

/// Validation failure raised when constructing an [`AdminId`].
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum AdminIdError {
    /// The supplied identifier is not a valid UUID.
    #[error("admin id must be a valid UUID")]
    InvalidUuid,
}

/// Identity of an authenticated administrator.
///
/// Read-only to this system; `is_admin` gates every privileged route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    /// Stable administrator identifier.
    pub id: AdminId,
    /// Contact address recorded by the auth system.
    pub email: String,
    /// Whether the profile carries administrative privilege.
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    #[case("123")]
    fn rejects_invalid_ids(#[case] raw: &str) {
        assert_eq!(AdminId::new(raw), Err(AdminIdError::InvalidUuid));
    }

    #[rstest]
    fn accepts_and_round_trips_uuid() {
        let id = AdminId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
        let json = serde_json::to_string(&id).expect("serialises");
        let back: AdminId = serde_json::from_str(&json).expect("deserialises");
        assert_eq!(back, id);
    }

    #[rstest]
    fn deserialisation_rejects_garbage() {
        let result: Result<AdminId, _> = serde_json::from_str("\"nope\"");
        assert!(result.is_err());
    }
}
