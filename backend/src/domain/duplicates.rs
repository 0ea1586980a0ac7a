//! Duplicate-alert group identifiers.
//!
//! Detection, merging, and deletion of duplicate groups live entirely in the
//! remote platform's stored procedures; this service only addresses groups
//! by their opaque identifier.

use thiserror::Error as ThisError;

/// Opaque identifier for a backend-detected cluster of duplicate alerts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateGroupId(String);

impl DuplicateGroupId {
    /// Construct a group id after validating that it is non-blank.
    pub fn new(value: impl Into<String>) -> Result<Self, DuplicateGroupIdError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(DuplicateGroupIdError::Blank);
        }
        Ok(Self(raw))
    }

    /// Borrow the underlying identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for DuplicateGroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for DuplicateGroupId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors returned when constructing a [`DuplicateGroupId`].
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum DuplicateGroupIdError {
    /// The identifier is empty after trimming whitespace.
    #[error("duplicate group id must not be blank")]
    Blank,
}
