//! Driving port resolving session identities to administrator profiles.

use async_trait::async_trait;

use super::BackendError;
use crate::domain::{AdminId, AdminProfile};

/// Lookup of administrator profiles by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// Fetch the profile for `id`, if one exists.
    async fn find_profile(&self, id: AdminId) -> Result<Option<AdminProfile>, BackendError>;
}

/// In-memory directory used by tests and fixture wiring.
#[derive(Debug, Clone, Default)]
pub struct FixtureAdminDirectory {
    profiles: Vec<AdminProfile>,
}

impl FixtureAdminDirectory {
    /// Directory with no known profiles.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Directory preloaded with the given profiles.
    pub fn with_profiles(profiles: Vec<AdminProfile>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl AdminDirectory for FixtureAdminDirectory {
    async fn find_profile(&self, id: AdminId) -> Result<Option<AdminProfile>, BackendError> {
        Ok(self.profiles.iter().find(|p| p.id == id).cloned())
    }
}
