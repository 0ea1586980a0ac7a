//! Driving port for the admin agency listing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::BackendError;

/// Filter and pagination parameters for the agency listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgencyListingRequest {
    /// Free-text search over agency names.
    pub search: Option<String>,
    /// Restrict to one source system.
    pub source: Option<String>,
    /// Restrict to one agency status.
    pub status: Option<String>,
    /// Restrict to one jurisdiction.
    pub jurisdiction: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Page size, already clamped to [`Self::MAX_PAGE_SIZE`].
    pub page_size: u32,
}

impl AgencyListingRequest {
    /// Largest page size the listing will serve.
    pub const MAX_PAGE_SIZE: u32 = 100;
    /// Page size applied when the caller does not specify one.
    pub const DEFAULT_PAGE_SIZE: u32 = 25;

    /// Normalise raw pagination input: pages start at 1 and the size is
    /// clamped (not rejected) to the maximum.
    pub fn paged(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(Self::DEFAULT_PAGE_SIZE)
                .clamp(1, Self::MAX_PAGE_SIZE),
            ..Self::default()
        }
    }
}

/// One page of agencies plus listing-wide aggregates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgencyListing {
    /// Agency rows as returned by the platform.
    #[serde(default)]
    pub agencies: Vec<Value>,
    /// Total row count across all pages.
    #[serde(default)]
    pub total: u64,
    /// Distinct source systems present in the listing.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Distinct jurisdictions present in the listing.
    #[serde(default)]
    pub jurisdictions: Vec<String>,
}

/// Read side of the agency catalogue.
#[async_trait]
pub trait AgencyQuery: Send + Sync {
    /// Fetch one page of agencies with aggregates.
    async fn list_agencies(
        &self,
        request: &AgencyListingRequest,
    ) -> Result<AgencyListing, BackendError>;
}

/// Fixture returning a canned listing.
#[derive(Debug, Clone, Default)]
pub struct FixtureAgencyQuery {
    /// The listing returned by every call.
    pub listing: AgencyListing,
}

#[async_trait]
impl AgencyQuery for FixtureAgencyQuery {
    async fn list_agencies(
        &self,
        _request: &AgencyListingRequest,
    ) -> Result<AgencyListing, BackendError> {
        Ok(self.listing.clone())
    }
}
