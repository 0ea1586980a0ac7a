//! Platform-backed agency listing via the `get_agencies_with_stats` procedure.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{PlatformClient, decode, map_platform_error};
use crate::domain::ports::{AgencyListing, AgencyListingRequest, AgencyQuery, BackendError};

/// Reads the agency catalogue through one stored procedure.
pub struct PlatformAgencyQuery {
    client: Arc<PlatformClient>,
}

impl PlatformAgencyQuery {
    /// Create a query adapter backed by the given client.
    pub fn new(client: Arc<PlatformClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AgencyQuery for PlatformAgencyQuery {
    async fn list_agencies(
        &self,
        request: &AgencyListingRequest,
    ) -> Result<AgencyListing, BackendError> {
        let payload = self
            .client
            .rpc(
                "get_agencies_with_stats",
                &json!({
                    "search_term": request.search,
                    "source_filter": request.source,
                    "status_filter": request.status,
                    "jurisdiction_filter": request.jurisdiction,
                    "page_number": request.page,
                    "page_size": request.page_size,
                }),
            )
            .await
            .map_err(map_platform_error)?;
        decode("get_agencies_with_stats", payload)
    }
}
