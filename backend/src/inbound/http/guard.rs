//! Admin guard shared by every privileged route.
//!
//! Concentrates the session-to-privilege check so the HTTP modules stay
//! focused on request/response mapping. Every admin handler calls
//! [`require_admin`] first and short-circuits before any port is invoked.

use tracing::error;

use super::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::{AdminProfile, Error};

/// Resolve the caller's profile and require administrative privilege.
///
/// Failure modes: no session user id or no matching profile yield 401 with
/// a generic message; a profile without `is_admin` yields 403; a directory
/// failure yields a generic 500 with the detail logged for operators.
pub async fn require_admin(state: &HttpState, session: &SessionContext) -> ApiResult<AdminProfile> {
    let admin_id = session.require_user_id()?;
    let profile = state
        .admins
        .find_profile(admin_id)
        .await
        .map_err(|err| {
            error!(error = %err, "admin directory lookup failed");
            Error::internal("Internal server error")
        })?
        .ok_or_else(|| Error::unauthorized("login required"))?;
    if !profile.is_admin {
        return Err(Error::forbidden("administrator privilege required"));
    }
    Ok(profile)
}
