//! Domain primitives, ports, and services.
//!
//! Everything here is transport agnostic: inbound adapters map these types
//! to HTTP envelopes, outbound adapters persist them through the hosted
//! platform. Invariants and serialisation contracts live in each type's
//! Rustdoc.

pub mod admin;
pub mod audit;
pub mod duplicates;
pub mod error;
pub mod ports;
pub mod search_cache;
pub mod source_health;
pub mod sync;
mod trace_id;

pub use self::admin::{AdminId, AdminIdError, AdminProfile};
pub use self::audit::AdminOperation;
pub use self::duplicates::{DuplicateGroupId, DuplicateGroupIdError};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::search_cache::{CacheEntry, SearchCacheKey, SearchCacheService};
pub use self::source_health::{HealthSnapshot, OverallStatus, SourceHealth, SourceStatus};
pub use self::sync::{BackfillWindow, BackfillWindowError, SyncJobKind, ensure_idle};
pub use self::trace_id::TraceId;

/// Convenient result alias for fallible domain operations.
pub type ApiResult<T> = Result<T, Error>;
