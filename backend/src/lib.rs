//! Regulatory-alerts admin backend.
//!
//! A thin, authenticated glue layer in front of a hosted data platform: the
//! admin console surface (sync/backfill triggers, deduplication, health
//! checks, reindexing), subscriber alert search with an expiring result
//! cache, and the ambient plumbing (sessions, tracing, OpenAPI) around them.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::Trace;
