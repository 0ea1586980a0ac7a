//! Shared validation helpers for inbound HTTP adapters.
//!
//! Validation failures produce 400 responses with a field-level details
//! payload so clients can surface the offending input.

use serde_json::json;

use crate::domain::{BackfillWindow, DuplicateGroupId, Error};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: &str, value: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value.into(),
        "code": code,
    }))
}

/// Validate a backfill day count against the accepted range.
pub(crate) fn parse_backfill_days(days: u32) -> Result<BackfillWindow, Error> {
    BackfillWindow::new(days).map_err(|_| {
        field_error(
            FieldName::new("days"),
            format!(
                "days must be between {} and {}",
                BackfillWindow::MIN_DAYS,
                BackfillWindow::MAX_DAYS
            ),
            "days_out_of_range",
            days.to_string(),
        )
    })
}

/// Require a non-blank duplicate group id.
pub(crate) fn parse_group_id(raw: &str) -> Result<DuplicateGroupId, Error> {
    DuplicateGroupId::new(raw).map_err(|_| {
        field_error(
            FieldName::new("groupId"),
            "groupId is required".to_owned(),
            "missing_group_id",
            raw,
        )
    })
}
