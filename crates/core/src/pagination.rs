//! Offset/limit pagination for list endpoints.

use crate::error::CoreError;

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Largest page a single list call will return.
pub const MAX_LIST_LIMIT: i64 = 1000;

/// A resolved `(skip, limit)` pair ready to bind into `OFFSET` / `LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

/// Resolve user-supplied `skip` / `limit` query values.
///
/// Missing values fall back to `0` and [`DEFAULT_LIST_LIMIT`]. Negative
/// values are rejected. `limit = 0` is valid and yields an empty page.
/// Limits above [`MAX_LIST_LIMIT`] are clamped.
pub fn resolve_page(skip: Option<i64>, limit: Option<i64>) -> Result<Page, CoreError> {
    let skip = skip.unwrap_or(0);
    if skip < 0 {
        return Err(CoreError::Validation(format!(
            "skip must be non-negative, got {skip}"
        )));
    }

    let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
    if limit < 0 {
        return Err(CoreError::Validation(format!(
            "limit must be non-negative, got {limit}"
        )));
    }

    Ok(Page {
        skip,
        limit: limit.min(MAX_LIST_LIMIT),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
