//! Detection record rules.
//!
//! Constants and validation helpers shared by the request DTOs in the
//! storage crate and the HTTP handlers. Field-level rules are expressed as
//! `validator` derive attributes on the DTOs; the helpers here cover what
//! those attributes cannot (empty strings, per-element error paths) and
//! convert `validator` output into [`CoreError`].

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Entity name used in not-found errors.
pub const DETECTION_ENTITY: &str = "Detection";

/// Lowest accepted detector confidence.
pub const MIN_CONFIDENCE: f64 = 0.0;

/// Highest accepted detector confidence.
pub const MAX_CONFIDENCE: f64 = 1.0;

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Reject empty strings. Whitespace counts as content.
///
/// Signature matches `#[validate(custom(function = ...))]`.
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        let mut err = ValidationError::new("empty");
        err.message = Some(Cow::Borrowed("must not be empty"));
        return Err(err);
    }
    Ok(())
}

/// Validate a confidence score outside of a derived DTO.
pub fn validate_confidence(confidence: f64) -> Result<(), CoreError> {
    if !confidence.is_finite() {
        return Err(CoreError::Validation(
            "confidence must be a finite number".to_string(),
        ));
    }
    if !(MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&confidence) {
        return Err(CoreError::Validation(format!(
            "confidence must be between {MIN_CONFIDENCE} and {MAX_CONFIDENCE}, got {confidence}"
        )));
    }
    Ok(())
}

/// Convert derive-validation output into a [`CoreError::Validation`].
///
/// Field errors are flattened into `field: message` pairs sorted by field
/// name so the resulting message is stable.
pub fn validation_failure(errors: &ValidationErrors) -> CoreError {
    CoreError::Validation(describe(errors, None))
}

/// Like [`validation_failure`] but prefixes every field with an element
/// path such as `objects[2]`.
pub fn element_validation_failure(
    field: &str,
    index: usize,
    errors: &ValidationErrors,
) -> CoreError {
    CoreError::Validation(describe(errors, Some(&format!("{field}[{index}]"))))
}

fn describe(errors: &ValidationErrors, prefix: Option<&str>) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            match prefix {
                Some(p) => format!("{p}.{field}: {}", messages.join(", ")),
                None => format!("{field}: {}", messages.join(", ")),
            }
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
