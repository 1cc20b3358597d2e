//! Input validation functions
//!
//! Checks applied before any storage access. Uses the `validator` crate for
//! derived path checks (see [`crate::types`]) and plain functions here.

use validator::ValidationErrors;

use crate::errors::DomainError;
use crate::models::ActivityStatus;

/// Require a non-empty identifier
pub fn require_id(value: &str, field: &'static str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::MissingField(field));
    }
    Ok(())
}

/// Parse a status value, accepting only the two enumerated literals
pub fn parse_status(value: &str) -> Result<ActivityStatus, DomainError> {
    value.parse()
}

/// Flatten derive-validation errors into a single message
///
/// Messages are ordered by field name so output is deterministic.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
