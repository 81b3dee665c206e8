//! Required-field validation for new posts.

use crate::domain::{Field, PostFields, Schema};
use crate::error::DomainError;

/// Required fields of `schema` that are absent, null, or empty in `fields`.
///
/// The result follows the schema's field order.
pub fn missing_fields(fields: &PostFields, schema: &Schema) -> Vec<Field> {
    schema
        .required
        .iter()
        .copied()
        .filter(|field| fields.get(*field).is_none())
        .collect()
}

/// Fail with [`DomainError::Validation`] when any required field is missing.
pub fn validate_new_post(fields: &PostFields, schema: &Schema) -> Result<(), DomainError> {
    let missing = missing_fields(fields, schema);
    if missing.is_empty() {
        return Ok(());
    }
    Err(DomainError::Validation {
        missing: missing.iter().map(|f| f.as_str().to_string()).collect(),
    })
}
