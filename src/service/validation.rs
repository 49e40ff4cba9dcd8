//! Request validation against the table definitions: presence of required fields
//! and VARCHAR length limits.

use crate::error::AppError;
use crate::migration::TableDef;

/// A required text field: must be present and non-null, and fit the column.
pub fn required_text(
    table: &TableDef,
    field: &'static str,
    value: Option<String>,
) -> Result<String, AppError> {
    let value = value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))?;
    check_length(table, field, &value)?;
    Ok(value)
}

/// An optional text field: absent and null both map to `None`.
pub fn optional_text(
    table: &TableDef,
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, AppError> {
    if let Some(ref v) = value {
        check_length(table, field, v)?;
    }
    Ok(value)
}

pub fn required_id(field: &'static str, value: Option<i32>) -> Result<i32, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

fn check_length(table: &TableDef, field: &str, value: &str) -> Result<(), AppError> {
    let max = table.column(field).and_then(|c| c.max_length());
    if let Some(max) = max {
        if value.chars().count() > max {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                field, max
            )));
        }
    }
    Ok(())
}
