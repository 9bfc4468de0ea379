use crate::error::{AppError, AppResult};

/// The submitted value of a mandatory text field, unchanged. Missing or
/// whitespace-only values fail with a validation error naming the field.
pub fn required<'a>(value: Option<&'a str>, field: &str) -> AppResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::validation(format!("El campo '{}' es obligatorio", field))),
    }
}

/// Query filters: an empty parameter means no filter.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
