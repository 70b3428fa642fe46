use crate::utils::error::{DinnerError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> DinnerError {
    DinnerError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// A storage file path with the extension its adapter reads (`csv`, `json`).
pub fn validate_data_file(field_name: &str, path: &str, extension: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case(extension) => Ok(()),
        _ => Err(invalid(
            field_name,
            path,
            format!("Expected a .{} file", extension),
        )),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| DinnerError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// The joiner between dish names must be visible and fit on the reply line.
pub fn validate_conjunction(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Conjunction cannot be blank"));
    }
    if value.contains(|c: char| c == '\n' || c == '\r') {
        return Err(invalid(field_name, value.escape_debug(), "Conjunction must be a single line"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_data_file() {
        assert!(validate_data_file("storage.catalog_path", "./data/foods.csv", "csv").is_ok());
        assert!(validate_data_file("storage.history_path", "/srv/history.JSON", "json").is_ok());
        assert!(validate_data_file("storage.catalog_path", "", "csv").is_err());
        assert!(validate_data_file("storage.catalog_path", "./data/foods.json", "csv").is_err());
        assert!(validate_data_file("storage.history_path", "./data/history", "json").is_err());
    }

    #[test]
    fn test_validate_conjunction() {
        assert!(validate_conjunction("reply.conjunction", " and ").is_ok());
        assert!(validate_conjunction("reply.conjunction", ", ").is_ok());
        assert!(validate_conjunction("reply.conjunction", "   ").is_err());
        assert!(validate_conjunction("reply.conjunction", " and\n").is_err());
    }

    #[test]
    fn test_validate_range_and_required() {
        assert!(validate_range("quota.window_hours", 24, 1, 24 * 30).is_ok());
        assert!(validate_range("quota.window_hours", 0, 1, 24 * 30).is_err());
        assert!(validate_range("quota.max_requests", 0usize, 1, 1000).is_err());

        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("config", &missing),
            Err(DinnerError::MissingConfigError { .. })
        ));
    }
}
