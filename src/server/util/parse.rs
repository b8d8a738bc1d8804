use std::str::FromStr;

use crate::server::error::AppError;

/// Parses a path or query value, naming the field in the error
///
/// # Arguments
/// - `field` - Name reported to the client on failure
/// - `value` - The raw string to parse
///
/// # Returns
/// - `Ok(T)` - Successfully parsed value
/// - `Err(AppError::InvalidValue)` - 400 `Invalid <field>: <value>.`
pub fn parse_value<T: FromStr>(field: &str, value: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| AppError::invalid_value(field, value))
}

/// Parses a resource ID from a path segment
pub fn parse_id(value: &str) -> Result<i32, AppError> {
    parse_value("id", value)
}
