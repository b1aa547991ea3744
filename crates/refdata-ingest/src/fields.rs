//! Field conversion helpers shared by the format modules
//!
//! Each helper names the field it converts so the resulting [`FieldError`]
//! can say which column was bad.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::FieldError;

/// Parse an integer column, ignoring surrounding whitespace
pub fn parse_int<N>(field: &'static str, value: &str) -> Result<N, FieldError>
where
    N: FromStr,
    N::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| FieldError::new(field, value, e))
}

/// Parse a column holding a `separator`-joined list of integers
///
/// An empty column is an empty list; an empty element inside a non-empty list
/// is an error.
pub fn parse_int_list<N>(field: &'static str, value: &str, separator: char) -> Result<Vec<N>, FieldError>
where
    N: FromStr,
    N::Err: Display,
{
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }

    value
        .split(separator)
        .map(|item| {
            item.trim()
                .parse()
                .map_err(|e| FieldError::new(field, value, format!("element {item:?}: {e}")))
        })
        .collect()
}

/// Parse a timestamp with a fixed `chrono` pattern
pub fn parse_timestamp(
    field: &'static str,
    value: &str,
    pattern: &str,
) -> Result<NaiveDateTime, FieldError> {
    NaiveDateTime::parse_from_str(value.trim(), pattern)
        .map_err(|e| FieldError::new(field, value, format!("expected {pattern}: {e}")))
}

/// Parse a compact `YYYYMMDD` or ISO `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    match value.len() {
        8 => NaiveDate::parse_from_str(value, "%Y%m%d").ok(),
        10 => NaiveDate::parse_from_str(value, "%Y-%m-%d").ok(),
        _ => None,
    }
}

/// `None` for an empty column
pub fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Split a multi-valued column, dropping empty elements
pub fn split_list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
