//! Input validation utilities.
//!
//! Everything that arrives from outside the core (HTTP bodies, CLI files) is an untyped
//! `serde_json::Value`. The functions here are the only way such input becomes a typed value:
//! each one either returns the typed value or a [`ValidationError`] naming the field.
//!
//! Validators take `Option<&Value>` so that a missing key and an explicit `null` can be
//! handled in one place, matching how `serde_json::Map::get` hands fields out.

use crate::constants::DATE_FORMAT;
use crate::entry::HealthCheckRating;
use crate::error::{ValidationError, ValidationResult};
use chrono::NaiveDate;
use serde_json::Value;

/// A closed enumeration with a fixed string form on the wire.
pub trait WireEnum: Sized + Copy + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    fn as_wire(self) -> &'static str;

    fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_wire() == s)
    }
}

/// Parses a required, non-empty string.
///
/// Whitespace-only strings count as empty. The returned value is not trimmed.
pub fn parse_required_string(value: Option<&Value>, field: &str) -> ValidationResult<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(ValidationError::missing_or_incorrect(field)),
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: Option<&Value>, field: &str) -> ValidationResult<NaiveDate> {
    let Some(Value::String(s)) = value else {
        return Err(ValidationError::missing_or_incorrect(field));
    };

    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::new(field, format!("not a calendar date: '{s}'")))
}

/// Parses a string that must name one member of `T`.
pub fn parse_enum<T: WireEnum>(value: Option<&Value>, field: &str) -> ValidationResult<T> {
    let Some(Value::String(s)) = value else {
        return Err(ValidationError::missing_or_incorrect(field));
    };

    T::from_wire(s).ok_or_else(|| {
        let allowed: Vec<&str> = T::ALL.iter().map(|v| v.as_wire()).collect();
        ValidationError::new(
            field,
            format!("'{s}' is not one of: {}", allowed.join(", ")),
        )
    })
}

/// Parses an optional array of strings.
///
/// A missing value or `null` yields an empty vector. An empty array always passes,
/// whatever element type the sender had in mind; a non-empty array fails if any element
/// is not a string.
pub fn parse_string_array(value: Option<&Value>, field: &str) -> ValidationResult<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => {
                    tracing::debug!(%field, element = %other, "non-string array element");
                    Err(ValidationError::new(field, "must be an array of strings"))
                }
            })
            .collect(),
        Some(_) => Err(ValidationError::new(field, "must be an array of strings")),
    }
}

/// Parses a health check rating: a whole number in `0..=3`.
///
/// Floats without a fractional part (`1.0`) are accepted as the matching integer.
pub fn parse_health_check_rating(value: Option<&Value>) -> ValidationResult<HealthCheckRating> {
    const FIELD: &str = "healthCheckRating";

    let rating = match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && (0.0..=3.0).contains(f))
                .map(|f| f as u64)
        }),
        _ => None,
    };

    rating
        .and_then(|r| u8::try_from(r).ok())
        .and_then(|r| HealthCheckRating::try_from(r).ok())
        .ok_or_else(|| {
            let shown = value.map(Value::to_string).unwrap_or_default();
            ValidationError::new(FIELD, format!("missing or incorrect rating: {shown}"))
        })
}
