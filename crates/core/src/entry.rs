//! Medical entries and their validated construction.
//!
//! An [`Entry`] is one event in a patient's record. Every entry shares a common base
//! (description, date, specialist, optional diagnosis codes) and carries exactly one
//! [`EntryDetails`] variant selected by the `type` discriminant. The sum type makes it
//! impossible to hold, say, a discharge on a health check.
//!
//! Construction from untyped input goes through [`build_entry`]:
//!
//! 1. base fields are validated in order, first failure wins;
//! 2. the discriminant is matched exhaustively and the variant fields validated;
//! 3. a fresh id is generated and attached.
//!
//! The wire form is flat JSON with `type` inline:
//!
//! ```text
//! {"id": "...", "type": "HealthCheck", "description": "Annual", "date": "2024-01-10",
//!  "specialist": "Dr. X", "healthCheckRating": 1}
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::validation::{
    parse_date, parse_health_check_rating, parse_required_string, parse_string_array, WireEnum,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

// ============================================================================
// Discriminant and variant payloads
// ============================================================================

/// The entry discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    HealthCheck,
    Hospital,
    OccupationalHealthcare,
}

impl WireEnum for EntryType {
    const ALL: &'static [Self] = &[
        EntryType::HealthCheck,
        EntryType::Hospital,
        EntryType::OccupationalHealthcare,
    ];

    fn as_wire(self) -> &'static str {
        match self {
            EntryType::HealthCheck => "HealthCheck",
            EntryType::Hospital => "Hospital",
            EntryType::OccupationalHealthcare => "OccupationalHealthcare",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Outcome of a routine health check, serialised as its integer value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HealthCheckRating {
    Healthy = 0,
    LowRisk = 1,
    HighRisk = 2,
    CriticalRisk = 3,
}

impl TryFrom<u8> for HealthCheckRating {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(HealthCheckRating::Healthy),
            1 => Ok(HealthCheckRating::LowRisk),
            2 => Ok(HealthCheckRating::HighRisk),
            3 => Ok(HealthCheckRating::CriticalRisk),
            other => Err(other),
        }
    }
}

impl Serialize for HealthCheckRating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for HealthCheckRating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u8::deserialize(deserializer)?;
        HealthCheckRating::try_from(raw).map_err(|r| {
            serde::de::Error::custom(format!("health check rating must be 0..=3, got {r}"))
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discharge {
    pub date: NaiveDate,
    pub criteria: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SickLeave {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Variant-specific fields, tagged inline by `type`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntryDetails {
    #[serde(rename_all = "camelCase")]
    HealthCheck {
        health_check_rating: HealthCheckRating,
    },
    Hospital {
        discharge: Discharge,
    },
    #[serde(rename_all = "camelCase")]
    OccupationalHealthcare {
        employer_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sick_leave: Option<SickLeave>,
    },
}

impl EntryDetails {
    pub fn entry_type(&self) -> EntryType {
        match self {
            EntryDetails::HealthCheck { .. } => EntryType::HealthCheck,
            EntryDetails::Hospital { .. } => EntryType::Hospital,
            EntryDetails::OccupationalHealthcare { .. } => EntryType::OccupationalHealthcare,
        }
    }
}

// ============================================================================
// Entries
// ============================================================================

/// A stored entry. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub description: String,
    pub date: NaiveDate,
    pub specialist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_codes: Option<Vec<String>>,
    #[serde(flatten)]
    pub details: EntryDetails,
}

impl Entry {
    pub fn entry_type(&self) -> EntryType {
        self.details.entry_type()
    }
}

/// A validated entry that has not yet been given an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub description: String,
    pub date: NaiveDate,
    pub specialist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis_codes: Option<Vec<String>>,
    #[serde(flatten)]
    pub details: EntryDetails,
}

impl NewEntry {
    /// Attaches `id`, producing a stored [`Entry`].
    pub fn into_entry(self, id: String) -> Entry {
        Entry {
            id,
            description: self.description,
            date: self.date,
            specialist: self.specialist,
            diagnosis_codes: self.diagnosis_codes,
            details: self.details,
        }
    }
}

/// Generates a fresh entry id.
pub fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

// ============================================================================
// Construction from untyped input
// ============================================================================

/// Validates `input` and builds an [`Entry`] with a newly generated id.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered. No partial entry is ever produced.
pub fn build_entry(input: &Value) -> ValidationResult<Entry> {
    let new_entry = parse_new_entry(input)?;
    Ok(new_entry.into_entry(new_entry_id()))
}

/// Validates `input` into a [`NewEntry`] without assigning an id.
pub fn parse_new_entry(input: &Value) -> ValidationResult<NewEntry> {
    let Value::Object(fields) = input else {
        return Err(ValidationError::new("entry", "expected a JSON object"));
    };

    let entry_type = parse_entry_type(fields.get("type"))?;
    let description = parse_required_string(fields.get("description"), "description")?;
    let date = parse_date(fields.get("date"), "date")?;
    let specialist = parse_required_string(fields.get("specialist"), "specialist")?;
    let diagnosis_codes = match fields.get("diagnosisCodes") {
        None | Some(Value::Null) => None,
        codes => Some(parse_string_array(codes, "diagnosisCodes")?),
    };

    let details = match entry_type {
        EntryType::HealthCheck => EntryDetails::HealthCheck {
            health_check_rating: parse_health_check_rating(fields.get("healthCheckRating"))?,
        },
        EntryType::Hospital => EntryDetails::Hospital {
            discharge: parse_discharge(fields)?,
        },
        EntryType::OccupationalHealthcare => EntryDetails::OccupationalHealthcare {
            employer_name: parse_required_string(fields.get("employerName"), "employerName")?,
            sick_leave: parse_sick_leave(fields)?,
        },
    };

    Ok(NewEntry {
        description,
        date,
        specialist,
        diagnosis_codes,
        details,
    })
}

fn parse_entry_type(value: Option<&Value>) -> ValidationResult<EntryType> {
    match value {
        Some(Value::String(s)) => EntryType::from_wire(s).ok_or_else(|| {
            ValidationError::new("type", format!("unhandled entry type: {s}"))
        }),
        Some(Value::Null) | None => Err(ValidationError::missing_or_incorrect("type")),
        Some(other) => Err(ValidationError::new(
            "type",
            format!("unhandled entry type: {other}"),
        )),
    }
}

/// Reads `discharge: {date, criteria}`, falling back to the flat `DischargeDate` /
/// `criteria` fields that the entry form posts.
fn parse_discharge(fields: &Map<String, Value>) -> ValidationResult<Discharge> {
    let (date, criteria) = match fields.get("discharge") {
        Some(Value::Object(discharge)) => (discharge.get("date"), discharge.get("criteria")),
        None | Some(Value::Null) => (fields.get("DischargeDate"), fields.get("criteria")),
        Some(_) => return Err(ValidationError::missing_or_incorrect("discharge")),
    };

    Ok(Discharge {
        date: parse_date(date, "discharge.date")?,
        criteria: parse_required_string(criteria, "discharge.criteria")?,
    })
}

/// Reads an optional sick leave. It is attached only when both dates are present.
fn parse_sick_leave(fields: &Map<String, Value>) -> ValidationResult<Option<SickLeave>> {
    let (start, end) = match fields.get("sickLeave") {
        Some(Value::Object(leave)) => (leave.get("startDate"), leave.get("endDate")),
        None | Some(Value::Null) => (fields.get("startDate"), fields.get("endDate")),
        Some(_) => return Err(ValidationError::missing_or_incorrect("sickLeave")),
    };

    if !(is_present(start) && is_present(end)) {
        return Ok(None);
    }

    Ok(Some(SickLeave {
        start_date: parse_date(start, "sickLeave.startDate")?,
        end_date: parse_date(end, "sickLeave.endDate")?,
    }))
}

/// JSON truthiness: null, `false`, zero and `""` count as absent.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(_) => true,
    }
}
