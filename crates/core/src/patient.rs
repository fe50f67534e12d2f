//! Patients and patient construction requests.
//!
//! A [`Patient`] owns an ordered list of entries that only ever grows by append.
//! [`PublicPatient`] is the non-sensitive projection served in listings: it drops the
//! `ssn` and the entries.

use crate::entry::Entry;
use crate::error::{ValidationError, ValidationResult};
use crate::validation::{parse_date, parse_enum, parse_required_string, WireEnum};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl WireEnum for Gender {
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female, Gender::Other];

    fn as_wire(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub ssn: String,
    pub occupation: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Patient {
    /// Creates a patient from a validated request with a fresh id and no entries.
    pub fn from_new(new_patient: NewPatient) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: new_patient.name,
            ssn: new_patient.ssn,
            occupation: new_patient.occupation,
            gender: new_patient.gender,
            date_of_birth: new_patient.date_of_birth,
            entries: Vec::new(),
        }
    }

    pub fn has_entry(&self, entry_id: &str) -> bool {
        self.entries.iter().any(|e| e.id == entry_id)
    }
}

/// Patient fields that are safe to list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPatient {
    pub id: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub occupation: String,
}

impl From<&Patient> for PublicPatient {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.clone(),
            name: patient.name.clone(),
            date_of_birth: patient.date_of_birth,
            gender: patient.gender,
            occupation: patient.occupation.clone(),
        }
    }
}

/// A validated patient construction request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub ssn: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub occupation: String,
}

/// Validates a patient construction request.
///
/// Fields are checked in the order `name`, `ssn`, `dateOfBirth`, `gender`, `occupation`;
/// the first failure is returned.
pub fn parse_new_patient(input: &Value) -> ValidationResult<NewPatient> {
    let Value::Object(fields) = input else {
        return Err(ValidationError::new("patient", "expected a JSON object"));
    };

    Ok(NewPatient {
        name: parse_required_string(fields.get("name"), "name")?,
        ssn: parse_required_string(fields.get("ssn"), "ssn")?,
        date_of_birth: parse_date(fields.get("dateOfBirth"), "dateOfBirth")?,
        gender: parse_enum(fields.get("gender"), "gender")?,
        occupation: parse_required_string(fields.get("occupation"), "occupation")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> Value {
        json!({
            "name": "Jane Doe",
            "ssn": "010190-123A",
            "dateOfBirth": "1990-01-01",
            "gender": "female",
            "occupation": "Engineer",
        })
    }

    #[test]
    fn parses_valid_request() {
        let new_patient = parse_new_patient(&request()).expect("valid request");
        assert_eq!(new_patient.gender, Gender::Female);

        let patient = Patient::from_new(new_patient);
        assert!(patient.entries.is_empty());
        assert!(Uuid::parse_str(&patient.id).is_ok());
    }

    #[test]
    fn reports_first_invalid_field() {
        let mut input = request();
        input["ssn"] = json!(null);
        input["gender"] = json!("unknown");
        let err = parse_new_patient(&input).expect_err("ssn missing");
        assert_eq!(err.field, "ssn");

        let mut input = request();
        input["gender"] = json!("unknown");
        let err = parse_new_patient(&input).expect_err("bad gender");
        assert_eq!(err.field, "gender");

        let mut input = request();
        input["dateOfBirth"] = json!("01/01/1990");
        let err = parse_new_patient(&input).expect_err("bad date");
        assert_eq!(err.field, "dateOfBirth");
    }

    #[test]
    fn public_projection_hides_ssn_and_entries() {
        let patient = Patient::from_new(parse_new_patient(&request()).unwrap());
        let wire = serde_json::to_value(PublicPatient::from(&patient)).unwrap();
        let obj = wire.as_object().unwrap();
        assert!(!obj.contains_key("ssn"));
        assert!(!obj.contains_key("entries"));
        assert_eq!(obj["dateOfBirth"], json!("1990-01-01"));
        assert_eq!(obj["gender"], json!("female"));
    }
}
