//! Patient service.
//!
//! Ties the entry builder, the diagnosis registry and an injected [`PatientRepository`]
//! together. Handlers call this; it performs no transport work of its own.

use crate::config::CoreConfig;
use crate::diagnoses::{Diagnosis, DiagnosisRegistry};
use crate::entry::{build_entry, Entry};
use crate::error::{PatientError, PatientResult, ValidationError};
use crate::patient::{parse_new_patient, Patient, PublicPatient};
use crate::repositories::{InMemoryPatientRepository, PatientRepository};
use serde_json::Value;
use std::sync::Arc;

/// Pure patient data operations - no API concerns
#[derive(Clone)]
pub struct PatientService {
    repo: Arc<dyn PatientRepository>,
    diagnoses: Arc<DiagnosisRegistry>,
    strict_diagnosis_codes: bool,
}

impl PatientService {
    pub fn new(
        repo: Arc<dyn PatientRepository>,
        diagnoses: Arc<DiagnosisRegistry>,
        strict_diagnosis_codes: bool,
    ) -> Self {
        Self {
            repo,
            diagnoses,
            strict_diagnosis_codes,
        }
    }

    /// Builds the service from startup configuration, loading reference and seed data.
    ///
    /// # Errors
    ///
    /// Returns a `PatientError` if a configured data file cannot be read or parsed.
    pub fn from_config(cfg: &CoreConfig) -> PatientResult<Self> {
        let diagnoses = match cfg.diagnoses_file() {
            Some(path) => DiagnosisRegistry::load(path)?,
            None => DiagnosisRegistry::bundled()?,
        };
        let repo = match cfg.patients_file() {
            Some(path) => InMemoryPatientRepository::load(path)?,
            None => InMemoryPatientRepository::bundled()?,
        };

        Ok(Self::new(
            Arc::new(repo),
            Arc::new(diagnoses),
            cfg.strict_diagnosis_codes(),
        ))
    }

    pub fn diagnoses(&self) -> &[Diagnosis] {
        self.diagnoses.all()
    }

    /// Lists every patient without sensitive fields.
    pub fn list_patients(&self) -> PatientResult<Vec<PublicPatient>> {
        Ok(self
            .repo
            .list()?
            .iter()
            .map(PublicPatient::from)
            .collect())
    }

    pub fn find_patient(&self, id: &str) -> PatientResult<Patient> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| PatientError::NotFound(id.to_string()))
    }

    pub fn patient_entries(&self, id: &str) -> PatientResult<Vec<Entry>> {
        Ok(self.find_patient(id)?.entries)
    }

    /// Validates a construction request and stores the new patient.
    pub fn create_patient(&self, input: &Value) -> PatientResult<Patient> {
        let new_patient = parse_new_patient(input)?;
        let patient = self.repo.insert(Patient::from_new(new_patient))?;
        tracing::info!(patient_id = %patient.id, "patient created");
        Ok(patient)
    }

    /// Validates `input` as an entry and appends it to the patient.
    ///
    /// The patient is looked up before the input is validated, so an unknown patient is
    /// always reported as not found.
    ///
    /// # Returns
    ///
    /// The updated patient, including the new entry.
    ///
    /// # Errors
    ///
    /// - [`PatientError::NotFound`] for an unknown patient,
    /// - [`PatientError::Validation`] if the input is invalid or, in strict mode, references
    ///   an unknown diagnosis code.
    pub fn add_entry(&self, patient_id: &str, input: &Value) -> PatientResult<Patient> {
        self.find_patient(patient_id)?;

        let entry = build_entry(input)?;
        if self.strict_diagnosis_codes {
            self.check_diagnosis_codes(&entry)?;
        }

        let entry_id = entry.id.clone();
        let entry_type = entry.entry_type();
        let patient = self.repo.append_entry(patient_id, entry)?;
        tracing::info!(%patient_id, %entry_id, %entry_type, "entry added");
        Ok(patient)
    }

    fn check_diagnosis_codes(&self, entry: &Entry) -> PatientResult<()> {
        let unknown: Vec<&str> = entry
            .diagnosis_codes
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|code| !self.diagnoses.contains(code))
            .collect();

        if unknown.is_empty() {
            return Ok(());
        }
        Err(ValidationError::new(
            "diagnosisCodes",
            format!("unknown diagnosis codes: {}", unknown.join(", ")),
        )
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryType;
    use serde_json::json;

    const SCULLY: &str = "d2773822-f723-11e9-8f0b-362b9e155667";

    fn service(strict: bool) -> PatientService {
        PatientService::new(
            Arc::new(InMemoryPatientRepository::bundled().unwrap()),
            Arc::new(DiagnosisRegistry::bundled().unwrap()),
            strict,
        )
    }

    fn hospital(codes: Value) -> Value {
        json!({
            "type": "Hospital",
            "description": "Fall",
            "date": "2024-02-01",
            "specialist": "Dr. Y",
            "diagnosisCodes": codes,
            "discharge": { "date": "2024-02-05", "criteria": "Healed" },
        })
    }

    #[test]
    fn from_default_config_uses_bundled_data() {
        let svc = PatientService::from_config(&CoreConfig::default()).unwrap();
        assert!(!svc.diagnoses().is_empty());
        assert_eq!(svc.list_patients().unwrap().len(), 5);
    }

    #[test]
    fn add_entry_appends_and_returns_patient() {
        let svc = service(false);
        let before = svc.find_patient(SCULLY).unwrap().entries.len();

        let patient = svc.add_entry(SCULLY, &hospital(json!(["S62.5"]))).unwrap();
        assert_eq!(patient.entries.len(), before + 1);
        assert_eq!(patient.entries.last().unwrap().entry_type(), EntryType::Hospital);
        assert_eq!(svc.patient_entries(SCULLY).unwrap(), patient.entries);
    }

    #[test]
    fn invalid_entry_leaves_patient_untouched() {
        let svc = service(false);
        let before = svc.find_patient(SCULLY).unwrap();

        let mut input = hospital(json!([]));
        input.as_object_mut().unwrap().remove("discharge");
        let err = svc.add_entry(SCULLY, &input).expect_err("no discharge");
        assert!(matches!(err, PatientError::Validation(_)));
        assert_eq!(svc.find_patient(SCULLY).unwrap(), before);
    }

    #[test]
    fn unknown_patient_wins_over_invalid_input() {
        let svc = service(false);
        let err = svc.add_entry("nobody", &json!({})).expect_err("unknown patient");
        assert!(matches!(err, PatientError::NotFound(_)));
    }

    #[test]
    fn permissive_mode_accepts_unknown_codes() {
        let svc = service(false);
        assert!(svc.add_entry(SCULLY, &hospital(json!(["NOT.A.CODE"]))).is_ok());
    }

    #[test]
    fn strict_mode_rejects_unknown_codes() {
        let svc = service(true);
        let err = svc
            .add_entry(SCULLY, &hospital(json!(["S62.5", "NOT.A.CODE"])))
            .expect_err("unknown code");
        match err {
            PatientError::Validation(e) => {
                assert_eq!(e.field, "diagnosisCodes");
                assert!(e.reason.contains("NOT.A.CODE"));
                assert!(!e.reason.contains("S62.5"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(svc.add_entry(SCULLY, &hospital(json!(["S62.5"]))).is_ok());
    }

    #[test]
    fn create_patient_then_list() {
        let svc = service(false);
        let patient = svc
            .create_patient(&json!({
                "name": "Jane Doe",
                "ssn": "010190-123A",
                "dateOfBirth": "1990-01-01",
                "gender": "female",
                "occupation": "Engineer",
            }))
            .unwrap();

        let listed = svc.list_patients().unwrap();
        assert_eq!(listed.len(), 6);
        assert_eq!(listed.last().unwrap().id, patient.id);
    }
}
