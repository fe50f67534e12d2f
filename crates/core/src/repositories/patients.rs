use crate::constants::BUNDLED_PATIENTS_JSON;
use crate::entry::Entry;
use crate::error::{PatientError, PatientResult};
use crate::patient::Patient;
use std::collections::HashSet;
use std::path::Path;
use std::sync::RwLock;

/// Lookup and append operations over stored patients.
///
/// Implementations must serialise appends per patient so that entries keep a single,
/// stable order.
pub trait PatientRepository: Send + Sync {
    /// All patients in insertion order.
    fn list(&self) -> PatientResult<Vec<Patient>>;

    fn find_by_id(&self, id: &str) -> PatientResult<Option<Patient>>;

    /// Stores a new patient and returns it.
    fn insert(&self, patient: Patient) -> PatientResult<Patient>;

    /// Appends `entry` to the patient's entries and returns the updated patient.
    ///
    /// # Errors
    ///
    /// - [`PatientError::NotFound`] if no patient has `patient_id`,
    /// - [`PatientError::DuplicateEntryId`] if the patient already holds an entry with the
    ///   same id.
    fn append_entry(&self, patient_id: &str, entry: Entry) -> PatientResult<Patient>;
}

/// Process-lifetime patient store guarded by a single `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryPatientRepository {
    patients: RwLock<Vec<Patient>>,
}

impl InMemoryPatientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from existing records, checking id uniqueness.
    pub fn with_patients(patients: Vec<Patient>) -> PatientResult<Self> {
        Self::check_unique_ids(&patients)?;
        Ok(Self {
            patients: RwLock::new(patients),
        })
    }

    fn check_unique_ids(patients: &[Patient]) -> PatientResult<()> {
        let mut seen = HashSet::with_capacity(patients.len());
        for patient in patients {
            if !seen.insert(patient.id.as_str()) {
                return Err(PatientError::DuplicatePatientId(patient.id.clone()));
            }
            let mut entry_ids = HashSet::with_capacity(patient.entries.len());
            for entry in &patient.entries {
                if !entry_ids.insert(entry.id.as_str()) {
                    return Err(PatientError::DuplicateEntryId {
                        patient_id: patient.id.clone(),
                        entry_id: entry.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Parses a JSON array of stored patients (entries included).
    pub fn from_json(text: &str) -> PatientResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(text);
        let patients: Vec<Patient> = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|err| {
                let path = err.path().to_string();
                PatientError::Deserialization {
                    what: "patients",
                    path,
                    source: err.into_inner(),
                }
            })?;
        Self::with_patients(patients)
    }

    pub fn load(path: &Path) -> PatientResult<Self> {
        let text = std::fs::read_to_string(path).map_err(PatientError::FileRead)?;
        let repo = Self::from_json(&text)?;
        tracing::info!("loaded {} patients from {}", repo.len()?, path.display());
        Ok(repo)
    }

    /// The seed patients compiled into the crate.
    pub fn bundled() -> PatientResult<Self> {
        Self::from_json(BUNDLED_PATIENTS_JSON)
    }

    pub fn len(&self) -> PatientResult<usize> {
        Ok(self.read()?.len())
    }

    fn read(&self) -> PatientResult<std::sync::RwLockReadGuard<'_, Vec<Patient>>> {
        self.patients.read().map_err(|_| {
            tracing::error!("patient store lock poisoned");
            PatientError::StoreUnavailable
        })
    }

    fn write(&self) -> PatientResult<std::sync::RwLockWriteGuard<'_, Vec<Patient>>> {
        self.patients.write().map_err(|_| {
            tracing::error!("patient store lock poisoned");
            PatientError::StoreUnavailable
        })
    }
}

impl PatientRepository for InMemoryPatientRepository {
    fn list(&self) -> PatientResult<Vec<Patient>> {
        Ok(self.read()?.clone())
    }

    fn find_by_id(&self, id: &str) -> PatientResult<Option<Patient>> {
        Ok(self.read()?.iter().find(|p| p.id == id).cloned())
    }

    fn insert(&self, patient: Patient) -> PatientResult<Patient> {
        let mut patients = self.write()?;
        if patients.iter().any(|p| p.id == patient.id) {
            return Err(PatientError::DuplicatePatientId(patient.id));
        }
        patients.push(patient.clone());
        Ok(patient)
    }

    fn append_entry(&self, patient_id: &str, entry: Entry) -> PatientResult<Patient> {
        let mut patients = self.write()?;
        let patient = patients
            .iter_mut()
            .find(|p| p.id == patient_id)
            .ok_or_else(|| PatientError::NotFound(patient_id.to_string()))?;

        if patient.has_entry(&entry.id) {
            return Err(PatientError::DuplicateEntryId {
                patient_id: patient_id.to_string(),
                entry_id: entry.id,
            });
        }

        patient.entries.push(entry);
        Ok(patient.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::build_entry;
    use crate::patient::{parse_new_patient, Patient};
    use serde_json::json;
    use std::sync::Arc;

    fn new_patient(name: &str) -> Patient {
        Patient::from_new(
            parse_new_patient(&json!({
                "name": name,
                "ssn": "010190-123A",
                "dateOfBirth": "1990-01-01",
                "gender": "other",
                "occupation": "Tester",
            }))
            .unwrap(),
        )
    }

    fn health_check(description: &str) -> Entry {
        build_entry(&json!({
            "type": "HealthCheck",
            "description": description,
            "date": "2024-01-10",
            "specialist": "Dr. X",
            "healthCheckRating": 0,
        }))
        .unwrap()
    }

    #[test]
    fn bundled_seed_loads() {
        let repo = InMemoryPatientRepository::bundled().expect("seed data");
        let patients = repo.list().unwrap();
        assert_eq!(patients.len(), 5);

        let scully = repo
            .find_by_id("d2773822-f723-11e9-8f0b-362b9e155667")
            .unwrap()
            .expect("seeded patient");
        assert_eq!(scully.entries.len(), 3);
    }

    #[test]
    fn insert_then_find() {
        let repo = InMemoryPatientRepository::new();
        let patient = repo.insert(new_patient("Ann")).unwrap();

        let found = repo.find_by_id(&patient.id).unwrap().expect("stored");
        assert_eq!(found, patient);
        assert!(repo.find_by_id("missing").unwrap().is_none());
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let repo = InMemoryPatientRepository::new();
        let patient = repo.insert(new_patient("Ann")).unwrap();
        let err = repo.insert(patient).expect_err("duplicate");
        assert!(matches!(err, PatientError::DuplicatePatientId(_)));
    }

    #[test]
    fn append_preserves_order_and_returns_updated_patient() {
        let repo = InMemoryPatientRepository::new();
        let patient = repo.insert(new_patient("Ann")).unwrap();

        repo.append_entry(&patient.id, health_check("first")).unwrap();
        let updated = repo.append_entry(&patient.id, health_check("second")).unwrap();

        let descriptions: Vec<_> = updated.entries.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, ["first", "second"]);
        assert_eq!(repo.find_by_id(&patient.id).unwrap().unwrap(), updated);
    }

    #[test]
    fn append_rejects_unknown_patient_and_duplicate_entry() {
        let repo = InMemoryPatientRepository::new();
        let err = repo
            .append_entry("missing", health_check("x"))
            .expect_err("no such patient");
        assert!(matches!(err, PatientError::NotFound(id) if id == "missing"));

        let patient = repo.insert(new_patient("Ann")).unwrap();
        let entry = health_check("x");
        repo.append_entry(&patient.id, entry.clone()).unwrap();
        let err = repo.append_entry(&patient.id, entry).expect_err("duplicate entry id");
        assert!(matches!(err, PatientError::DuplicateEntryId { .. }));
        assert_eq!(repo.find_by_id(&patient.id).unwrap().unwrap().entries.len(), 1);
    }

    #[test]
    fn seed_rejects_duplicate_entry_ids_within_a_patient() {
        let mut patient = new_patient("Ann");
        let entry = health_check("x");
        patient.entries = vec![entry.clone(), entry];
        let err = InMemoryPatientRepository::with_patients(vec![patient]).expect_err("dup");
        assert!(matches!(err, PatientError::DuplicateEntryId { .. }));
    }

    #[test]
    fn concurrent_appends_are_all_kept() {
        let repo = Arc::new(InMemoryPatientRepository::new());
        let patient = repo.insert(new_patient("Ann")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = Arc::clone(&repo);
                let id = patient.id.clone();
                std::thread::spawn(move || {
                    repo.append_entry(&id, health_check(&format!("visit {i}")))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(repo.find_by_id(&patient.id).unwrap().unwrap().entries.len(), 8);
    }
}
