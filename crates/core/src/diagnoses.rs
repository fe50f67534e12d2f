//! Diagnosis reference data.
//!
//! Diagnoses are loaded once at startup and never change afterwards. Lookups are by code.

use crate::constants::BUNDLED_DIAGNOSES_JSON;
use crate::error::{PatientError, PatientResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Diagnosis {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latin: Option<String>,
}

/// Read-only registry of known diagnoses, in source order.
#[derive(Clone, Debug, Default)]
pub struct DiagnosisRegistry {
    diagnoses: Vec<Diagnosis>,
    by_code: HashMap<String, usize>,
}

impl DiagnosisRegistry {
    pub fn new(diagnoses: Vec<Diagnosis>) -> PatientResult<Self> {
        let mut by_code = HashMap::with_capacity(diagnoses.len());
        for (idx, diagnosis) in diagnoses.iter().enumerate() {
            if by_code.insert(diagnosis.code.clone(), idx).is_some() {
                return Err(PatientError::DuplicateDiagnosisCode(diagnosis.code.clone()));
            }
        }
        Ok(Self { diagnoses, by_code })
    }

    /// Parses a JSON array of diagnoses.
    ///
    /// Schema mismatches report the JSON path of the offending element (e.g. `[3].code`).
    pub fn from_json(text: &str) -> PatientResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(text);
        let diagnoses: Vec<Diagnosis> = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|err| {
                let path = err.path().to_string();
                PatientError::Deserialization {
                    what: "diagnoses",
                    path,
                    source: err.into_inner(),
                }
            })?;
        Self::new(diagnoses)
    }

    pub fn load(path: &Path) -> PatientResult<Self> {
        let text = std::fs::read_to_string(path).map_err(PatientError::FileRead)?;
        let registry = Self::from_json(&text)?;
        tracing::info!(
            "loaded {} diagnoses from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// The diagnosis set compiled into the crate.
    pub fn bundled() -> PatientResult<Self> {
        Self::from_json(BUNDLED_DIAGNOSES_JSON)
    }

    pub fn all(&self) -> &[Diagnosis] {
        &self.diagnoses
    }

    pub fn get(&self, code: &str) -> Option<&Diagnosis> {
        self.by_code.get(code).map(|&idx| &self.diagnoses[idx])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.diagnoses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnoses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_data_loads() {
        let registry = DiagnosisRegistry::bundled().expect("bundled diagnoses");
        assert!(!registry.is_empty());
        assert_eq!(registry.get("S62.5").map(|d| d.name.as_str()), Some("Fracture of thumb"));
        assert!(registry.get("Z57.1").unwrap().latin.is_none());
        assert!(!registry.contains("X00.0"));
    }

    #[test]
    fn rejects_duplicate_codes() {
        let text = r#"[{"code": "A", "name": "one"}, {"code": "A", "name": "two"}]"#;
        let err = DiagnosisRegistry::from_json(text).expect_err("duplicate code");
        assert!(matches!(err, PatientError::DuplicateDiagnosisCode(code) if code == "A"));
    }

    #[test]
    fn schema_errors_carry_a_path() {
        let text = r#"[{"code": "A", "name": "one"}, {"code": 7, "name": "two"}]"#;
        match DiagnosisRegistry::from_json(text).expect_err("bad code type") {
            PatientError::Deserialization { path, .. } => assert_eq!(path, "[1].code"),
            other => panic!("expected Deserialization error, got {other:?}"),
        }
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"[{{"code": "L20", "name": "Atopic dermatitis"}}]"#).unwrap();

        let registry = DiagnosisRegistry::load(file.path()).expect("load from file");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.all()[0].code, "L20");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DiagnosisRegistry::load(&dir.path().join("nope.json")).expect_err("missing");
        assert!(matches!(err, PatientError::FileRead(_)));
    }
}
