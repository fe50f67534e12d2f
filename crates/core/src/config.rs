//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Nothing in the core reads environment variables while handling a request; binaries read
//! them and hand the raw values to the helpers here.

use crate::{PatientError, PatientResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    diagnoses_file: Option<PathBuf>,
    patients_file: Option<PathBuf>,
    strict_diagnosis_codes: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `None` for either file selects the data set bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::InvalidConfig`] if a configured file does not exist.
    pub fn new(
        diagnoses_file: Option<PathBuf>,
        patients_file: Option<PathBuf>,
        strict_diagnosis_codes: bool,
    ) -> PatientResult<Self> {
        for path in diagnoses_file.iter().chain(patients_file.iter()) {
            if !path.is_file() {
                return Err(PatientError::InvalidConfig(format!(
                    "data file does not exist: {}",
                    path.display()
                )));
            }
        }

        Ok(Self {
            diagnoses_file,
            patients_file,
            strict_diagnosis_codes,
        })
    }

    pub fn diagnoses_file(&self) -> Option<&Path> {
        self.diagnoses_file.as_deref()
    }

    pub fn patients_file(&self) -> Option<&Path> {
        self.patients_file.as_deref()
    }

    /// Whether new entries must only reference known diagnosis codes.
    pub fn strict_diagnosis_codes(&self) -> bool {
        self.strict_diagnosis_codes
    }
}

/// Parse a boolean flag from an optional environment value.
///
/// `None` or blank means `false`. Accepts `true/false`, `1/0`, `yes/no`, `on/off`
/// (case-insensitive).
pub fn flag_from_env_value(name: &str, value: Option<String>) -> PatientResult<bool> {
    let Some(value) = value.map(|v| v.trim().to_ascii_lowercase()) else {
        return Ok(false);
    };

    match value.as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        other => Err(PatientError::InvalidConfig(format!(
            "{name} must be a boolean, got '{other}'"
        ))),
    }
}

/// Parse an optional path from an environment value; blank counts as unset.
pub fn path_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
