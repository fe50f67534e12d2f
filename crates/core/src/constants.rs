//! Constants used throughout the patientor core crate.

/// Default REST listen address when `PATIENTOR_REST_ADDR` is unset.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3001";

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Diagnosis reference data compiled into the binary.
pub const BUNDLED_DIAGNOSES_JSON: &str = include_str!("../data/diagnoses.json");

/// Seed patients compiled into the binary.
pub const BUNDLED_PATIENTS_JSON: &str = include_str!("../data/patients.json");

/// Environment variable names read once at startup.
pub const ENV_REST_ADDR: &str = "PATIENTOR_REST_ADDR";
pub const ENV_DIAGNOSES_FILE: &str = "DIAGNOSES_FILE";
pub const ENV_PATIENTS_FILE: &str = "PATIENTS_FILE";
pub const ENV_STRICT_DIAGNOSIS_CODES: &str = "PATIENTOR_STRICT_DIAGNOSIS_CODES";
