/// A single field failed validation at the input boundary.
///
/// Every validator and the entry builder report failures through this type. There is no
/// distinction between "missing" and "malformed" beyond the `reason` text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    /// Wire name of the offending field (for example `healthCheckRating` or `discharge.date`).
    pub field: String,
    /// Human-readable explanation.
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The standard "missing or incorrect" failure for `field`.
    pub fn missing_or_incorrect(field: impl Into<String>) -> Self {
        Self::new(field, "missing or incorrect")
    }
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("patient not found: {0}")]
    NotFound(String),
    #[error("entry {entry_id} already exists on patient {patient_id}")]
    DuplicateEntryId {
        patient_id: String,
        entry_id: String,
    },
    #[error("patient {0} already exists")]
    DuplicatePatientId(String),
    #[error("duplicate diagnosis code in reference data: {0}")]
    DuplicateDiagnosisCode(String),
    #[error("patient store is unavailable")]
    StoreUnavailable,
    #[error("failed to read data file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to deserialize {what} at {path}: {source}")]
    Deserialization {
        what: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
