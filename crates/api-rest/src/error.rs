use api_shared::ErrorRes;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use patientor_core::PatientError;

pub const PATIENT_NOT_FOUND: &str = "Sorry, this patient does not exist";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Patient(#[from] PatientError),

    /// A malformed request outside the core's validation (e.g. calculator parameters).
    #[error("{0}")]
    BadRequest(&'static str),

    /// The request body was missing, not declared as JSON, or not parseable.
    #[error(transparent)]
    MalformedBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Validation messages go back verbatim as plain text.
            ApiError::Patient(PatientError::Validation(e)) => {
                tracing::debug!(field = %e.field, "rejected input: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
            ApiError::Patient(PatientError::NotFound(id)) => {
                tracing::debug!(patient_id = %id, "patient not found");
                (StatusCode::NOT_FOUND, Json(ErrorRes::new(PATIENT_NOT_FOUND))).into_response()
            }
            ApiError::Patient(e) => {
                tracing::error!("patient service error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorRes::new(msg))).into_response()
            }
            // Always 400, whatever status axum would have picked for the rejection.
            ApiError::MalformedBody(rejection) => {
                tracing::debug!("rejected body: {}", rejection.body_text());
                (StatusCode::BAD_REQUEST, rejection.body_text()).into_response()
            }
        }
    }
}
