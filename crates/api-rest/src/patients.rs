//! Patient, entry and diagnosis endpoints under `/api`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;

use api_shared::ErrorRes;
use patientor_core::{Diagnosis, Entry, Patient, PublicPatient};

use crate::{ApiError, AppState};

#[utoipa::path(
    get,
    path = "/api/ping",
    responses((status = 200, description = "Liveness probe used by the front-end", body = String))
)]
pub async fn ping() -> &'static str {
    tracing::debug!("someone pinged here");
    "pong"
}

#[utoipa::path(
    get,
    path = "/api/diagnoses",
    responses((status = 200, description = "All known diagnoses"))
)]
#[axum::debug_handler]
pub async fn list_diagnoses(State(state): State<AppState>) -> Json<Vec<Diagnosis>> {
    Json(state.patient_service.diagnoses().to_vec())
}

#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "Patients without ssn or entries"),
        (status = 500, description = "Internal server error")
    )
)]
/// List all patients
///
/// Only non-sensitive fields are returned; use `/api/patients/{id}` for the full record.
#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicPatient>>, ApiError> {
    Ok(Json(state.patient_service.list_patients()?))
}

#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = Value,
    responses(
        (status = 201, description = "Patient created"),
        (status = 400, description = "Validation error message", body = String),
        (status = 500, description = "Internal server error")
    )
)]
/// Create a new patient
///
/// The body is validated field by field (`name`, `ssn`, `dateOfBirth`, `gender`,
/// `occupation`); the first failure is returned as a 400 with the message as plain text.
/// A body that is not JSON is a 400 as well.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let Json(body) = body?;
    let patient = state.patient_service.create_patient(&body)?;
    Ok((StatusCode::CREATED, Json(patient)))
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Full patient record including entries"),
        (status = 404, description = "Unknown patient", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(state.patient_service.find_patient(&id)?))
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}/entries",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient's entries in insertion order"),
        (status = 404, description = "Unknown patient", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_entries(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    Ok(Json(state.patient_service.patient_entries(&id)?))
}

#[utoipa::path(
    post,
    path = "/api/patients/{id}/entries",
    params(("id" = String, Path, description = "Patient id")),
    request_body = Value,
    responses(
        (status = 200, description = "Updated patient with the new entry appended"),
        (status = 400, description = "Validation error message", body = String),
        (status = 404, description = "Unknown patient", body = ErrorRes)
    )
)]
/// Add an entry to a patient
///
/// The body must carry a `type` of `HealthCheck`, `Hospital` or `OccupationalHealthcare`
/// together with that variant's fields. Returns the whole updated patient.
///
/// The patient is looked up before the body is read, so an unknown id is a 404 whatever
/// was sent.
#[axum::debug_handler]
pub async fn add_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Patient>, ApiError> {
    state.patient_service.find_patient(&id)?;
    let Json(body) = body?;
    Ok(Json(state.patient_service.add_entry(&id, &body)?))
}
