//! # API REST
//!
//! REST API implementation for patientor.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, status codes, CORS)
//!
//! Handlers stay thin: untyped bodies are handed to `patientor-core`, which owns all
//! validation. Uses `api-shared` for wire types that are not core domain types.

#![warn(rust_2018_idioms)]

pub mod calculator;
pub mod error;
pub mod patients;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{HealthRes, HealthService};
use patientor_core::PatientService;

pub use error::ApiError;

/// Application state shared across REST API handlers
///
/// Holds the patient service; the repository inside it is shared, so cloning the state is
/// cheap and every clone sees the same patients.
#[derive(Clone)]
pub struct AppState {
    pub patient_service: PatientService,
}

impl AppState {
    pub fn new(patient_service: PatientService) -> Self {
        Self { patient_service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        patients::ping,
        patients::list_diagnoses,
        patients::list_patients,
        patients::create_patient,
        patients::get_patient,
        patients::list_entries,
        patients::add_entry,
        calculator::hello,
        calculator::bmi,
        calculator::exercises,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorRes,
        api_shared::BmiRes,
        api_shared::ExercisesReq,
        api_shared::ExercisesRes,
    ))
)]
pub struct ApiDoc;

/// Builds the full REST router with state, docs and CORS applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/ping", get(patients::ping))
        .route("/api/diagnoses", get(patients::list_diagnoses))
        .route(
            "/api/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route("/api/patients/:id", get(patients::get_patient))
        .route(
            "/api/patients/:id/entries",
            get(patients::list_entries).post(patients::add_entry),
        )
        .route("/hello", get(calculator::hello))
        .route("/bmi", get(calculator::bmi))
        .route("/exercises", post(calculator::exercises))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}
