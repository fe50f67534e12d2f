use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use patientor_core::config::{flag_from_env_value, path_from_env_value};
use patientor_core::constants::{
    ENV_DIAGNOSES_FILE, ENV_PATIENTS_FILE, ENV_REST_ADDR, ENV_STRICT_DIAGNOSIS_CODES,
};
use patientor_core::{CoreConfig, PatientService};

/// Main entry point for the patientor application
///
/// Resolves configuration once, loads diagnosis and patient data, then serves the REST API.
///
/// # Environment Variables
/// - `PATIENTOR_REST_ADDR`: REST server address (default: "0.0.0.0:3001")
/// - `DIAGNOSES_FILE`: diagnoses JSON file (default: bundled data)
/// - `PATIENTS_FILE`: seed patients JSON file (default: bundled data)
/// - `PATIENTOR_STRICT_DIAGNOSIS_CODES`: reject entries citing unknown diagnosis codes
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - configuration values are invalid or data files cannot be loaded,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patientor_run=info".parse()?)
                .add_directive("patientor_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var(ENV_REST_ADDR)
        .unwrap_or_else(|_| patientor_core::DEFAULT_REST_ADDR.into())
        .parse()?;

    let cfg = CoreConfig::new(
        path_from_env_value(std::env::var(ENV_DIAGNOSES_FILE).ok()),
        path_from_env_value(std::env::var(ENV_PATIENTS_FILE).ok()),
        flag_from_env_value(
            ENV_STRICT_DIAGNOSIS_CODES,
            std::env::var(ENV_STRICT_DIAGNOSIS_CODES).ok(),
        )?,
    )?;
    if cfg.strict_diagnosis_codes() {
        tracing::info!("diagnosis codes on new entries must be known");
    }

    let patient_service = PatientService::from_config(&cfg)?;
    let app = api_rest::router(AppState::new(patient_service));

    tracing::info!("++ Starting patientor REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
