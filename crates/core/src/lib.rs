//! # Patientor Core
//!
//! Core business logic for the patientor patient record service.
//!
//! This crate contains pure data operations:
//! - Boundary validators that turn untyped JSON into typed values ([`validation`])
//! - The tagged medical entry model and its builder ([`entry`])
//! - Patients and patient construction requests ([`patient`])
//! - Diagnosis reference data ([`diagnoses`])
//! - Patient storage behind a repository trait ([`repositories`])
//! - The service that composes the above ([`service`])
//!
//! **No API concerns**: HTTP servers, routing and status codes belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod diagnoses;
pub mod entry;
pub mod error;
pub mod patient;
pub mod repositories;
pub mod service;
pub mod validation;

pub use config::CoreConfig;
pub use diagnoses::{Diagnosis, DiagnosisRegistry};
pub use entry::{
    build_entry, parse_new_entry, Discharge, Entry, EntryDetails, EntryType, HealthCheckRating,
    NewEntry, SickLeave,
};
pub use error::{PatientError, PatientResult, ValidationError, ValidationResult};
pub use patient::{parse_new_patient, Gender, NewPatient, Patient, PublicPatient};
pub use repositories::{InMemoryPatientRepository, PatientRepository};
pub use service::PatientService;

pub use constants::DEFAULT_REST_ADDR;
