//! Patient storage.
//!
//! The core never reaches for a global collection: handlers and services receive a
//! [`PatientRepository`] and work through it. The in-memory implementation is the only one
//! shipped; a database-backed store would implement the same trait.

pub mod patients;

pub use patients::{InMemoryPatientRepository, PatientRepository};
