//! # API Shared
//!
//! Shared wire types and services for patientor APIs.
//!
//! Contains:
//! - Request/response bodies that are not core domain types (`wire` module)
//! - Shared services like `HealthService`
//!
//! Every wire type derives `utoipa::ToSchema` so it can appear in the OpenAPI document.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
