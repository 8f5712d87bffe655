//! # API Shared
//!
//! Shared definitions for the MedForm HTTP API.
//!
//! Contains:
//! - Request/response DTOs with `serde` and `utoipa` schemas (`dto` module)
//! - User-facing response messages
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the main `medform-run` binary.

pub mod dto;
pub mod health;
pub mod messages;

pub use dto::*;
pub use health::HealthService;
