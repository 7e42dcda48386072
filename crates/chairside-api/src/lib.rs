//! # Chairside REST API
//!
//! HTTP JSON surface over [`chairside_core`].
//!
//! Handles:
//! - CRUD endpoints for patients, treatment records, appointments,
//!   medicines and the shopping list
//! - the derived visit roster
//! - response envelopes and error-to-status mapping
//! - REST-specific concerns (JSON bodies, CORS, request tracing)

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::app;
pub use state::AppState;
