//! HTTP surface.
//!
//! One submodule per resource, each exposing a `router()` that this
//! module nests under its `/api/...` prefix. Success responses share the
//! envelope `{"success": true, "data": ...}`; deletions answer with
//! `{"success": true, "message": ...}` instead.

mod appointments;
mod medicines;
mod patients;
mod roster;
mod shopping;
mod treatments;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Success envelope around a payload.
#[derive(Debug, Serialize)]
pub struct DataBody<T> {
    pub success: bool,
    pub data: T,
}

/// Success envelope for actions that return no payload.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub success: bool,
    pub message: String,
}

fn data<T: Serialize>(value: T) -> Json<DataBody<T>> {
    Json(DataBody {
        success: true,
        data: value,
    })
}

fn created<T: Serialize>(value: T) -> (StatusCode, Json<DataBody<T>>) {
    (StatusCode::CREATED, data(value))
}

fn message(text: impl Into<String>) -> Json<MessageBody> {
    Json(MessageBody {
        success: true,
        message: text.into(),
    })
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest("/api/patients", patients::router())
        .nest("/api/treatments", treatments::router())
        .nest("/api/appointments", appointments::router())
        .nest("/api/medicines", medicines::router())
        .nest("/api/shopping", shopping::router())
        .nest("/api/roster", roster::router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Chairside clinic management API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "patients": "/api/patients",
            "treatments": "/api/treatments",
            "appointments": "/api/appointments",
            "medicines": "/api/medicines",
            "shopping": "/api/shopping",
            "roster": "/api/roster"
        }
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Chairside API is alive"
    }))
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "No such endpoint"
        })),
    )
}
